pub mod config;
pub mod habit;
pub mod log;
pub mod measurement;
pub mod plan;
pub mod profile;
pub mod risk;

pub use log::{DailyActivityLog, ExerciseLogEntry};
pub use plan::{DietPlan, WorkoutPlan};
pub use profile::UserProfile;
