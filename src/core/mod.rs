pub mod constraints;
pub mod context;
pub mod diet;
pub mod forecast;
pub mod generator;
pub mod habit;
pub mod insights;
pub mod intensity;
pub mod logging;
pub mod measurements;
pub mod overload;
pub mod planner;
pub mod profile;
pub mod recovery;
pub mod risk;
pub mod status;
pub mod targets;
pub mod templates;
pub mod workout;
