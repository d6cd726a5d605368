use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "fitplan", version, about = "Adaptive workout and diet planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Override date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// Act as this user instead of the configured one
    #[arg(long, global = true)]
    pub user: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize config and data directory
    Init {
        /// Write defaults without overwriting existing settings
        #[arg(long)]
        skip: bool,
    },

    /// Show or edit the biometric profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Generate and inspect weekly plans
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Record daily activity, exercise sessions, weekly progress and body measurements
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Progression advice for an exercise
    Overload {
        /// Exercise name or alias
        exercise: String,

        /// Also list recent sessions
        #[arg(long)]
        history: Option<u32>,
    },

    /// Body measurement history
    Measurements {
        /// Only the most recent measurement
        #[arg(long, conflicts_with = "compare")]
        latest: bool,

        /// Compare the first and last measurement in the range
        #[arg(long)]
        compare: bool,

        /// Start of the comparison range (YYYY-MM-DD)
        #[arg(long, requires = "compare")]
        from: Option<NaiveDate>,

        /// End of the comparison range (YYYY-MM-DD)
        #[arg(long, requires = "compare")]
        to: Option<NaiveDate>,
    },

    /// Habit scores and streaks
    Habit {
        /// Include the 30-day daily-log summary
        #[arg(long)]
        stats: bool,

        /// Exercise-session adherence for a plan week
        #[arg(long)]
        week: Option<u32>,
    },

    /// Drop-off risk assessment
    Risk,

    /// Weeks-to-goal forecast from weekly weigh-ins
    Forecast,

    /// Recovery status from recent energy levels
    Recovery,

    /// Quick status overview
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile and derived targets
    Show,
    /// Create or update the profile
    Set {
        #[arg(long)]
        age: Option<u32>,
        /// male/female
        #[arg(long)]
        sex: Option<String>,
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// weight_loss/muscle_gain/maintenance
        #[arg(long)]
        goal: Option<String>,
        /// Target weight in kg
        #[arg(long)]
        target_weight: Option<f64>,
        /// sedentary/light/moderate/very_active
        #[arg(long)]
        activity: Option<String>,
        /// beginner/intermediate/advanced
        #[arg(long)]
        experience: Option<String>,
        /// Training days per week (1-7)
        #[arg(long)]
        days: Option<u8>,
        /// Dietary preference, e.g. vegetarian
        #[arg(long)]
        diet: Option<String>,
        /// Comma-separated allergies
        #[arg(long)]
        allergies: Option<String>,
        /// Comma-separated injuries
        #[arg(long)]
        injuries: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// Build and store a plan
    Generate {
        /// workout or diet
        kind: String,
        /// Plan week (default: next week)
        #[arg(long)]
        week: Option<u32>,
    },
    /// Show a stored plan
    Show {
        /// workout or diet
        kind: String,
        /// Plan week (default: latest)
        #[arg(long)]
        week: Option<u32>,
        /// Adjust the workout week for current recovery status
        #[arg(long)]
        adapt: bool,
    },
    /// List stored plans
    List {
        /// workout or diet
        kind: String,
    },
}

#[derive(Subcommand)]
pub enum LogAction {
    /// Log the day's workout, diet, energy and sleep
    Day {
        #[arg(long)]
        workout: bool,
        #[arg(long)]
        diet: bool,
        /// energized/normal/slightly_fatigued/very_tired
        #[arg(long)]
        energy: Option<String>,
        /// Hours slept
        #[arg(long)]
        sleep: Option<f64>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Log an exercise session
    Exercise {
        /// Exercise name or alias
        name: String,
        /// Sets planned
        #[arg(long)]
        planned: u32,
        /// Sets performed as REPSxKG:difficulty, comma separated
        #[arg(long)]
        sets: String,
        /// completed/partial/skipped (default: from sets)
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        week: Option<u32>,
        #[arg(long)]
        day: Option<u32>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Submit a week's progress
    Week {
        #[arg(long)]
        week: u32,
        /// Per-day WORKOUT:DIET, comma separated (e.g. completed:followed)
        #[arg(long)]
        days: String,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Log body circumferences in cm
    Measure {
        #[arg(long)]
        waist: Option<f64>,
        #[arg(long)]
        chest: Option<f64>,
        #[arg(long)]
        hips: Option<f64>,
        #[arg(long)]
        left_arm: Option<f64>,
        #[arg(long)]
        right_arm: Option<f64>,
        #[arg(long)]
        left_thigh: Option<f64>,
        #[arg(long)]
        right_thigh: Option<f64>,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (e.g. user.id, generator.command, alias.bp)
        key: String,
        /// Config value
        value: String,
    },
}
