mod cli;
mod cmd;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, ConfigAction, LogAction, PlanAction, ProfileAction};
use std::process;
use tracing_subscriber::EnvFilter;

use fitplan::error::FitError;
use fitplan::models::measurement::Circumferences;
use fitplan::output;

fn command_name(c: &Commands) -> &'static str {
    match c {
        Commands::Init { .. } => "init",
        Commands::Profile { .. } => "profile",
        Commands::Plan { .. } => "plan",
        Commands::Log { .. } => "log",
        Commands::Overload { .. } => "overload",
        Commands::Measurements { .. } => "measurements",
        Commands::Habit { .. } => "habit",
        Commands::Risk => "risk",
        Commands::Forecast => "forecast",
        Commands::Recovery => "recovery",
        Commands::Status => "status",
        Commands::Config { .. } => "config",
        Commands::Completions { .. } => "completions",
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let session = || cmd::Session::open(cli.user.as_deref(), cli.date, cli.human);

    match cli.command {
        Commands::Init { skip } => cmd::init::run(skip),
        Commands::Profile { action } => match action {
            ProfileAction::Show => cmd::profile::run_show(&session()?),
            ProfileAction::Set {
                age,
                sex,
                height,
                weight,
                goal,
                target_weight,
                activity,
                experience,
                days,
                diet,
                allergies,
                injuries,
            } => cmd::profile::run_set(
                &session()?,
                cmd::profile::SetArgs {
                    age,
                    sex,
                    height,
                    weight,
                    goal,
                    target_weight,
                    activity,
                    experience,
                    days,
                    diet,
                    allergies,
                    injuries,
                },
            ),
        },
        Commands::Plan { action } => match action {
            PlanAction::Generate { kind, week } => cmd::plan::run_generate(&session()?, &kind, week),
            PlanAction::Show { kind, week, adapt } => {
                cmd::plan::run_show(&session()?, &kind, week, adapt)
            }
            PlanAction::List { kind } => cmd::plan::run_list(&session()?, &kind),
        },
        Commands::Log { action } => match action {
            LogAction::Day {
                workout,
                diet,
                energy,
                sleep,
                weight,
                note,
            } => cmd::log::run_day(
                &session()?,
                cmd::log::DayArgs {
                    workout,
                    diet,
                    energy,
                    sleep,
                    weight,
                    note,
                },
            ),
            LogAction::Exercise {
                name,
                planned,
                sets,
                status,
                week,
                day,
                note,
            } => cmd::log::run_exercise(
                &session()?,
                cmd::log::ExerciseArgs {
                    name,
                    planned,
                    sets,
                    status,
                    week,
                    day,
                    note,
                },
            ),
            LogAction::Week { week, days, weight } => {
                cmd::log::run_week(&session()?, week, &days, weight)
            }
            LogAction::Measure {
                waist,
                chest,
                hips,
                left_arm,
                right_arm,
                left_thigh,
                right_thigh,
                note,
            } => cmd::measure::run_log(
                &session()?,
                Circumferences {
                    waist_cm: waist,
                    chest_cm: chest,
                    hips_cm: hips,
                    left_arm_cm: left_arm,
                    right_arm_cm: right_arm,
                    left_thigh_cm: left_thigh,
                    right_thigh_cm: right_thigh,
                },
                note,
            ),
        },
        Commands::Overload { exercise, history } => {
            cmd::insights::run_overload(&session()?, &exercise, history)
        }
        Commands::Measurements {
            latest,
            compare,
            from,
            to,
        } => cmd::measure::run_show(&session()?, latest, compare, from, to),
        Commands::Habit { stats, week } => cmd::habit::run(&session()?, stats, week),
        Commands::Risk => cmd::insights::run_risk(&session()?),
        Commands::Forecast => cmd::insights::run_forecast(&session()?),
        Commands::Recovery => cmd::insights::run_recovery(&session()?),
        Commands::Status => cmd::status::run(&session()?),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(cli.human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "fitplan", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FITPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = command_name(&cli.command);

    if let Err(e) = run(cli) {
        let code = e
            .downcast_ref::<FitError>()
            .map_or("general_error", FitError::code);
        let err = output::error(command, code, &e.to_string());
        eprintln!("{}", err);
        process::exit(1);
    }
}
