//! Optional external plan generator.
//!
//! A generator receives the user's context document and returns a JSON
//! payload. Any failure here is reported as `FitError::UpstreamGeneration`
//! and the caller falls back to the template path.

use regex::Regex;
use serde::Deserialize;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::debug;
use wait_timeout::ChildExt;

use crate::error::FitError;
use crate::models::config::GeneratorSettings;
use crate::models::plan::{Meal, PlanKind, WorkoutDay, day_name};

pub struct GenerationRequest {
    pub kind: PlanKind,
    pub week_number: u32,
    pub context: serde_json::Value,
}

const WORKOUT_SCHEMA: &str = r#"{
  "week_summary": "string",
  "weekly_schedule": [{"day": 1, "day_name": "Monday", "type": "string", "rest_day": false,
    "exercises": [{"name": "string", "sets": 3, "reps": "8-10", "rest_seconds": 90,
      "guidance": "string", "intensity_level": "Light|Moderate|High"}]}],
  "progression_notes": "string",
  "recovery_tips": "string",
  "motivation_message": "string"
}"#;

const DIET_SCHEMA: &str = r#"{
  "week_summary": "string",
  "daily_meals": [{"meal_number": 1, "meal_name": "Breakfast", "time_suggestion": "7:00 AM",
    "description": "string", "estimated_calories": 500,
    "macros": {"protein_g": 30, "carbs_g": 50, "fat_g": 15},
    "ingredients": ["string"], "preparation_tips": "string", "why_this_meal": "string"}],
  "hydration_goal": "string",
  "supplement_suggestions": "string",
  "meal_prep_tips": "string"
}"#;

impl GenerationRequest {
    pub fn prompt(&self) -> String {
        let (task, schema) = match self.kind {
            PlanKind::Workout => (
                "a 7-day workout plan that respects every injury listed",
                WORKOUT_SCHEMA,
            ),
            PlanKind::Diet => (
                "a daily meal plan that respects every allergy and dietary preference listed",
                DIET_SCHEMA,
            ),
        };
        let context =
            serde_json::to_string_pretty(&self.context).unwrap_or_else(|_| "{}".to_string());
        format!(
            "Create {task} for week {week}.\n\
             Respond with one JSON object only, matching this schema:\n{schema}\n\n\
             User context:\n{context}\n",
            week = self.week_number,
        )
    }
}

pub trait PlanGenerator {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Raw payload text for a request.
    fn generate(&self, request: &GenerationRequest) -> Result<String, FitError>;
}

#[derive(Debug, Deserialize)]
pub struct WorkoutPayload {
    pub week_summary: String,
    pub weekly_schedule: Vec<WorkoutDay>,
    #[serde(default)]
    pub progression_notes: Option<String>,
    #[serde(default)]
    pub recovery_tips: Option<String>,
    #[serde(default)]
    pub motivation_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DietPayload {
    pub week_summary: String,
    pub daily_meals: Vec<Meal>,
    #[serde(default)]
    pub hydration_goal: Option<String>,
    #[serde(default)]
    pub supplement_suggestions: Option<String>,
    #[serde(default)]
    pub meal_prep_tips: Option<String>,
}

fn malformed(msg: impl Into<String>) -> FitError {
    FitError::UpstreamGeneration(msg.into())
}

/// Strip Markdown code fences and cut the outermost `{...}` out of
/// free-form generator output.
pub fn extract_json(raw: &str) -> Result<String, FitError> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let re = Regex::new(r"(?s)\{.*\}").map_err(|e| malformed(e.to_string()))?;
    re.find(&cleaned)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| malformed("no JSON object in generator output"))
}

/// Parse and check a workout payload: exactly one entry per day 1..=7,
/// returned in calendar order.
pub fn parse_workout(raw: &str) -> Result<WorkoutPayload, FitError> {
    let json = extract_json(raw)?;
    let mut payload: WorkoutPayload =
        serde_json::from_str(&json).map_err(|e| malformed(format!("invalid workout payload: {e}")))?;
    payload.weekly_schedule.sort_by_key(|d| d.day);
    let days: Vec<u32> = payload.weekly_schedule.iter().map(|d| d.day).collect();
    if days != (1..=7).collect::<Vec<u32>>() {
        return Err(malformed(format!(
            "workout payload must cover days 1-7 once each (got {:?})",
            days
        )));
    }
    for day in payload.weekly_schedule.iter_mut() {
        day.day_name = day_name(day.day).to_string();
        if !day.rest_day && day.exercises.is_empty() {
            return Err(malformed(format!("training day {} has no exercises", day.day)));
        }
    }
    Ok(payload)
}

pub fn parse_diet(raw: &str) -> Result<DietPayload, FitError> {
    let json = extract_json(raw)?;
    let payload: DietPayload =
        serde_json::from_str(&json).map_err(|e| malformed(format!("invalid diet payload: {e}")))?;
    if payload.daily_meals.is_empty() {
        return Err(malformed("diet payload has no meals"));
    }
    Ok(payload)
}

/// Runs an external command: prompt on stdin, payload on stdout.
/// The child is killed once the timeout expires.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// None when no command is configured.
    pub fn from_settings(settings: &GeneratorSettings) -> Option<Self> {
        let program = settings.command.as_deref()?.trim();
        if program.is_empty() {
            return None;
        }
        Some(Self::new(
            program,
            settings.args.clone(),
            Duration::from_secs(settings.timeout_secs.max(1)),
        ))
    }
}

impl PlanGenerator for CommandGenerator {
    fn name(&self) -> &str {
        &self.program
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String, FitError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| malformed(format!("failed to start {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            let prompt = request.prompt();
            thread::spawn(move || {
                let _ = stdin.write_all(prompt.as_bytes());
            });
        }

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| malformed("generator stdout unavailable"))?;
        let reader = thread::spawn(move || {
            let mut buf = String::new();
            stdout.read_to_string(&mut buf).map(|_| buf)
        });

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(malformed(format!(
                    "generator timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
            Err(e) => return Err(malformed(e.to_string())),
        };
        if !status.success() {
            return Err(malformed(format!("generator exited with {}", status)));
        }

        let output = reader
            .join()
            .map_err(|_| malformed("generator output reader panicked"))?
            .map_err(|e| malformed(e.to_string()))?;
        debug!(generator = %self.program, bytes = output.len(), "generator returned");
        Ok(output)
    }
}
