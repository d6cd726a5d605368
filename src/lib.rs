//! Adaptive workout and diet planning with habit analytics.
//!
//! Pure calculators live in [`core`]; [`db`] persists profiles, logs,
//! habit scores and plans in SQLite.

pub mod core;
pub mod db;
pub mod error;
pub mod models;
pub mod output;
