//! Game balance simulator for Monte Carlo analysis.
//!
//! Autoplays thousands of seeded sessions to see:
//! - How often a session reaches the final victory
//! - Which phase costs the most deaths
//! - What level the player finishes at
//!
//! The simulator drives [`crate::core::SessionController`] with instant
//! pacing, so results match real gameplay behavior.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{
    next_phase, pick_ability, play_session, run_simulation, run_simulation_with, RunStats,
};
