//! Alexandria - session core of a narrative turn-based RPG
//!
//! The player wanders the Library, steps into paintings (phases), and fights
//! the manifestations of forgetting in turn-based battles until the three
//! fragments are recovered. This crate holds the game state, the battle
//! engine, progression, and the session controller a frontend drives.

pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod error;
pub mod narrative;
pub mod phases;
pub mod simulator;
pub mod utils;

pub use config::{GameConfig, Pacing};
pub use crate::core::{GameState, Screen, SessionController, SessionEvent};
pub use error::{GameError, ServiceError};
