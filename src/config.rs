//! Runtime configuration.

use std::env;

use crate::core::constants::{
    ACTION_SETTLE_MS, BATTLE_END_DELAY_MS, DEFAULT_SAVE_KEY, ENEMY_TURN_DELAY_MS,
};

/// Delays between an action's resolution and its follow-up steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Resolution to turn hand-off / guard release
    pub action_settle_ms: u64,
    /// Turn hand-off to the enemy's counter-attack
    pub enemy_turn_delay_ms: u64,
    /// Knockout to the battle being concluded
    pub battle_end_delay_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            action_settle_ms: ACTION_SETTLE_MS,
            enemy_turn_delay_ms: ENEMY_TURN_DELAY_MS,
            battle_end_delay_ms: BATTLE_END_DELAY_MS,
        }
    }
}

impl Pacing {
    /// No pauses at all, for headless play and simulation.
    pub fn instant() -> Self {
        Self {
            action_settle_ms: 0,
            enemy_turn_delay_ms: 0,
            battle_end_delay_ms: 0,
        }
    }
}

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub pacing: Pacing,
    /// Base URL of the narrative service (e.g. `http://localhost:8001`).
    /// `None` keeps every collaborator call on its local fallback.
    pub backend_url: Option<String>,
    /// Key of the single snapshot entry in the save store.
    pub save_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pacing: Pacing::default(),
            backend_url: None,
            save_key: DEFAULT_SAVE_KEY.to_string(),
        }
    }
}

impl GameConfig {
    /// Reads overrides from the environment:
    ///
    /// - `ALEXANDRIA_BACKEND_URL`: narrative service base URL
    /// - `ALEXANDRIA_SAVE_KEY`: snapshot key
    /// - `ALEXANDRIA_INSTANT_PACING`: `1`/`true` disables battle pauses
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("ALEXANDRIA_BACKEND_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if !url.is_empty() {
                config.backend_url = Some(url);
            }
        }

        if let Some(key) = lookup("ALEXANDRIA_SAVE_KEY") {
            if !key.trim().is_empty() {
                config.save_key = key.trim().to_string();
            }
        }

        if let Some(flag) = lookup("ALEXANDRIA_INSTANT_PACING") {
            if matches!(flag.trim(), "1" | "true" | "yes") {
                config.pacing = Pacing::instant();
            }
        }

        config
    }
}
