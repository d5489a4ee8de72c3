use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::character::Player;
use crate::combat::{BattleState, Enemy};
use crate::phases::Phase;
use crate::utils::persistence::merge_shallow;

/// Top-level mode the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Menu,
    Library,
    Dialogue,
    Battle,
    Victory,
    #[serde(rename = "gameover")]
    GameOver,
    #[serde(rename = "finalvictory")]
    FinalVictory,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Menu => "menu",
            Screen::Library => "library",
            Screen::Dialogue => "dialogue",
            Screen::Battle => "battle",
            Screen::Victory => "victory",
            Screen::GameOver => "gameover",
            Screen::FinalVictory => "finalvictory",
        };
        f.write_str(name)
    }
}

/// What the dialogue screen is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DialogueState {
    pub speaker: String,
    pub text: String,
    pub options: Vec<String>,
}

/// The whole session, persisted as one flat snapshot.
///
/// Only [`crate::core::session::SessionController`] mutates this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player: Player,
    pub current_phase: Option<Phase>,
    pub current_screen: Screen,
    pub current_enemy: Option<Enemy>,
    /// Present only while a battle is being fought.
    pub battle_state: Option<BattleState>,
    pub dialogue_state: DialogueState,
    /// Regular enemies defeated per phase; picks the next encounter.
    #[serde(default)]
    pub phase_progress: BTreeMap<Phase, u32>,
    /// Unix timestamp of the last save, 0 if never saved.
    #[serde(default)]
    pub last_save_time: i64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            player: Player::default(),
            current_phase: None,
            current_screen: Screen::Menu,
            current_enemy: None,
            battle_state: None,
            dialogue_state: DialogueState::default(),
            phase_progress: BTreeMap::new(),
            last_save_time: 0,
        }
    }
}

/// Why a stored snapshot could not be used.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Syntax(serde_json::Error),

    #[error("snapshot is not a JSON object")]
    NotAnObject,

    #[error("snapshot does not describe a game state: {0}")]
    Shape(serde_json::Error),
}

impl GameState {
    pub fn regulars_defeated(&self, phase: Phase) -> u32 {
        self.phase_progress.get(&phase).copied().unwrap_or(0)
    }

    pub fn all_fragments_collected(&self) -> bool {
        self.player.fragment_count() >= crate::core::constants::FRAGMENTS_REQUIRED
    }

    /// A painting opens once the previous phase's fragment is held.
    pub fn is_phase_unlocked(&self, phase: Phase) -> bool {
        phase
            .prerequisite()
            .map_or(true, |required| self.player.has_fragment(required))
    }

    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restores a snapshot by overlaying its top-level keys on the default
    /// state. Keys the snapshot lacks keep their default values.
    pub fn from_snapshot(raw: &str) -> Result<Self, SnapshotError> {
        let saved: serde_json::Value = serde_json::from_str(raw).map_err(SnapshotError::Syntax)?;
        let defaults =
            serde_json::to_value(GameState::default()).map_err(SnapshotError::Shape)?;
        let merged = merge_shallow(defaults, saved).ok_or(SnapshotError::NotAnObject)?;
        serde_json::from_value(merged).map_err(SnapshotError::Shape)
    }
}
