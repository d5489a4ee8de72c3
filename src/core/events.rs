//! Notifications emitted by the session for the presentation layer.
//!
//! The session pushes these as it mutates state; a frontend drains them
//! with [`crate::core::session::SessionController::drain_events`] and
//! decides what to animate or print.

use crate::combat::{BattleOutcome, Turn};
use crate::core::game_state::Screen;
use crate::phases::Phase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    // ── Navigation ──────────────────────────────────────────────
    /// The visible screen changed.
    ScreenChanged { from: Screen, to: Screen },

    /// A phase was entered from the library.
    PhaseStarted { phase: Phase },

    /// New text is on the dialogue screen.
    DialogueShown { speaker: String, text: String },

    // ── Battle ──────────────────────────────────────────────────
    /// `enemy_hp` is the enemy's hp at spawn.
    BattleStarted {
        enemy_name: String,
        enemy_hp: u32,
        is_boss: bool,
    },

    /// An action resolved; `message` is the log line it appended.
    ActionResolved {
        actor: Turn,
        player_hp: u32,
        enemy_hp: u32,
        message: String,
    },

    TurnChanged { turn: Turn },

    BattleEnded { outcome: BattleOutcome },

    // ── Progression ─────────────────────────────────────────────
    XpGained { amount: u32 },

    LeveledUp { level: u32, max_hp: u32 },

    FragmentAwarded { phase: Phase },

    // ── Persistence ─────────────────────────────────────────────
    GameSaved,

    GameLoaded,

    /// A stored snapshot could not be read and was ignored.
    SnapshotDiscarded { reason: String },
}
