use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_KILL_XP, FALLBACK_ENEMY_EMOJI, VISIBLE_LOG_ENTRIES};

/// An opponent as handed over by the encounter layer.
///
/// Stats are read-only for the duration of a battle; the fight tracks the
/// enemy's remaining hp in [`BattleState::enemy_hp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub hp: u32,
    /// HP at spawn. Zero in old snapshots, where `hp` stands in.
    #[serde(default)]
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(default)]
    pub xp: Option<u32>,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default = "default_emoji")]
    pub emoji: String,
}

fn default_emoji() -> String {
    FALLBACK_ENEMY_EMOJI.to_string()
}

impl Enemy {
    pub fn new(name: String, hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            name,
            description: String::new(),
            hp,
            max_hp: hp,
            attack,
            defense,
            xp: None,
            is_boss: false,
            emoji: default_emoji(),
        }
    }

    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = Some(xp);
        self
    }

    pub fn as_boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    /// XP granted on defeat. Missing or zero xp falls back to the default reward.
    pub fn reward_xp(&self) -> u32 {
        match self.xp {
            Some(xp) if xp > 0 => xp,
            _ => DEFAULT_KILL_XP,
        }
    }

    /// HP the enemy entered battle with.
    pub fn spawn_hp(&self) -> u32 {
        self.max_hp.max(self.hp)
    }
}

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    #[default]
    Player,
    Enemy,
}

impl Turn {
    pub fn opponent(self) -> Turn {
        match self {
            Turn::Player => Turn::Enemy,
            Turn::Enemy => Turn::Player,
        }
    }
}

/// Where a single battle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleOutcome {
    Ongoing,
    Won,
    Lost,
}

impl BattleOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, BattleOutcome::Ongoing)
    }
}

/// Per-battle mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    pub turn: Turn,
    pub player_hp: u32,
    pub enemy_hp: u32,
    #[serde(default)]
    pub log: Vec<String>,
}

impl BattleState {
    /// Opens a battle with the player to move.
    pub fn new(player_hp: u32, enemy: &Enemy) -> Self {
        Self {
            turn: Turn::Player,
            player_hp,
            enemy_hp: enemy.hp,
            log: vec![format!("Battle started against {}!", enemy.name)],
        }
    }

    /// Enemy defeat is checked first: a battle never ends in a loss while
    /// the enemy is already down.
    pub fn outcome(&self) -> BattleOutcome {
        if self.enemy_hp == 0 {
            BattleOutcome::Won
        } else if self.player_hp == 0 {
            BattleOutcome::Lost
        } else {
            BattleOutcome::Ongoing
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_terminal()
    }

    pub fn push_log(&mut self, message: String) {
        self.log.push(message);
    }

    /// The tail of the log that a screen shows.
    pub fn recent_log(&self) -> &[String] {
        let start = self.log.len().saturating_sub(VISIBLE_LOG_ENTRIES);
        &self.log[start..]
    }
}
