use serde::{Deserialize, Serialize};

use crate::core::constants::{BASE_MAX_HP, DEFAULT_PLAYER_NAME, STARTING_LEVEL, XP_PER_LEVEL};
use crate::phases::Phase;

/// What an ability does when used in battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKind {
    Attack,
    Heal,
    /// Emits a message only; no numeric effect yet.
    Buff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AbilityKind,
    pub power: u32,
    pub description: String,
}

impl Ability {
    pub fn new(id: &str, name: &str, kind: AbilityKind, power: u32, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            power,
            description: description.to_string(),
        }
    }

    /// The three abilities every apprentice starts with.
    pub fn default_set() -> Vec<Ability> {
        vec![
            Ability::new(
                "logic",
                "Logic",
                AbilityKind::Attack,
                15,
                "An attack grounded in reason",
            ),
            Ability::new(
                "inspiration",
                "Inspiration",
                AbilityKind::Buff,
                10,
                "Strengthens you for a while",
            ),
            Ability::new("cure", "Cure", AbilityKind::Heal, 20, "Restores hit points"),
        ]
    }
}

/// Proof that a phase's boss was defeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub id: Phase,
    pub name: String,
    pub obtained: bool,
}

impl Fragment {
    pub fn for_phase(phase: Phase) -> Self {
        Self {
            id: phase,
            name: phase.fragment_name().to_string(),
            obtained: true,
        }
    }
}

/// The apprentice's persistent stats.
///
/// Missing keys in a restored snapshot fall back to the default player's
/// values field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Player {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub abilities: Vec<Ability>,
    pub fragments: Vec<Fragment>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_NAME.to_string())
    }
}

impl Player {
    pub fn new(name: String) -> Self {
        Self {
            name,
            hp: BASE_MAX_HP,
            max_hp: BASE_MAX_HP,
            level: STARTING_LEVEL,
            xp: 0,
            xp_to_next_level: XP_PER_LEVEL,
            abilities: Ability::default_set(),
            fragments: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn ability(&self, id: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id == id)
    }

    pub fn has_fragment(&self, phase: Phase) -> bool {
        self.fragments.iter().any(|f| f.id == phase)
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Sets hp, keeping it within `0..=max_hp`.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    pub fn hp_percent(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64 * 100.0
    }
}
