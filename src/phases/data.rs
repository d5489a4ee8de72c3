//! Static phase catalogue: titles, fragments and encounter rosters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A themed chapter reached through one of the Library's paintings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Health,
    Programming,
    Art,
}

/// One enemy slot in a phase's roster, before enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncounterTemplate {
    pub enemy_type: &'static str,
    pub emoji: &'static str,
    pub is_boss: bool,
    pub xp: u32,
}

const HEALTH_ROSTER: [EncounterTemplate; 3] = [
    EncounterTemplate {
        enemy_type: "Symbolic Virus",
        emoji: "🦠",
        is_boss: false,
        xp: 30,
    },
    EncounterTemplate {
        enemy_type: "Chaotic Bacterium",
        emoji: "🧬",
        is_boss: false,
        xp: 35,
    },
    EncounterTemplate {
        enemy_type: "Echo of Forgetting - Disease",
        emoji: "💀",
        is_boss: true,
        xp: 100,
    },
];

const PROGRAMMING_ROSTER: [EncounterTemplate; 3] = [
    EncounterTemplate {
        enemy_type: "Living Bug",
        emoji: "🐛",
        is_boss: false,
        xp: 35,
    },
    EncounterTemplate {
        enemy_type: "Corrupted Algorithm",
        emoji: "⚙️",
        is_boss: false,
        xp: 40,
    },
    EncounterTemplate {
        enemy_type: "Echo of Forgetting - Corruption",
        emoji: "🌀",
        is_boss: true,
        xp: 120,
    },
];

const ART_ROSTER: [EncounterTemplate; 3] = [
    EncounterTemplate {
        enemy_type: "Shadow of a Forgotten Artist",
        emoji: "👤",
        is_boss: false,
        xp: 40,
    },
    EncounterTemplate {
        enemy_type: "Destructive Brushstroke",
        emoji: "🖌️",
        is_boss: false,
        xp: 45,
    },
    EncounterTemplate {
        enemy_type: "Echo of Forgetting - Vanity",
        emoji: "🎭",
        is_boss: true,
        xp: 150,
    },
];

impl Phase {
    /// Library order, which is also unlock order.
    pub fn all() -> [Phase; 3] {
        [Phase::Health, Phase::Programming, Phase::Art]
    }

    pub fn id(self) -> &'static str {
        match self {
            Phase::Health => "health",
            Phase::Programming => "programming",
            Phase::Art => "art",
        }
    }

    pub fn from_id(id: &str) -> Option<Phase> {
        Phase::all().into_iter().find(|p| p.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            Phase::Health => "The Labyrinth of Health",
            Phase::Programming => "The Digital Realm",
            Phase::Art => "The World of Colors",
        }
    }

    pub fn painting_name(self) -> &'static str {
        match self {
            Phase::Health => "The Painting of Health",
            Phase::Programming => "The Painting of Programming",
            Phase::Art => "The Painting of Art",
        }
    }

    pub fn fragment_name(self) -> &'static str {
        match self {
            Phase::Health => "Fragment of Health",
            Phase::Programming => "Fragment of Programming",
            Phase::Art => "Fragment of Art",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Phase::Health => "🩺",
            Phase::Programming => "💻",
            Phase::Art => "🎨",
        }
    }

    /// The phase whose fragment opens this one's painting.
    pub fn prerequisite(self) -> Option<Phase> {
        match self {
            Phase::Health => None,
            Phase::Programming => Some(Phase::Health),
            Phase::Art => Some(Phase::Programming),
        }
    }

    /// Enemies in the order they are met; the boss is always last.
    pub fn roster(self) -> &'static [EncounterTemplate] {
        match self {
            Phase::Health => &HEALTH_ROSTER,
            Phase::Programming => &PROGRAMMING_ROSTER,
            Phase::Art => &ART_ROSTER,
        }
    }

    /// Roster entry after `defeated` regular enemies. Past the regulars this
    /// is always the boss.
    pub fn encounter(self, defeated: u32) -> EncounterTemplate {
        let roster = self.roster();
        let index = (defeated as usize).min(roster.len() - 1);
        roster[index]
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
