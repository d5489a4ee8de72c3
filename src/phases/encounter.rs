//! Turning roster templates and narrative responses into battle-ready data.
//!
//! Collaborator failures never block play: each request has a deterministic
//! local fallback.

use tracing::{debug, warn};

use super::data::{EncounterTemplate, Phase};
use crate::combat::Enemy;
use crate::core::constants::{
    FALLBACK_BOSS_ATTACK, FALLBACK_BOSS_DEFENSE, FALLBACK_BOSS_HP, FALLBACK_ENEMY_ATTACK,
    FALLBACK_ENEMY_DEFENSE, FALLBACK_ENEMY_DESCRIPTION, FALLBACK_ENEMY_HP, GUARDIAN_NAME,
};
use crate::error::ServiceError;
use crate::narrative::{DialogueRequest, EnemyProfile, EnemyRequest, NarrativeService};

/// Stats used when the enemy service cannot be reached.
pub fn fallback_profile(template: &EncounterTemplate) -> EnemyProfile {
    let (hp, attack, defense) = if template.is_boss {
        (FALLBACK_BOSS_HP, FALLBACK_BOSS_ATTACK, FALLBACK_BOSS_DEFENSE)
    } else {
        (FALLBACK_ENEMY_HP, FALLBACK_ENEMY_ATTACK, FALLBACK_ENEMY_DEFENSE)
    };

    EnemyProfile {
        name: template.enemy_type.to_string(),
        description: FALLBACK_ENEMY_DESCRIPTION.to_string(),
        hp,
        attack,
        defense,
    }
}

/// Combines a roster slot with its generated profile. The template keeps
/// authority over emoji, boss flag and xp reward.
pub fn spawn_enemy(template: &EncounterTemplate, profile: EnemyProfile) -> Enemy {
    Enemy {
        name: profile.name,
        description: profile.description,
        hp: profile.hp,
        max_hp: profile.hp,
        attack: profile.attack,
        defense: profile.defense,
        xp: Some(template.xp),
        is_boss: template.is_boss,
        emoji: template.emoji.to_string(),
    }
}

/// Asks the service for the enemy, falling back to local stats on failure.
pub fn fetch_enemy(
    service: &dyn NarrativeService,
    template: &EncounterTemplate,
    phase: Phase,
) -> Enemy {
    let request = EnemyRequest {
        enemy_type: template.enemy_type.to_string(),
        phase: phase.id().to_string(),
    };

    let profile = match service.generate_enemy(&request) {
        // A zero-hp enemy would end the battle before it began
        Ok(profile) if profile.hp > 0 => profile,
        Ok(_) => {
            warn!(enemy_type = template.enemy_type, "enemy service returned 0 hp, using fallback");
            fallback_profile(template)
        }
        Err(ServiceError::Unavailable) => {
            debug!(enemy_type = template.enemy_type, "no enemy service, using fallback");
            fallback_profile(template)
        }
        Err(e) => {
            warn!(enemy_type = template.enemy_type, error = %e, "enemy service failed, using fallback");
            fallback_profile(template)
        }
    };

    spawn_enemy(template, profile)
}

/// What the guardian is asked to say on entering a phase.
pub fn intro_request(phase: Phase) -> DialogueRequest {
    DialogueRequest {
        context: format!(
            "The player has just entered the phase \"{}\". Welcome them and explain the challenge that awaits.",
            phase.title()
        ),
        character_name: GUARDIAN_NAME.to_string(),
        phase: phase.title().to_string(),
    }
}

pub fn fallback_intro(phase: Phase) -> String {
    format!(
        "Welcome to {}. Prepare to face the manifestations of forgetting.",
        phase.title()
    )
}

/// Asks the service for the phase intro, falling back to a generic welcome.
pub fn fetch_intro(service: &dyn NarrativeService, phase: Phase) -> String {
    match service.generate_dialogue(&intro_request(phase)) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => fallback_intro(phase),
        Err(ServiceError::Unavailable) => fallback_intro(phase),
        Err(e) => {
            warn!(phase = %phase, error = %e, "dialogue service failed, using fallback");
            fallback_intro(phase)
        }
    }
}
