//! Damage and heal formulas plus the per-action resolution steps.
//!
//! These functions commit numbers and log lines to a [`BattleState`] but never
//! decide *whether* an action may run; that gate lives in
//! [`super::engine::BattleEngine`].

use rand::Rng;

use super::types::{BattleState, Enemy, Turn};
use crate::character::{Ability, AbilityKind, Player};
use crate::core::constants::{ENEMY_ATTACK_VARIANCE, MIN_DAMAGE, PLAYER_ATTACK_VARIANCE};

/// Numeric effect of one resolved action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    Damage(u32),
    Heal(u32),
    Buff,
}

/// What a single resolved action did to the battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub actor: Turn,
    pub effect: ActionEffect,
    pub new_player_hp: u32,
    pub new_enemy_hp: u32,
    pub message: String,
}

/// `max(1, power + roll(-2..=2) - floor(defense / 2))`
pub fn player_attack_damage(power: u32, defense: u32, rng: &mut impl Rng) -> u32 {
    let roll = rng.gen_range(-PLAYER_ATTACK_VARIANCE..=PLAYER_ATTACK_VARIANCE);
    let raw = power as i64 + roll - (defense / 2) as i64;
    clamp_damage(raw)
}

/// `max(1, attack + roll(-3..=3))`
pub fn enemy_attack_damage(attack: u32, rng: &mut impl Rng) -> u32 {
    let roll = rng.gen_range(-ENEMY_ATTACK_VARIANCE..=ENEMY_ATTACK_VARIANCE);
    clamp_damage(attack as i64 + roll)
}

fn clamp_damage(raw: i64) -> u32 {
    raw.clamp(MIN_DAMAGE as i64, u32::MAX as i64) as u32
}

/// HP actually restored by a heal of `power`, never past `max_hp`.
pub fn heal_amount(power: u32, current_hp: u32, max_hp: u32) -> u32 {
    power.min(max_hp.saturating_sub(current_hp))
}

/// Applies the player's chosen ability and appends one log entry.
///
/// Expects `battle.turn == Turn::Player` with both sides alive. The turn is
/// left untouched; see [`hand_off_turn`].
pub fn resolve_player_action(
    battle: &mut BattleState,
    ability: &Ability,
    player: &Player,
    enemy: &Enemy,
    rng: &mut impl Rng,
) -> ActionResult {
    let (effect, message) = match ability.kind {
        AbilityKind::Attack => {
            let damage = player_attack_damage(ability.power, enemy.defense, rng);
            battle.enemy_hp = battle.enemy_hp.saturating_sub(damage);
            (
                ActionEffect::Damage(damage),
                format!(
                    "{} used {}! Dealt {} damage!",
                    player.name, ability.name, damage
                ),
            )
        }
        AbilityKind::Heal => {
            let healed = heal_amount(ability.power, battle.player_hp, player.max_hp);
            battle.player_hp = (battle.player_hp + healed).min(player.max_hp);
            (
                ActionEffect::Heal(healed),
                format!("{} used {}! Recovered {} HP!", player.name, ability.name, healed),
            )
        }
        AbilityKind::Buff => (
            ActionEffect::Buff,
            format!("{} used {}!", player.name, ability.name),
        ),
    };

    battle.push_log(message.clone());

    ActionResult {
        actor: Turn::Player,
        effect,
        new_player_hp: battle.player_hp,
        new_enemy_hp: battle.enemy_hp,
        message,
    }
}

/// Applies the enemy's counter-attack and appends one log entry.
///
/// Expects `battle.turn == Turn::Enemy` with both sides alive.
pub fn resolve_enemy_turn(battle: &mut BattleState, enemy: &Enemy, rng: &mut impl Rng) -> ActionResult {
    let damage = enemy_attack_damage(enemy.attack, rng);
    battle.player_hp = battle.player_hp.saturating_sub(damage);

    let message = format!("{} attacked! Dealt {} damage!", enemy.name, damage);
    battle.push_log(message.clone());

    ActionResult {
        actor: Turn::Enemy,
        effect: ActionEffect::Damage(damage),
        new_player_hp: battle.player_hp,
        new_enemy_hp: battle.enemy_hp,
        message,
    }
}

/// Passes the turn to `actor`'s opponent if the opponent is still standing.
///
/// Returns true if the turn changed. A knocked-out opponent freezes the turn
/// so the battle can end on the finishing blow.
pub fn hand_off_turn(battle: &mut BattleState, actor: Turn) -> bool {
    let opponent_hp = match actor {
        Turn::Player => battle.enemy_hp,
        Turn::Enemy => battle.player_hp,
    };
    if opponent_hp > 0 {
        battle.turn = actor.opponent();
        true
    } else {
        false
    }
}
