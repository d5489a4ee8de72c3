//! Integration test: Battle flow
//!
//! Drives the battle engine step by step: turn alternation, the resolution
//! guard, damage and heal bounds, and termination.

use alexandria::character::{Ability, AbilityKind, Player};
use alexandria::combat::{
    resolve_player_action, ActionEffect, BattleEngine, BattleOutcome, BattleState, Enemy,
    FollowUp, Turn,
};
use alexandria::config::Pacing;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn logic() -> Ability {
    Ability::new("logic", "Logic", AbilityKind::Attack, 15, "")
}

fn cure() -> Ability {
    Ability::new("cure", "Cure", AbilityKind::Heal, 20, "")
}

fn sturdy_enemy() -> Enemy {
    Enemy::new("Corrupted Algorithm".to_string(), 400, 8, 5)
}

/// Pops and runs the next follow-up step, returning it.
fn step(
    engine: &mut BattleEngine,
    battle: &mut BattleState,
    enemy: &Enemy,
    rng: &mut ChaCha8Rng,
) -> Option<FollowUp> {
    let next = engine.pop_due(None)?;
    match next {
        FollowUp::SettleAction { actor } => {
            engine.settle_action(battle, actor);
        }
        FollowUp::EnemyTurn => {
            engine.run_enemy_turn(battle, enemy, rng);
        }
        FollowUp::Conclude(_) => engine.reset(),
    }
    Some(next)
}

// =============================================================================
// Turn Order Tests
// =============================================================================

#[test]
fn test_turns_alternate_on_non_lethal_exchanges() {
    let enemy = sturdy_enemy();
    let player = Player::default();
    let mut battle = BattleState::new(player.hp, &enemy);
    let mut engine = BattleEngine::new(Pacing::default());
    let mut rng = create_test_rng(1);

    for round in 0..3 {
        assert_eq!(battle.turn, Turn::Player, "round {}", round);
        assert!(engine
            .submit_player_action(&mut battle, &logic(), &player, &enemy, &mut rng)
            .is_some());

        assert_eq!(
            step(&mut engine, &mut battle, &enemy, &mut rng),
            Some(FollowUp::SettleAction { actor: Turn::Player })
        );
        assert_eq!(battle.turn, Turn::Enemy);

        assert_eq!(
            step(&mut engine, &mut battle, &enemy, &mut rng),
            Some(FollowUp::EnemyTurn)
        );
        assert_eq!(
            step(&mut engine, &mut battle, &enemy, &mut rng),
            Some(FollowUp::SettleAction { actor: Turn::Enemy })
        );
        assert!(!engine.has_pending());
    }

    assert_eq!(battle.turn, Turn::Player);
    // Opening line plus one per action
    assert_eq!(battle.log.len(), 1 + 3 * 2);
}

#[test]
fn test_real_time_pacing_offsets() {
    let enemy = sturdy_enemy();
    let player = Player::default();
    let mut battle = BattleState::new(player.hp, &enemy);
    let mut engine = BattleEngine::new(Pacing::default());
    let mut rng = create_test_rng(2);

    engine.submit_player_action(&mut battle, &logic(), &player, &enemy, &mut rng);
    step(&mut engine, &mut battle, &enemy, &mut rng);
    assert_eq!(engine.now_ms(), 1000);

    step(&mut engine, &mut battle, &enemy, &mut rng);
    assert_eq!(engine.now_ms(), 2500);

    step(&mut engine, &mut battle, &enemy, &mut rng);
    assert_eq!(engine.now_ms(), 3500);
}

#[test]
fn test_no_action_while_resolving() {
    let enemy = sturdy_enemy();
    let player = Player::default();
    let mut battle = BattleState::new(player.hp, &enemy);
    let mut engine = BattleEngine::new(Pacing::default());
    let mut rng = create_test_rng(3);

    engine.submit_player_action(&mut battle, &logic(), &player, &enemy, &mut rng);
    let snapshot = battle.clone();

    assert!(engine
        .submit_player_action(&mut battle, &logic(), &player, &enemy, &mut rng)
        .is_none());
    assert!(engine.run_enemy_turn(&mut battle, &enemy, &mut rng).is_none());
    assert_eq!(battle, snapshot);
}

// =============================================================================
// Termination Tests
// =============================================================================

#[test]
fn test_killing_blow_keeps_turn_and_ends_battle() {
    let enemy = sturdy_enemy();
    let player = Player::default();
    let mut battle = BattleState::new(player.hp, &enemy);
    battle.enemy_hp = 3;
    let mut engine = BattleEngine::new(Pacing::default());
    let mut rng = create_test_rng(4);

    engine.submit_player_action(&mut battle, &logic(), &player, &enemy, &mut rng);
    assert_eq!(battle.outcome(), BattleOutcome::Won);

    step(&mut engine, &mut battle, &enemy, &mut rng);
    assert_eq!(battle.turn, Turn::Player);
    assert_eq!(
        engine.pop_due(None),
        Some(FollowUp::Conclude(BattleOutcome::Won))
    );

    // Nothing resolves once decided
    let log_len = battle.log.len();
    assert!(engine
        .submit_player_action(&mut battle, &logic(), &player, &enemy, &mut rng)
        .is_none());
    battle.turn = Turn::Enemy;
    assert!(engine.run_enemy_turn(&mut battle, &enemy, &mut rng).is_none());
    assert_eq!(battle.log.len(), log_len);
    assert_eq!(battle.enemy_hp, 0);
}

#[test]
fn test_enemy_knockout_is_a_loss() {
    let enemy = Enemy::new("Destructive Brushstroke".to_string(), 400, 50, 5);
    let player = Player::default();
    let mut battle = BattleState::new(10, &enemy);
    battle.turn = Turn::Enemy;
    let mut engine = BattleEngine::new(Pacing::instant());
    let mut rng = create_test_rng(5);

    let result = engine.run_enemy_turn(&mut battle, &enemy, &mut rng).unwrap();
    assert_eq!(result.new_player_hp, 0);
    assert_eq!(battle.outcome(), BattleOutcome::Lost);

    step(&mut engine, &mut battle, &enemy, &mut rng);
    assert_eq!(battle.turn, Turn::Enemy);
    assert_eq!(
        engine.pop_due(None),
        Some(FollowUp::Conclude(BattleOutcome::Lost))
    );
    assert!(engine
        .submit_player_action(&mut battle, &logic(), &player, &enemy, &mut rng)
        .is_none());
}

// =============================================================================
// Formula Bounds
// =============================================================================

#[test]
fn test_attack_always_lands_and_never_overkills() {
    let player = Player::default();
    for seed in 0..200u64 {
        let mut rng = create_test_rng(seed);
        let defense = (seed % 40) as u32;
        let enemy = Enemy::new("Living Bug".to_string(), 60, 8, defense);
        let mut battle = BattleState::new(100, &enemy);
        battle.enemy_hp = 1 + (seed % 60) as u32;
        let before = battle.enemy_hp;

        let result = resolve_player_action(&mut battle, &logic(), &player, &enemy, &mut rng);

        assert!(battle.enemy_hp < before, "seed {}", seed);
        match result.effect {
            ActionEffect::Damage(damage) => {
                assert!(damage >= 1);
                assert_eq!(battle.enemy_hp, before.saturating_sub(damage));
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }
}

#[test]
fn test_heal_is_bounded_by_max_hp() {
    let player = Player::default();
    let enemy = sturdy_enemy();
    for hp in [1u32, 50, 79, 80, 81, 99, 100] {
        let mut rng = create_test_rng(hp as u64);
        let mut battle = BattleState::new(hp, &enemy);

        let result = resolve_player_action(&mut battle, &cure(), &player, &enemy, &mut rng);

        assert!(battle.player_hp >= hp);
        assert!(battle.player_hp <= player.max_hp);
        assert_eq!(battle.player_hp, (hp + 20).min(100));
        assert_eq!(result.effect, ActionEffect::Heal(battle.player_hp - hp));
        assert_eq!(
            battle.log.last().unwrap(),
            &format!(
                "{} used Cure! Recovered {} HP!",
                player.name,
                battle.player_hp - hp
            )
        );
    }
}
