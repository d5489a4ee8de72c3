//! Integration test: Session lifecycle
//!
//! Plays through the controller the way a frontend would: library,
//! dialogue, battles, rewards, and the victory screens.

use std::time::Duration;

use alexandria::character::Fragment;
use alexandria::combat::{BattleOutcome, Enemy, Turn};
use alexandria::config::Pacing;
use alexandria::narrative::OfflineNarrative;
use alexandria::phases::Phase;
use alexandria::utils::persistence::MemoryStore;
use alexandria::{GameConfig, Screen, SessionController, SessionEvent};

fn instant_session(seed: u64) -> SessionController {
    let config = GameConfig {
        pacing: Pacing::instant(),
        ..GameConfig::default()
    };
    SessionController::with_seed(config, Box::new(MemoryStore::new()), seed)
}

fn pushover(name: &str, xp: u32) -> Enemy {
    Enemy::new(name.to_string(), 1, 1, 0).with_xp(xp)
}

fn win_against(session: &mut SessionController, enemy: Enemy) {
    session.start_battle(enemy);
    assert!(session.choose_ability("logic").is_some());
    session.settle();
}

// =============================================================================
// Rewards
// =============================================================================

#[test]
fn test_boss_defeat_awards_fragment_and_victory() {
    let mut session = instant_session(1);
    session.new_game();
    assert!(session.enter_painting(Phase::Health).unwrap());
    session.drain_events();

    win_against(
        &mut session,
        pushover("Echo of Forgetting - Disease", 100).as_boss(),
    );

    assert_eq!(session.screen(), Screen::Victory);
    assert_eq!(
        session.state().player.fragments,
        vec![Fragment {
            id: Phase::Health,
            name: "Fragment of Health".to_string(),
            obtained: true,
        }]
    );

    let events = session.drain_events();
    assert!(events.contains(&SessionEvent::BattleEnded {
        outcome: BattleOutcome::Won
    }));
    assert!(events.contains(&SessionEvent::FragmentAwarded {
        phase: Phase::Health
    }));
    assert!(events.contains(&SessionEvent::LeveledUp {
        level: 2,
        max_hp: 140
    }));
}

#[test]
fn test_level_up_from_ninety_plus_fifteen() {
    let mut session = instant_session(2);
    session.start_phase(Phase::Health);

    win_against(&mut session, pushover("Symbolic Virus", 90));
    assert_eq!(session.state().player.level, 1);
    assert_eq!(session.state().player.xp, 90);

    win_against(&mut session, pushover("Chaotic Bacterium", 15));
    let player = &session.state().player;
    assert_eq!(player.xp, 105);
    assert_eq!(player.level, 2);
    assert_eq!(player.xp_to_next_level, 200);
    assert_eq!(player.max_hp, 140);
    assert!(player.hp <= 140);
}

#[test]
fn test_missing_xp_rewards_fifty() {
    let mut session = instant_session(3);
    session.start_phase(Phase::Art);
    win_against(&mut session, Enemy::new("Shade".to_string(), 1, 1, 0));
    assert_eq!(session.state().player.xp, 50);
    assert_eq!(session.screen(), Screen::Library);
}

#[test]
fn test_defeating_the_same_boss_twice_keeps_one_fragment() {
    let mut session = instant_session(4);
    session.start_phase(Phase::Health);
    win_against(&mut session, pushover("Echo", 100).as_boss());
    session.start_phase(Phase::Health);
    win_against(&mut session, pushover("Echo", 100).as_boss());

    assert_eq!(session.state().player.fragment_count(), 1);
    assert_eq!(session.screen(), Screen::Victory);
}

// =============================================================================
// Full Journey
// =============================================================================

#[test]
fn test_three_fragments_reach_final_victory() {
    let mut session = instant_session(5);
    session.new_game();

    for phase in Phase::all() {
        assert!(session.enter_painting(phase).unwrap(), "{} locked", phase);
        session.load_phase_intro(&OfflineNarrative);
        assert_eq!(session.screen(), Screen::Dialogue);

        win_against(&mut session, pushover("Echo", 100).as_boss());
        assert_eq!(session.screen(), Screen::Victory);
        session.continue_from_victory().unwrap();
    }

    assert_eq!(session.screen(), Screen::FinalVictory);
    assert!(session.state().all_fragments_collected());
    // Completed paintings cannot be re-entered
    assert!(!session.enter_painting(Phase::Health).unwrap());
}

#[test]
fn test_encounters_walk_the_roster() {
    let mut session = instant_session(6);
    session.new_game();
    session.enter_painting(Phase::Health).unwrap();

    let mut names = Vec::new();
    for _ in 0..3 {
        session.begin_encounter(&OfflineNarrative);
        let enemy = session.state().current_enemy.clone().unwrap();
        names.push(enemy.name.clone());
        // Swap in a pushover with the same identity to keep the test fast
        let mut weak = pushover(&enemy.name, enemy.reward_xp());
        weak.is_boss = enemy.is_boss;
        win_against(&mut session, weak);
        if session.screen() == Screen::Library {
            session.enter_painting(Phase::Health).unwrap();
        }
    }

    assert_eq!(
        names,
        vec![
            "Symbolic Virus",
            "Chaotic Bacterium",
            "Echo of Forgetting - Disease"
        ]
    );
    assert_eq!(session.screen(), Screen::Victory);
}

#[test]
fn test_defeat_then_continue_resumes_from_save() {
    let mut session = instant_session(7);
    session.new_game();
    session.enter_painting(Phase::Health).unwrap();

    session.start_battle(Enemy::new("Overwhelming".to_string(), 500, 300, 0));
    session.choose_ability("logic");
    session.settle();
    assert_eq!(session.screen(), Screen::GameOver);
    assert_eq!(session.state().player.hp, 0);

    assert!(session.continue_game().unwrap());
    assert_eq!(session.screen(), Screen::Library);
    assert_eq!(session.state().player.hp, 100);
    assert!(session.state().battle_state.is_none());
}

#[test]
fn test_battle_against_downed_enemy_concludes() {
    let mut session = instant_session(10);
    session.start_phase(Phase::Health);
    session.start_battle(Enemy::new("Husk".to_string(), 0, 5, 0).with_xp(20));
    assert!(!session.can_act());
    assert!(session.engine().has_pending());

    session.settle();
    assert_eq!(session.screen(), Screen::Library);
    assert_eq!(session.state().player.xp, 20);
    assert!(session.state().battle_state.is_none());

    let events = session.drain_events();
    assert!(events.contains(&SessionEvent::BattleStarted {
        enemy_name: "Husk".to_string(),
        enemy_hp: 0,
        is_boss: false,
    }));
    assert!(events.contains(&SessionEvent::BattleEnded {
        outcome: BattleOutcome::Won
    }));
}

#[test]
fn test_fighting_on_at_zero_hp_ends_in_game_over() {
    let mut session = instant_session(11);
    session.new_game();
    session.enter_painting(Phase::Health).unwrap();
    session.start_battle(Enemy::new("Overwhelming".to_string(), 500, 300, 0));
    session.choose_ability("logic");
    session.settle();
    assert_eq!(session.screen(), Screen::GameOver);

    // Walk back into a painting without reloading: hp is still 0
    session.change_screen(Screen::Library);
    session.drain_events();
    session.enter_painting(Phase::Health).unwrap();
    session.begin_encounter(&OfflineNarrative);
    assert_eq!(session.state().player.hp, 0);
    assert!(session.choose_ability("logic").is_none());

    session.advance(Duration::from_secs(60));
    assert_eq!(session.screen(), Screen::GameOver);
    assert!(session.drain_events().contains(&SessionEvent::BattleEnded {
        outcome: BattleOutcome::Lost
    }));
}

// =============================================================================
// Pacing
// =============================================================================

#[test]
fn test_real_time_session_needs_elapsed_time() {
    let mut session = SessionController::with_seed(
        GameConfig::default(),
        Box::new(MemoryStore::new()),
        8,
    );
    session.start_battle(Enemy::new("Living Bug".to_string(), 300, 6, 5));
    session.choose_ability("logic").unwrap();
    assert!(!session.can_act());

    session.advance(Duration::from_millis(2499));
    assert_eq!(
        session.state().battle_state.as_ref().unwrap().turn,
        Turn::Enemy
    );
    assert_eq!(session.state().player.hp, 100);

    session.advance(Duration::from_millis(1));
    assert!(session.state().player.hp < 100);

    session.advance(Duration::from_secs(1));
    assert!(session.can_act());
    assert_eq!(session.recent_log().len(), 3);
}

#[test]
fn test_settle_finishes_a_paced_exchange() {
    let mut session = SessionController::with_seed(
        GameConfig::default(),
        Box::new(MemoryStore::new()),
        9,
    );
    session.start_battle(Enemy::new("Living Bug".to_string(), 300, 6, 5));
    session.choose_ability("inspiration").unwrap();
    session.settle();

    assert!(session.can_act());
    let log = session.recent_log();
    assert_eq!(log[1], "The Apprentice used Inspiration!");
    assert!(log[2].starts_with("Living Bug attacked! Dealt "));
}
