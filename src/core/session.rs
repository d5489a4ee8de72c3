//! The session controller: sole owner and mutator of [`GameState`].
//!
//! Player intents (choose an ability, enter a painting, save) come in as
//! method calls. Battle pacing is driven by [`SessionController::advance`]
//! for real-time frontends or [`SessionController::settle`] for instant
//! play. Everything the presentation layer may want to react to is queued
//! as a [`SessionEvent`].

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::constants::GUARDIAN_NAME;
use super::events::SessionEvent;
use super::game_state::{DialogueState, GameState, Screen};
use crate::character::{award_fragment, gain_xp};
use crate::combat::{ActionResult, BattleEngine, BattleOutcome, BattleState, Enemy, FollowUp};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::narrative::NarrativeService;
use crate::phases::{fetch_enemy, fetch_intro, Phase};
use crate::utils::persistence::SaveStore;

pub struct SessionController {
    state: GameState,
    engine: BattleEngine,
    rng: StdRng,
    store: Box<dyn SaveStore>,
    config: GameConfig,
    events: Vec<SessionEvent>,
}

impl SessionController {
    pub fn new(config: GameConfig, store: Box<dyn SaveStore>) -> Self {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Deterministic session for tests and simulation.
    pub fn with_seed(config: GameConfig, store: Box<dyn SaveStore>, seed: u64) -> Self {
        Self::with_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, store: Box<dyn SaveStore>, rng: StdRng) -> Self {
        Self {
            state: GameState::default(),
            engine: BattleEngine::new(config.pacing),
            rng,
            store,
            config,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    pub fn store(&self) -> &dyn SaveStore {
        self.store.as_ref()
    }

    pub fn screen(&self) -> Screen {
        self.state.current_screen
    }

    /// Takes every notification queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Navigation ──────────────────────────────────────────────

    pub fn change_screen(&mut self, screen: Screen) {
        let from = self.state.current_screen;
        if from == screen {
            return;
        }
        self.state.current_screen = screen;
        debug!(%from, to = %screen, "screen changed");
        self.events.push(SessionEvent::ScreenChanged { from, to: screen });
    }

    pub fn start_phase(&mut self, phase: Phase) {
        self.state.current_phase = Some(phase);
        info!(%phase, "phase started");
        self.events.push(SessionEvent::PhaseStarted { phase });
        self.change_screen(Screen::Dialogue);
    }

    pub fn is_unlocked(&self, phase: Phase) -> bool {
        self.state.is_phase_unlocked(phase)
    }

    /// Enters a painting from the library. Saves first, then starts the
    /// phase. Locked or already completed paintings are ignored and
    /// `Ok(false)` is returned.
    pub fn enter_painting(&mut self, phase: Phase) -> Result<bool, GameError> {
        if !self.is_unlocked(phase) {
            debug!(%phase, "painting is locked");
            return Ok(false);
        }
        if self.state.player.has_fragment(phase) {
            debug!(%phase, "painting already completed");
            return Ok(false);
        }

        info!(painting = phase.painting_name(), "entering painting");
        self.save_game()?;
        self.start_phase(phase);
        Ok(true)
    }

    pub fn show_dialogue(&mut self, speaker: &str, text: &str, options: Vec<String>) {
        self.state.dialogue_state = DialogueState {
            speaker: speaker.to_string(),
            text: text.to_string(),
            options,
        };
        self.events.push(SessionEvent::DialogueShown {
            speaker: speaker.to_string(),
            text: text.to_string(),
        });
        self.change_screen(Screen::Dialogue);
    }

    /// Shows the guardian's welcome for the current phase.
    pub fn load_phase_intro(&mut self, service: &dyn NarrativeService) {
        let Some(phase) = self.state.current_phase else {
            debug!("no current phase, skipping intro");
            return;
        };

        let text = fetch_intro(service, phase);
        let next = phase.encounter(self.state.regulars_defeated(phase));
        let options = vec![
            format!("Confront the {}", next.enemy_type),
            "Return to the Library".to_string(),
        ];
        self.show_dialogue(GUARDIAN_NAME, &text, options);
    }

    pub fn skip_dialogue(&mut self) {
        self.change_screen(Screen::Library);
    }

    /// Spawns the next enemy of the current phase and starts the battle.
    pub fn begin_encounter(&mut self, service: &dyn NarrativeService) {
        let Some(phase) = self.state.current_phase else {
            debug!("no current phase, cannot begin encounter");
            return;
        };

        let template = phase.encounter(self.state.regulars_defeated(phase));
        let enemy = fetch_enemy(service, &template, phase);
        self.start_battle(enemy);
    }

    // ── Battle ──────────────────────────────────────────────────

    /// Opens a battle from the player's current hp with the player to move.
    ///
    /// A battle that is decided from the start (either side at 0 hp) gets
    /// its conclusion queued right away.
    pub fn start_battle(&mut self, enemy: Enemy) {
        let battle = BattleState::new(self.state.player.hp, &enemy);
        self.engine.resume(&battle);

        info!(enemy = %enemy.name, hp = enemy.hp, boss = enemy.is_boss, "battle started");
        self.events.push(SessionEvent::BattleStarted {
            enemy_name: enemy.name.clone(),
            enemy_hp: enemy.spawn_hp(),
            is_boss: enemy.is_boss,
        });

        self.state.battle_state = Some(battle);
        self.state.current_enemy = Some(enemy);
        self.change_screen(Screen::Battle);
    }

    /// Resolves the player's chosen ability.
    ///
    /// Returns `None` without touching anything when no battle is running,
    /// the ability is unknown, or the engine refuses the action.
    pub fn choose_ability(&mut self, ability_id: &str) -> Option<ActionResult> {
        let Some(ability) = self.state.player.ability(ability_id).cloned() else {
            debug!(ability_id, "unknown ability");
            return None;
        };

        let GameState {
            player,
            current_enemy,
            battle_state,
            ..
        } = &mut self.state;
        let (Some(battle), Some(enemy)) = (battle_state.as_mut(), current_enemy.as_ref()) else {
            debug!(ability_id, "no battle in progress");
            return None;
        };

        let result =
            self.engine
                .submit_player_action(battle, &ability, &*player, enemy, &mut self.rng)?;
        self.record_resolution(&result);
        Some(result)
    }

    /// Whether [`Self::choose_ability`] would be accepted right now.
    pub fn can_act(&self) -> bool {
        self.state
            .battle_state
            .as_ref()
            .is_some_and(|battle| self.engine.can_player_act(battle))
    }

    /// Runs every follow-up step that falls due within `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let target = self.engine.now_ms().saturating_add(elapsed_ms);

        while let Some(step) = self.engine.pop_due(Some(target)) {
            self.run_follow_up(step);
        }
        self.engine.advance_clock_to(target);
    }

    /// Runs pending follow-up steps until the queue is empty, ignoring
    /// their delays. Afterwards it is the player's turn again or the battle
    /// has been concluded.
    pub fn settle(&mut self) {
        while let Some(step) = self.engine.pop_due(None) {
            self.run_follow_up(step);
        }
    }

    /// Applies battle rewards and leaves the battle screen.
    pub fn end_battle(&mut self, won: bool) {
        self.engine.reset();
        self.state.battle_state = None;
        let Some(enemy) = self.state.current_enemy.take() else {
            debug!(won, "no battle to end");
            return;
        };

        let outcome = if won {
            BattleOutcome::Won
        } else {
            BattleOutcome::Lost
        };
        info!(enemy = %enemy.name, ?outcome, "battle ended");
        self.events.push(SessionEvent::BattleEnded { outcome });

        if !won {
            self.change_screen(Screen::GameOver);
            return;
        }

        let gain = gain_xp(&mut self.state.player, enemy.reward_xp());
        self.events.push(SessionEvent::XpGained {
            amount: gain.amount,
        });
        if gain.leveled_up {
            info!(level = gain.new_level, "level up");
            self.events.push(SessionEvent::LeveledUp {
                level: gain.new_level,
                max_hp: self.state.player.max_hp,
            });
        }

        if !enemy.is_boss {
            if let Some(phase) = self.state.current_phase {
                *self.state.phase_progress.entry(phase).or_insert(0) += 1;
            }
            self.change_screen(Screen::Library);
            return;
        }

        match self.state.current_phase {
            Some(phase) => {
                if award_fragment(&mut self.state.player, phase) {
                    info!(%phase, "fragment awarded");
                    self.events.push(SessionEvent::FragmentAwarded { phase });
                }
            }
            None => warn!(enemy = %enemy.name, "boss defeated outside a phase"),
        }
        self.change_screen(Screen::Victory);
    }

    /// The last few battle log lines, empty outside battle.
    pub fn recent_log(&self) -> &[String] {
        self.state
            .battle_state
            .as_ref()
            .map(BattleState::recent_log)
            .unwrap_or_default()
    }

    fn run_follow_up(&mut self, step: FollowUp) {
        match step {
            FollowUp::SettleAction { actor } => {
                let Some(battle) = self.state.battle_state.as_mut() else {
                    return;
                };
                if self.engine.settle_action(battle, actor) {
                    self.events.push(SessionEvent::TurnChanged { turn: battle.turn });
                }
            }
            FollowUp::EnemyTurn => {
                let (Some(battle), Some(enemy)) = (
                    self.state.battle_state.as_mut(),
                    self.state.current_enemy.as_ref(),
                ) else {
                    return;
                };
                if let Some(result) = self.engine.run_enemy_turn(battle, enemy, &mut self.rng) {
                    self.record_resolution(&result);
                }
            }
            FollowUp::Conclude(outcome) => self.end_battle(outcome == BattleOutcome::Won),
        }
    }

    fn record_resolution(&mut self, result: &ActionResult) {
        self.state.player.set_hp(result.new_player_hp);
        self.events.push(SessionEvent::ActionResolved {
            actor: result.actor,
            player_hp: result.new_player_hp,
            enemy_hp: result.new_enemy_hp,
            message: result.message.clone(),
        });
    }

    // ── Persistence ─────────────────────────────────────────────

    pub fn save_game(&mut self) -> Result<(), GameError> {
        self.state.last_save_time = chrono::Utc::now().timestamp();
        let raw = self.state.to_snapshot()?;
        self.store.write(&self.config.save_key, &raw)?;

        info!(key = %self.config.save_key, "game saved");
        self.events.push(SessionEvent::GameSaved);
        Ok(())
    }

    /// Restores the stored snapshot. Returns `Ok(false)` when there is
    /// nothing usable to load; a malformed snapshot resets to the default
    /// state.
    pub fn load_game(&mut self) -> Result<bool, GameError> {
        let Some(raw) = self.store.read(&self.config.save_key)? else {
            debug!(key = %self.config.save_key, "no saved game");
            return Ok(false);
        };

        match GameState::from_snapshot(&raw) {
            Ok(state) => {
                self.state = state;
                self.engine.reset();
                if let (Some(battle), Some(_)) =
                    (&self.state.battle_state, &self.state.current_enemy)
                {
                    self.engine.resume(battle);
                }
                info!(screen = %self.state.current_screen, "game loaded");
                self.events.push(SessionEvent::GameLoaded);
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "discarding saved game");
                self.state = GameState::default();
                self.engine.reset();
                self.events.push(SessionEvent::SnapshotDiscarded {
                    reason: e.to_string(),
                });
                Ok(false)
            }
        }
    }

    // ── Menu flow ───────────────────────────────────────────────

    pub fn new_game(&mut self) {
        self.reset_state();
        self.change_screen(Screen::Library);
    }

    /// Loads the saved game and returns to the library. Stays put when
    /// there is no usable save.
    pub fn continue_game(&mut self) -> Result<bool, GameError> {
        if !self.load_game()? {
            return Ok(false);
        }
        self.engine.reset();
        self.state.battle_state = None;
        self.state.current_enemy = None;
        self.change_screen(Screen::Library);
        Ok(true)
    }

    /// Saves, then heads to the final victory once every fragment is held.
    pub fn continue_from_victory(&mut self) -> Result<(), GameError> {
        self.save_game()?;
        if self.state.all_fragments_collected() {
            info!("all fragments collected");
            self.change_screen(Screen::FinalVictory);
        } else {
            self.change_screen(Screen::Library);
        }
        Ok(())
    }

    /// Deletes the save and goes back to the main menu with a fresh state.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.store.remove(&self.config.save_key)?;
        info!("save deleted, restarting");
        self.reset_state();
        Ok(())
    }

    fn reset_state(&mut self) {
        let from = self.state.current_screen;
        self.engine.reset();
        self.state = GameState::default();
        if from != self.state.current_screen {
            self.events.push(SessionEvent::ScreenChanged {
                from,
                to: self.state.current_screen,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pacing;
    use crate::narrative::OfflineNarrative;
    use crate::utils::persistence::MemoryStore;

    fn instant_session() -> SessionController {
        let config = GameConfig {
            pacing: Pacing::instant(),
            ..GameConfig::default()
        };
        SessionController::with_seed(config, Box::new(MemoryStore::new()), 42)
    }

    fn paced_session() -> SessionController {
        SessionController::with_seed(GameConfig::default(), Box::new(MemoryStore::new()), 42)
    }

    fn sturdy_enemy() -> Enemy {
        Enemy::new("Chaotic Bacterium".to_string(), 500, 5, 0)
    }

    #[test]
    fn test_start_phase_moves_to_dialogue() {
        let mut session = instant_session();
        session.start_phase(Phase::Health);
        assert_eq!(session.state().current_phase, Some(Phase::Health));
        assert_eq!(session.screen(), Screen::Dialogue);
    }

    #[test]
    fn test_start_battle_seeds_state() {
        let mut session = instant_session();
        session.start_battle(sturdy_enemy());

        let battle = session.state().battle_state.as_ref().unwrap();
        assert_eq!(battle.player_hp, 100);
        assert_eq!(battle.enemy_hp, 500);
        assert_eq!(battle.log, vec!["Battle started against Chaotic Bacterium!"]);
        assert_eq!(session.screen(), Screen::Battle);
        assert!(session.can_act());
    }

    #[test]
    fn test_unknown_ability_is_ignored() {
        let mut session = instant_session();
        session.start_battle(sturdy_enemy());
        assert!(session.choose_ability("fireball").is_none());
        assert_eq!(session.state().battle_state.as_ref().unwrap().log.len(), 1);
    }

    #[test]
    fn test_action_outside_battle_is_ignored() {
        let mut session = instant_session();
        assert!(session.choose_ability("logic").is_none());
        assert!(!session.can_act());
    }

    #[test]
    fn test_pacing_delays_enemy_counter() {
        let mut session = paced_session();
        session.start_battle(sturdy_enemy());
        session.choose_ability("logic").unwrap();

        // Still resolving, a second choice is dropped
        assert!(session.choose_ability("logic").is_none());

        session.advance(Duration::from_millis(999));
        assert_eq!(
            session.state().battle_state.as_ref().unwrap().turn,
            crate::combat::Turn::Player
        );

        session.advance(Duration::from_millis(1));
        let battle = session.state().battle_state.as_ref().unwrap();
        assert_eq!(battle.turn, crate::combat::Turn::Enemy);
        assert_eq!(battle.player_hp, 100);

        session.advance(Duration::from_millis(1500));
        let battle = session.state().battle_state.as_ref().unwrap();
        assert!(battle.player_hp < 100);
        assert_eq!(session.state().player.hp, battle.player_hp);

        session.advance(Duration::from_millis(1000));
        assert!(session.can_act());
    }

    #[test]
    fn test_regular_win_returns_to_library_and_advances_roster() {
        let mut session = instant_session();
        session.start_phase(Phase::Health);
        session.start_battle(Enemy::new("Symbolic Virus".to_string(), 1, 1, 0).with_xp(30));

        session.choose_ability("logic").unwrap();
        session.settle();

        assert_eq!(session.screen(), Screen::Library);
        assert!(session.state().battle_state.is_none());
        assert!(session.state().current_enemy.is_none());
        assert_eq!(session.state().player.xp, 30);
        assert_eq!(session.state().regulars_defeated(Phase::Health), 1);
        assert!(session.state().player.fragments.is_empty());
    }

    #[test]
    fn test_defeat_goes_to_game_over() {
        let mut session = instant_session();
        session.start_battle(Enemy::new("Shade".to_string(), 500, 200, 0));

        session.choose_ability("inspiration").unwrap();
        session.settle();

        assert_eq!(session.screen(), Screen::GameOver);
        assert_eq!(session.state().player.hp, 0);
        assert_eq!(session.state().player.xp, 0);
    }

    #[test]
    fn test_end_battle_without_battle_is_noop() {
        let mut session = instant_session();
        session.change_screen(Screen::Library);
        session.end_battle(true);
        assert_eq!(session.screen(), Screen::Library);
        assert_eq!(session.state().player.xp, 0);
    }

    #[test]
    fn test_intro_and_encounter_use_fallbacks() {
        let mut session = instant_session();
        session.start_phase(Phase::Programming);
        session.load_phase_intro(&OfflineNarrative);

        let dialogue = &session.state().dialogue_state;
        assert_eq!(dialogue.speaker, GUARDIAN_NAME);
        assert!(dialogue.text.starts_with("Welcome to The Digital Realm."));
        assert_eq!(dialogue.options[0], "Confront the Living Bug");

        session.begin_encounter(&OfflineNarrative);
        let enemy = session.state().current_enemy.as_ref().unwrap();
        assert_eq!(enemy.name, "Living Bug");
        assert_eq!(enemy.hp, 35);
        assert_eq!(session.screen(), Screen::Battle);
    }

    #[test]
    fn test_skip_dialogue_returns_to_library() {
        let mut session = instant_session();
        session.start_phase(Phase::Health);
        session.skip_dialogue();
        assert_eq!(session.screen(), Screen::Library);
    }

    #[test]
    fn test_locked_painting_is_ignored() {
        let mut session = instant_session();
        session.new_game();
        assert!(!session.enter_painting(Phase::Art).unwrap());
        assert_eq!(session.screen(), Screen::Library);
        assert!(session.store().read("alexandriaGame").unwrap().is_none());

        assert!(session.enter_painting(Phase::Health).unwrap());
        assert_eq!(session.screen(), Screen::Dialogue);
        assert!(session.store().read("alexandriaGame").unwrap().is_some());
    }

    #[test]
    fn test_events_are_drained() {
        let mut session = instant_session();
        session.new_game();
        let events = session.drain_events();
        assert_eq!(
            events,
            vec![SessionEvent::ScreenChanged {
                from: Screen::Menu,
                to: Screen::Library
            }]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_malformed_save_is_discarded() {
        let mut store = MemoryStore::new();
        store.write("alexandriaGame", "{broken").unwrap();
        let mut session = SessionController::with_seed(GameConfig::default(), Box::new(store), 1);

        assert!(!session.load_game().unwrap());
        assert_eq!(session.state(), &GameState::default());
        assert!(matches!(
            session.drain_events().as_slice(),
            [SessionEvent::SnapshotDiscarded { .. }]
        ));
    }

    #[test]
    fn test_restart_deletes_save() {
        let mut session = instant_session();
        session.new_game();
        session.save_game().unwrap();
        session.restart().unwrap();

        assert!(session.store().read("alexandriaGame").unwrap().is_none());
        assert_eq!(session.screen(), Screen::Menu);
        assert!(!session.continue_game().unwrap());
    }
}
