//! Battle turn sequencing.
//!
//! [`BattleEngine`] owns the re-entrancy guard and the queue of deferred
//! follow-up steps that pace a fight: after an action resolves the engine is
//! `Resolving` until its settle step runs, the enemy's counter-attack waits
//! for its own delay, and a finished battle is concluded only after the
//! closing pause. Time is supplied by the caller in milliseconds, so the
//! same queue serves a real-time presentation layer and the instant
//! simulator.

use rand::Rng;
use tracing::debug;

use super::logic::{hand_off_turn, resolve_enemy_turn, resolve_player_action, ActionResult};
use super::types::{BattleOutcome, BattleState, Enemy, Turn};
use crate::character::{Ability, Player};
use crate::config::Pacing;

/// Re-entrancy guard for action resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Ready to accept the next action for whoever holds the turn.
    Idle,
    /// An action resolved and its settle step is still pending.
    Resolving,
}

/// A step scheduled to run once its delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Hand the turn over (if the opponent survived) and release the guard.
    SettleAction { actor: Turn },
    /// Let the enemy counter-attack.
    EnemyTurn,
    /// Surface a finished battle to the session.
    Conclude(BattleOutcome),
}

#[derive(Debug, Clone, Copy)]
struct ScheduledStep {
    due_ms: u64,
    seq: u64,
    step: FollowUp,
}

/// Gatekeeper and scheduler for a single battle.
#[derive(Debug, Clone)]
pub struct BattleEngine {
    phase: EnginePhase,
    pacing: Pacing,
    queue: Vec<ScheduledStep>,
    clock_ms: u64,
    next_seq: u64,
}

impl BattleEngine {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            phase: EnginePhase::Idle,
            pacing,
            queue: Vec::new(),
            clock_ms: 0,
            next_seq: 0,
        }
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == EnginePhase::Idle
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Engine-local time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending_steps(&self) -> Vec<FollowUp> {
        let mut steps = self.queue.clone();
        steps.sort_by_key(|s| (s.due_ms, s.seq));
        steps.into_iter().map(|s| s.step).collect()
    }

    /// Drops pending steps and releases the guard. The clock keeps running.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.phase = EnginePhase::Idle;
    }

    /// Re-arms the queue for a battle that was restored mid-fight.
    pub fn resume(&mut self, battle: &BattleState) {
        self.reset();
        match battle.outcome() {
            BattleOutcome::Ongoing if battle.turn == Turn::Enemy => {
                self.schedule(self.pacing.enemy_turn_delay_ms, FollowUp::EnemyTurn);
            }
            BattleOutcome::Ongoing => {}
            outcome => {
                self.schedule(self.pacing.battle_end_delay_ms, FollowUp::Conclude(outcome));
            }
        }
    }

    /// Whether a player action would be accepted right now.
    pub fn can_player_act(&self, battle: &BattleState) -> bool {
        self.is_idle() && battle.turn == Turn::Player && !battle.is_over()
    }

    /// Resolves the player's ability if the guard allows it.
    ///
    /// Returns `None` (and changes nothing) when it is not the player's turn,
    /// the battle is already decided, or a previous action is still settling.
    pub fn submit_player_action(
        &mut self,
        battle: &mut BattleState,
        ability: &Ability,
        player: &Player,
        enemy: &Enemy,
        rng: &mut impl Rng,
    ) -> Option<ActionResult> {
        if !self.can_player_act(battle) {
            debug!(
                turn = ?battle.turn,
                phase = ?self.phase,
                over = battle.is_over(),
                "ignoring player action"
            );
            return None;
        }

        let result = resolve_player_action(battle, ability, player, enemy, rng);
        self.after_resolution(battle, Turn::Player);
        Some(result)
    }

    /// Resolves the enemy's counter-attack if the guard allows it.
    pub fn run_enemy_turn(
        &mut self,
        battle: &mut BattleState,
        enemy: &Enemy,
        rng: &mut impl Rng,
    ) -> Option<ActionResult> {
        if !self.is_idle() || battle.turn != Turn::Enemy || battle.is_over() {
            debug!(turn = ?battle.turn, phase = ?self.phase, "ignoring enemy turn");
            return None;
        }

        let result = resolve_enemy_turn(battle, enemy, rng);
        self.after_resolution(battle, Turn::Enemy);
        Some(result)
    }

    /// Runs a [`FollowUp::SettleAction`] step. Returns true if the turn changed.
    pub fn settle_action(&mut self, battle: &mut BattleState, actor: Turn) -> bool {
        let flipped = hand_off_turn(battle, actor);
        self.phase = EnginePhase::Idle;

        if flipped && battle.turn == Turn::Enemy {
            self.schedule(self.pacing.enemy_turn_delay_ms, FollowUp::EnemyTurn);
        }
        flipped
    }

    /// Pops the earliest step due at or before `limit_ms` and moves the clock
    /// to its due time. `None` as the limit takes the next step regardless.
    pub fn pop_due(&mut self, limit_ms: Option<u64>) -> Option<FollowUp> {
        let (index, due_ms) = self
            .queue
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| (s.due_ms, s.seq))
            .map(|(i, s)| (i, s.due_ms))?;

        if limit_ms.is_some_and(|limit| due_ms > limit) {
            return None;
        }

        let step = self.queue.remove(index);
        self.clock_ms = self.clock_ms.max(step.due_ms);
        Some(step.step)
    }

    /// Moves the clock forward without running anything.
    pub fn advance_clock_to(&mut self, target_ms: u64) {
        self.clock_ms = self.clock_ms.max(target_ms);
    }

    fn after_resolution(&mut self, battle: &BattleState, actor: Turn) {
        self.phase = EnginePhase::Resolving;
        self.schedule(self.pacing.action_settle_ms, FollowUp::SettleAction { actor });

        let outcome = battle.outcome();
        if outcome.is_terminal() {
            self.schedule(self.pacing.battle_end_delay_ms, FollowUp::Conclude(outcome));
        }
    }

    fn schedule(&mut self, delay_ms: u64, step: FollowUp) {
        self.queue.push(ScheduledStep {
            due_ms: self.clock_ms + delay_ms,
            seq: self.next_seq,
            step,
        });
        self.next_seq += 1;
    }
}
