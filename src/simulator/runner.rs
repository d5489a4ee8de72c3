//! Headless autoplay on top of [`SessionController`].
//!
//! The simulator drives the same controller a frontend would, with instant
//! pacing and an in-memory save store, and derives its statistics from the
//! emitted [`SessionEvent`]s.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::config::SimConfig;
use super::report::SimReport;
use crate::combat::BattleOutcome;
use crate::config::{GameConfig, Pacing};
use crate::core::{Screen, SessionController, SessionEvent};
use crate::error::GameError;
use crate::narrative::{NarrativeService, OfflineNarrative};
use crate::phases::Phase;
use crate::utils::persistence::MemoryStore;

/// Upper bound on controller calls per session, against a stuck loop.
const MAX_STEPS_PER_RUN: u32 = 100_000;

/// Statistics for one autoplayed session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub seed: u64,
    pub completed: bool,
    pub battles: u32,
    pub victories: u32,
    pub deaths: u32,
    pub deaths_per_phase: BTreeMap<Phase, u32>,
    pub final_level: u32,
    pub fragments: usize,
}

/// Run the full simulation against the offline fallbacks.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    run_simulation_with(config, &OfflineNarrative)
}

/// Run the full simulation with a specific narrative service.
pub fn run_simulation_with(config: &SimConfig, service: &dyn NarrativeService) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let seed = match config.seed {
            Some(seed) => seed.wrapping_add(run_idx as u64),
            None => rand::random(),
        };

        let stats = match simulate_single_run(config, service, seed) {
            Ok(stats) => stats,
            Err(e) => {
                // Only the in-memory store is used here, so this is unexpected
                debug!(seed, error = %e, "simulated run failed");
                RunStats {
                    seed,
                    ..RunStats::default()
                }
            }
        };

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {}, Level {}, Battles {}, Deaths {}, Fragments {}",
                run_idx + 1,
                config.num_runs,
                if stats.completed { "completed" } else { "incomplete" },
                stats.final_level,
                stats.battles,
                stats.deaths,
                stats.fragments
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}

fn simulate_single_run(
    config: &SimConfig,
    service: &dyn NarrativeService,
    seed: u64,
) -> Result<RunStats, GameError> {
    let game_config = GameConfig {
        pacing: Pacing::instant(),
        ..GameConfig::default()
    };
    let mut session =
        SessionController::with_seed(game_config, Box::new(MemoryStore::new()), seed);
    session.new_game();

    let mut stats = play_session(&mut session, service, config, |_| {})?;
    stats.seed = seed;
    Ok(stats)
}

/// The phase autoplay enters next: the first unlocked one still missing
/// its fragment.
pub fn next_phase(session: &SessionController) -> Option<Phase> {
    Phase::all()
        .into_iter()
        .find(|&phase| session.is_unlocked(phase) && !session.state().player.has_fragment(phase))
}

/// Ability autoplay uses on its turn: heal when low, attack otherwise.
pub fn pick_ability(session: &SessionController, heal_below_percent: f64) -> &'static str {
    let player = &session.state().player;
    if player.hp_percent() < heal_below_percent {
        "cure"
    } else {
        "logic"
    }
}

/// Plays `session` from its current screen until the final victory or the
/// battle limit, passing every notification to `observe`.
///
/// Battle pauses are skipped. A game over resumes from the last save, or
/// starts over when there is none.
pub fn play_session(
    session: &mut SessionController,
    service: &dyn NarrativeService,
    config: &SimConfig,
    mut observe: impl FnMut(&SessionEvent),
) -> Result<RunStats, GameError> {
    let mut stats = RunStats::default();

    for _ in 0..MAX_STEPS_PER_RUN {
        match session.screen() {
            Screen::Menu => session.new_game(),
            Screen::Library => match next_phase(session) {
                Some(phase) => {
                    session.enter_painting(phase)?;
                }
                None => break,
            },
            Screen::Dialogue => {
                if stats.battles >= config.max_battles_per_run {
                    break;
                }
                session.load_phase_intro(service);
                session.begin_encounter(service);
                stats.battles += 1;
            }
            Screen::Battle => {
                let ability = pick_ability(session, config.heal_below_percent);
                session.choose_ability(ability);
                session.settle();
            }
            Screen::Victory => session.continue_from_victory()?,
            Screen::GameOver => {
                if let Some(phase) = session.state().current_phase {
                    *stats.deaths_per_phase.entry(phase).or_insert(0) += 1;
                }
                if !session.continue_game()? {
                    session.new_game();
                }
            }
            Screen::FinalVictory => {
                stats.completed = true;
                break;
            }
        }

        for event in session.drain_events() {
            if let SessionEvent::BattleEnded { outcome } = &event {
                match outcome {
                    BattleOutcome::Won => stats.victories += 1,
                    BattleOutcome::Lost => stats.deaths += 1,
                    BattleOutcome::Ongoing => {}
                }
            }
            observe(&event);
        }
    }

    stats.final_level = session.state().player.level;
    stats.fragments = session.state().player.fragment_count();
    Ok(stats)
}
