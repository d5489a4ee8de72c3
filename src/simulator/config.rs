//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated sessions
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Battles per session before the run is abandoned
    pub max_battles_per_run: u32,

    /// Autoplay casts its heal below this share of max HP (0-100)
    pub heal_below_percent: f64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            max_battles_per_run: 60,
            heal_below_percent: 35.0,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a balance smoke check
    pub fn quick() -> Self {
        Self {
            num_runs: 100,
            max_battles_per_run: 30,
            ..Default::default()
        }
    }

    /// Never heals, to see how far raw attacking gets
    pub fn aggressive(num_runs: u32) -> Self {
        Self {
            num_runs,
            heal_below_percent: 0.0,
            ..Default::default()
        }
    }
}
