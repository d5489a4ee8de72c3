//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::runner::RunStats;
use crate::phases::Phase;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub completion_rate: f64,

    // Aggregated stats
    pub avg_final_level: f64,
    pub avg_battles: f64,
    pub avg_deaths: f64,
    pub avg_fragments: f64,

    // Distribution data
    pub level_distribution: BTreeMap<u32, u32>,
    pub avg_deaths_per_phase: BTreeMap<Phase, f64>,
    /// Share of runs (0-100) that obtained each phase's fragment
    pub fragment_rate_per_phase: BTreeMap<Phase, f64>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;
        let runs_completed = runs.iter().filter(|r| r.completed).count() as u32;

        let avg = |f: &dyn Fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / divisor;
        let avg_final_level = avg(&|r: &RunStats| r.final_level as f64);
        let avg_battles = avg(&|r: &RunStats| r.battles as f64);
        let avg_deaths = avg(&|r: &RunStats| r.deaths as f64);
        let avg_fragments = avg(&|r: &RunStats| r.fragments as f64);

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        // Fragments are collected in phase order
        let mut avg_deaths_per_phase = BTreeMap::new();
        let mut fragment_rate_per_phase = BTreeMap::new();
        for (index, phase) in Phase::all().into_iter().enumerate() {
            let deaths = avg(&|r: &RunStats| {
                r.deaths_per_phase.get(&phase).copied().unwrap_or(0) as f64
            });
            let obtained = runs.iter().filter(|r| r.fragments > index).count();
            avg_deaths_per_phase.insert(phase, deaths);
            fragment_rate_per_phase.insert(phase, obtained as f64 / divisor * 100.0);
        }

        Self {
            num_runs,
            runs_completed,
            completion_rate: runs_completed as f64 / divisor * 100.0,
            avg_final_level,
            avg_battles,
            avg_deaths,
            avg_fragments,
            level_distribution,
            avg_deaths_per_phase,
            fragment_rate_per_phase,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} reached the final victory\n\n",
            self.num_runs, self.runs_completed
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:  {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Battles:      {:.1}\n", self.avg_battles));
        report.push_str(&format!("  Avg Deaths:       {:.1}\n", self.avg_deaths));
        report.push_str(&format!("  Avg Fragments:    {:.2}\n\n", self.avg_fragments));

        report.push_str("── PER-PHASE BREAKDOWN ──────────────────────────────────────────\n");
        report.push_str("  Phase          Deaths   Fragment\n");
        report.push_str("  ─────          ──────   ────────\n");
        for phase in Phase::all() {
            let deaths = self.avg_deaths_per_phase.get(&phase).copied().unwrap_or(0.0);
            let rate = self.fragment_rate_per_phase.get(&phase).copied().unwrap_or(0.0);
            let bar = "█".repeat((rate / 5.0) as usize);
            report.push_str(&format!(
                "  {:<12}   {:6.1}   {:>5.1}% {}\n",
                phase.id(),
                deaths,
                rate,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── FINAL LEVELS ─────────────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            report.push_str(&format!("  Level {:2}: {}\n", level, count));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.completion_rate >= 90.0 {
            "TOO EASY - Almost every run wins"
        } else if self.completion_rate >= 40.0 {
            "GOOD - Challenging but fair"
        } else if self.completion_rate > 0.0 {
            "HARD - Few runs finish"
        } else {
            "TOO HARD - No run finishes"
        };
        report.push_str(&format!("  Completion Rate: {:.1}%\n", self.completion_rate));
        report.push_str(&format!("  Rating:          {}\n", rating));

        for phase in Phase::all() {
            let deaths = self.avg_deaths_per_phase.get(&phase).copied().unwrap_or(0.0);
            if deaths > 3.0 {
                report.push_str(&format!(
                    "  ⚠️  {} averages {:.1} deaths per run\n",
                    phase.title(),
                    deaths
                ));
            }
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
