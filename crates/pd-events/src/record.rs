//! Output Records
//!
//! Per-step and end-of-run records emitted by the engine, plus their
//! textual CSV form.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Strategy;

/// First line of the CSV output stream.
pub const CSV_HEADER: &str = "time,cooperation";

/// Marker line preceding the final strategy fractions.
pub const FINAL_MARKER: &str = "#FINAL_STRATEGIES";

/// Cooperation fraction observed in one time step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Zero-based step index
    pub time: u64,
    /// Cooperating interaction slots divided by total slots
    pub cooperation: f64,
}

impl StepRecord {
    pub fn new(time: u64, cooperation: f64) -> Self {
        Self { time, cooperation }
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:.6}", self.time, self.cooperation)
    }
}

/// Fraction of the population holding each strategy at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinalStrategies {
    pub all_c: f64,
    pub all_d: f64,
    pub tft: f64,
    pub grudger: f64,
}

impl FinalStrategies {
    /// Builds fractions from per-strategy counts in [`Strategy::ALL`] order.
    pub fn from_counts(counts: [usize; Strategy::COUNT], population: usize) -> Self {
        let total = population as f64;
        Self {
            all_c: counts[0] as f64 / total,
            all_d: counts[1] as f64 / total,
            tft: counts[2] as f64 / total,
            grudger: counts[3] as f64 / total,
        }
    }

    /// Fraction for a single strategy.
    pub fn get(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::AlwaysCooperate => self.all_c,
            Strategy::AlwaysDefect => self.all_d,
            Strategy::TitForTat => self.tft,
            Strategy::Grudger => self.grudger,
        }
    }

    pub fn as_array(&self) -> [f64; Strategy::COUNT] {
        [self.all_c, self.all_d, self.tft, self.grudger]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Strategy with the largest share; earlier strategies win ties.
    pub fn dominant(&self) -> Strategy {
        let mut best = Strategy::AlwaysCooperate;
        for strategy in Strategy::ALL {
            if self.get(strategy) > self.get(best) {
                best = strategy;
            }
        }
        best
    }
}

impl fmt::Display for FinalStrategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6},{:.6},{:.6},{:.6}",
            self.all_c, self.all_d, self.tft, self.grudger
        )
    }
}

/// Complete description of one finished run, for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub noise: f64,
    pub agents: usize,
    pub steps: u64,
    pub degree: usize,
    pub beta: f64,
    /// Name of the random generator the run used
    pub rng: String,
    pub mean_cooperation: f64,
    pub final_cooperation: f64,
    pub final_strategies: FinalStrategies,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cooperation: Vec<f64>,
}
