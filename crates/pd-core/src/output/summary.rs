//! Run Summary Output
//!
//! Condenses a finished run into a [`RunSummary`] and writes it as JSON.

use pd_events::{FinalStrategies, RunSummary};
use std::fs;
use std::path::Path;

use super::reporter::OutputError;
use crate::config::SimConfig;

/// Builds a summary from the configuration, cooperation series and final mix.
pub fn build_summary(
    config: &SimConfig,
    cooperation: &[f64],
    final_strategies: FinalStrategies,
) -> RunSummary {
    let mean_cooperation = if cooperation.is_empty() {
        0.0
    } else {
        cooperation.iter().sum::<f64>() / cooperation.len() as f64
    };

    RunSummary {
        seed: config.seed,
        noise: config.noise,
        agents: config.agents,
        steps: config.steps,
        degree: config.degree,
        beta: config.beta,
        rng: config.rng.name().to_string(),
        mean_cooperation,
        final_cooperation: cooperation.last().copied().unwrap_or(0.0),
        final_strategies,
        cooperation: cooperation.to_vec(),
    }
}

/// Writes a summary as pretty JSON, creating parent directories if needed.
pub fn write_summary(path: impl AsRef<Path>, summary: &RunSummary) -> Result<(), OutputError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}
