//! Iterated Prisoner's Dilemma on a fixed-degree random network.
//!
//! Agents play their neighbors every step, accumulate payoffs, and copy
//! better-scoring neighbors through the Fermi imitation rule. Runs are fully
//! determined by the seed and the order in which random draws are consumed.
//!
//! # Modules
//!
//! - [`components`]: agents, population, network, payoff matrix
//! - [`setup`]: network construction and initial strategy assignment
//! - [`systems`]: action choice, the interaction round, imitation
//! - [`simulation`]: the [`Simulation`] context that drives a run
//! - [`output`]: reporters and the JSON run summary
//! - [`rng`]: injectable random sources

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod rng;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::{Agent, Network, PayoffMatrix, Population};
pub use config::{ConfigError, ConfigOverrides, SimConfig};
pub use error::SimError;
pub use output::{CsvReporter, JsonlReporter, MemoryReporter, OutputError, OutputFormat, Reporter};
pub use rng::{LibcRand, RandomSource, RngKind, SimRng};

#[cfg(any(test, feature = "test-fixtures"))]
pub use rng::ScriptedRng;
pub use simulation::{run_to_file, Simulation};

pub use pd_events::{Action, FinalStrategies, RunSummary, StepRecord, Strategy};
