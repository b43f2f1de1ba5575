//! Configuration System
//!
//! Run parameters with defaults equal to the reference constants. A TOML file
//! can override any subset; CLI flags are layered on top by the binary.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::components::PayoffMatrix;
use crate::rng::RngKind;

/// Population size
pub const DEFAULT_AGENTS: usize = 100;
/// Number of time steps
pub const DEFAULT_STEPS: u64 = 500;
/// Neighbor slots per agent
pub const DEFAULT_DEGREE: usize = 4;
/// Seed for the random stream
pub const DEFAULT_SEED: u64 = 42;
/// Intensity of selection in the Fermi rule
pub const DEFAULT_BETA: f64 = 1.0;

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of agents
    pub agents: usize,
    /// Number of time steps to run
    pub steps: u64,
    /// Neighbor slots per agent
    pub degree: usize,
    /// RNG seed
    pub seed: u64,
    /// Fermi intensity of selection
    pub beta: f64,
    /// Per-action probability of flipping the chosen move
    pub noise: f64,
    /// Generator backing the random stream
    pub rng: RngKind,
    /// Prisoner's Dilemma payoffs
    pub payoffs: PayoffMatrix,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agents: DEFAULT_AGENTS,
            steps: DEFAULT_STEPS,
            degree: DEFAULT_DEGREE,
            seed: DEFAULT_SEED,
            beta: DEFAULT_BETA,
            noise: 0.0,
            rng: RngKind::default(),
            payoffs: PayoffMatrix::default(),
        }
    }
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Defaults, then the optional TOML file, then `overrides`; validated.
    pub fn layered(
        file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Replaces every field that `overrides` sets.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(noise) = overrides.noise {
            self.noise = noise;
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(steps) = overrides.steps {
            self.steps = steps;
        }
        if let Some(agents) = overrides.agents {
            self.agents = agents;
        }
        if let Some(degree) = overrides.degree {
            self.degree = degree;
        }
        if let Some(beta) = overrides.beta {
            self.beta = beta;
        }
        if let Some(rng) = overrides.rng {
            self.rng = rng;
        }
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    /// Checks parameters the engine cannot run with.
    ///
    /// Noise is left alone: values outside `[0, 1]` only saturate the flip test.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents == 0 {
            return Err(ConfigError::Invalid("agents must be at least 1".into()));
        }
        if self.degree == 0 {
            return Err(ConfigError::Invalid("degree must be at least 1".into()));
        }
        if self.rng == RngKind::Libc && self.seed > u64::from(u32::MAX) {
            return Err(ConfigError::Invalid(format!(
                "libc generator takes a 32-bit seed, got {}",
                self.seed
            )));
        }
        if !self.beta.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "beta must be finite, got {}",
                self.beta
            )));
        }
        Ok(())
    }
}

/// Values supplied on the command line, layered over file and defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub noise: Option<f64>,
    pub seed: Option<u64>,
    pub steps: Option<u64>,
    pub agents: Option<usize>,
    pub degree: Option<usize>,
    pub beta: Option<f64>,
    pub rng: Option<RngKind>,
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
