//! Simulation Context
//!
//! [`Simulation`] owns everything one run mutates: configuration, random
//! stream, network and population. Independent instances share nothing.

use pd_events::{FinalStrategies, StepRecord, Strategy};
use std::path::Path;
use tracing::{debug, info};

use crate::components::{Network, Population};
use crate::config::{ConfigError, SimConfig};
use crate::error::SimError;
use crate::output::{OutputError, OutputFormat, Reporter};
use crate::rng::RandomSource;
use crate::setup::{build_network, init_agents, InitSummary};
use crate::systems::{imitation_step, play_round, RoundOutcome};

/// Steps between progress log lines
const PROGRESS_INTERVAL: u64 = 100;

/// One independent simulation run.
pub struct Simulation<R: RandomSource> {
    config: SimConfig,
    rng: R,
    network: Network,
    population: Population,
    current_step: u64,
}

impl Simulation<Box<dyn RandomSource + Send>> {
    /// Builds a run using the generator and seed named in `config`.
    pub fn from_config(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = config.rng.build(config.seed);
        Self::new(config, rng)
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Initializes the network, then the agents, from `rng`.
    pub fn new(config: SimConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let network = build_network(&mut rng, config.agents, config.degree);
        let population = init_agents(&mut rng, config.agents);

        let summary = InitSummary::from_population(&population);
        info!(
            agents = summary.total_agents,
            degree = config.degree,
            seed = config.seed,
            rng = %config.rng,
            noise = config.noise,
            "initialized simulation"
        );
        for (strategy, count) in &summary.by_strategy {
            debug!(%strategy, count, "initial strategy share");
        }

        Ok(Self {
            config,
            rng,
            network,
            population,
            current_step: 0,
        })
    }

    /// Builds a run from an explicit network and population. No draws are consumed.
    pub fn with_parts(
        config: SimConfig,
        rng: R,
        network: Network,
        population: Population,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if network.len() != population.len() || population.len() != config.agents {
            return Err(ConfigError::Invalid(format!(
                "network covers {} agents, population has {}, config expects {}",
                network.len(),
                population.len(),
                config.agents
            )));
        }
        if network.degree() != config.degree {
            return Err(ConfigError::Invalid(format!(
                "network degree {} does not match configured degree {}",
                network.degree(),
                config.degree
            )));
        }
        if !network.is_within(population.len()) {
            return Err(ConfigError::Invalid(
                "network references an agent outside the population".into(),
            ));
        }

        Ok(Self {
            config,
            rng,
            network,
            population,
            current_step: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Index of the next step to be played.
    pub fn current_step(&self) -> u64 {
        self.current_step
    }

    pub fn reset_payoffs(&mut self) {
        self.population.reset_payoffs();
    }

    /// Plays every interaction slot once. Does not reset payoffs.
    pub fn play_round(&mut self) -> RoundOutcome {
        play_round(
            &mut self.population,
            &self.network,
            &self.config.payoffs,
            self.config.noise,
            &mut self.rng,
        )
    }

    /// Fermi imitation pass over the step-end payoffs.
    pub fn imitate(&mut self) -> usize {
        imitation_step(
            &mut self.population,
            &self.network,
            self.config.beta,
            &mut self.rng,
        )
    }

    /// Resets payoffs and plays the round, returning the step's record.
    ///
    /// Imitation is not applied; call [`Simulation::imitate`] afterwards.
    pub fn play_step(&mut self) -> StepRecord {
        self.reset_payoffs();
        let outcome = self.play_round();
        StepRecord::new(self.current_step, outcome.cooperation_fraction())
    }

    /// One full step: reset, round, imitation. Advances the step counter.
    pub fn step(&mut self) -> StepRecord {
        let record = self.play_step();
        self.imitate();
        self.current_step += 1;
        record
    }

    /// Runs all configured steps, feeding `reporter`, and returns the final mix.
    pub fn run<P: Reporter + ?Sized>(
        &mut self,
        reporter: &mut P,
    ) -> Result<FinalStrategies, OutputError> {
        reporter.begin(&self.config)?;

        while self.current_step < self.config.steps {
            let record = self.play_step();
            reporter.record_step(&record)?;
            let switched = self.imitate();

            if self.current_step % PROGRESS_INTERVAL == 0 {
                debug!(
                    step = record.time,
                    cooperation = record.cooperation,
                    switched,
                    grudged = self.population.grudged_count(),
                    "step progress"
                );
            }
            self.current_step += 1;
        }

        let final_strategies = self.final_strategies();
        reporter.finish(&final_strategies)?;

        info!(
            steps = self.current_step,
            dominant = %final_strategies.dominant(),
            final_strategies = %final_strategies,
            "simulation complete"
        );
        Ok(final_strategies)
    }

    /// Agents per strategy, in [`Strategy::ALL`] order.
    pub fn strategy_counts(&self) -> [usize; Strategy::COUNT] {
        self.population.strategy_counts()
    }

    /// Fraction of the population holding each strategy.
    pub fn final_strategies(&self) -> FinalStrategies {
        FinalStrategies::from_counts(self.strategy_counts(), self.population.len())
    }
}

/// Opens `path`, then runs a simulation built from `config` into it.
///
/// The sink is opened before any draws are made, so an unwritable path fails
/// without doing simulation work.
pub fn run_to_file(
    config: SimConfig,
    format: OutputFormat,
    path: impl AsRef<Path>,
) -> Result<FinalStrategies, SimError> {
    config.validate()?;
    let mut sink = format.open(path)?;
    let mut sim = Simulation::from_config(config)?;
    Ok(sim.run(sink.as_mut())?)
}
