//! Agent Spawning
//!
//! Assigns each agent a uniformly random initial strategy.

use pd_events::Strategy;
use serde::Serialize;

use crate::components::Population;
use crate::rng::RandomSource;

/// Draws one `uniform_int(4)` per agent, in index order.
pub fn init_agents<R: RandomSource>(rng: &mut R, n_agents: usize) -> Population {
    Population::from_strategies(
        (0..n_agents).map(|_| Strategy::from_index(rng.uniform_int(Strategy::COUNT))),
    )
}

/// Summary of the initial strategy mix
#[derive(Debug, Clone, Serialize)]
pub struct InitSummary {
    pub total_agents: usize,
    pub by_strategy: Vec<(Strategy, usize)>,
}

impl InitSummary {
    pub fn from_population(population: &Population) -> Self {
        let counts = population.strategy_counts();
        Self {
            total_agents: population.len(),
            by_strategy: Strategy::ALL
                .iter()
                .map(|s| (*s, counts[s.index()]))
                .collect(),
        }
    }
}
