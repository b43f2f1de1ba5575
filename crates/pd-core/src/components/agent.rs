//! Agent Components
//!
//! Per-agent mutable state and the ordered population that holds it.

use pd_events::{Action, Strategy};
use serde::{Deserialize, Serialize};

/// One member of the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Current behavioral rule
    pub strategy: Strategy,
    /// Action this agent took in its most recent interaction, with anyone
    pub last_action: Action,
    /// Latched once any partner has defected against this agent
    pub grudged: bool,
    /// Payoff accumulated during the current step
    pub payoff: f64,
}

impl Agent {
    /// Fresh agent: cooperated last, holds no grudge, zero payoff.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            last_action: Action::Cooperate,
            grudged: false,
            payoff: 0.0,
        }
    }

    /// Marks this agent as having been defected against. Never cleared.
    pub fn hold_grudge(&mut self) {
        self.grudged = true;
    }
}

/// Fixed-size, index-addressed collection of agents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// Population where every agent starts with the same strategy.
    pub fn uniform(size: usize, strategy: Strategy) -> Self {
        Self::from_strategies(std::iter::repeat(strategy).take(size))
    }

    pub fn from_strategies(strategies: impl IntoIterator<Item = Strategy>) -> Self {
        Self {
            agents: strategies.into_iter().map(Agent::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    /// Sets every payoff accumulator back to zero.
    pub fn reset_payoffs(&mut self) {
        for agent in &mut self.agents {
            agent.payoff = 0.0;
        }
    }

    /// Number of agents per strategy, in [`Strategy::ALL`] order.
    pub fn strategy_counts(&self) -> [usize; Strategy::COUNT] {
        let mut counts = [0; Strategy::COUNT];
        for agent in &self.agents {
            counts[agent.strategy.index()] += 1;
        }
        counts
    }

    pub fn grudged_count(&self) -> usize {
        self.agents.iter().filter(|a| a.grudged).count()
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Agent;

    fn index(&self, index: usize) -> &Agent {
        &self.agents[index]
    }
}

impl std::ops::IndexMut<usize> for Population {
    fn index_mut(&mut self, index: usize) -> &mut Agent {
        &mut self.agents[index]
    }
}
