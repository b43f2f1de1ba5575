//! Prisoner's Dilemma payoff matrix.

use pd_events::Action;
use serde::{Deserialize, Serialize};

/// Payoffs for the four outcomes of one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffMatrix {
    /// Both cooperate
    pub reward: f64,
    /// Defect against a cooperator
    pub temptation: f64,
    /// Cooperate against a defector
    pub sucker: f64,
    /// Both defect
    pub punishment: f64,
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self {
            reward: 3.0,
            temptation: 5.0,
            sucker: 0.0,
            punishment: 1.0,
        }
    }
}

impl PayoffMatrix {
    /// Payoffs `(first, second)` for a pair of actions.
    pub fn outcome(&self, first: Action, second: Action) -> (f64, f64) {
        match (first, second) {
            (Action::Cooperate, Action::Cooperate) => (self.reward, self.reward),
            (Action::Cooperate, Action::Defect) => (self.sucker, self.temptation),
            (Action::Defect, Action::Cooperate) => (self.temptation, self.sucker),
            (Action::Defect, Action::Defect) => (self.punishment, self.punishment),
        }
    }
}
