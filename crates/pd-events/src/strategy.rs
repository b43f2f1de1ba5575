//! Strategy and Action Types
//!
//! The behavioral rules an agent can follow and the two moves of the game.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral rule an agent uses to pick its move.
///
/// Variant order is significant: it is the index space of the initial
/// `uniform_int(4)` draw and the column order of the final summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Cooperate unconditionally
    AlwaysCooperate,
    /// Defect unconditionally
    AlwaysDefect,
    /// Mirror the partner's last recorded action
    TitForTat,
    /// Cooperate until defected against, then defect forever
    Grudger,
}

impl Strategy {
    /// All strategies in index order.
    pub const ALL: [Strategy; 4] = [
        Strategy::AlwaysCooperate,
        Strategy::AlwaysDefect,
        Strategy::TitForTat,
        Strategy::Grudger,
    ];

    /// Number of distinct strategies.
    pub const COUNT: usize = 4;

    /// Maps a draw in `[0, COUNT)` to a strategy. Out-of-range values wrap.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// Position of this strategy in [`Strategy::ALL`].
    pub fn index(self) -> usize {
        match self {
            Strategy::AlwaysCooperate => 0,
            Strategy::AlwaysDefect => 1,
            Strategy::TitForTat => 2,
            Strategy::Grudger => 3,
        }
    }

    /// Short code used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::AlwaysCooperate => "ALLC",
            Strategy::AlwaysDefect => "ALLD",
            Strategy::TitForTat => "TFT",
            Strategy::Grudger => "GRUD",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single move in one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Cooperate,
    Defect,
}

impl Action {
    /// The opposite move (execution error).
    pub fn flip(self) -> Self {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }

    pub fn is_cooperate(self) -> bool {
        self == Action::Cooperate
    }

    pub fn is_defect(self) -> bool {
        self == Action::Defect
    }
}
