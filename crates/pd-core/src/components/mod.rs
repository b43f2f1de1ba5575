//! Simulation state: agents, the interaction network, and the payoff matrix.

pub mod agent;
pub mod network;
pub mod payoff;

pub use agent::{Agent, Population};
pub use network::Network;
pub use payoff::PayoffMatrix;
