//! World Setup
//!
//! Initialization of the interaction network and the population. Call order
//! matters: the network consumes its draws first, then the agents.

pub mod agents;
pub mod network;

pub use agents::{init_agents, InitSummary};
pub use network::build_network;
