//! Random fixed-degree network construction.

use crate::components::Network;
use crate::rng::RandomSource;

/// Draws `degree` neighbors for every agent, agent-major then slot order.
///
/// Each neighbor is an independent `uniform_int(n_agents)` draw, so self-links
/// and duplicates occur. Consumes exactly `n_agents * degree` draws.
pub fn build_network<R: RandomSource>(rng: &mut R, n_agents: usize, degree: usize) -> Network {
    let mut slots = Vec::with_capacity(n_agents * degree);
    for _ in 0..n_agents {
        for _ in 0..degree {
            slots.push(rng.uniform_int(n_agents));
        }
    }
    Network::from_slots(degree, slots)
}
