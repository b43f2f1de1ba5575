//! Round System
//!
//! Plays every directed interaction slot once per step, in agent-major then
//! slot order. Later interactions see the `last_action` and `grudged` state
//! written by earlier ones in the same step.

use pd_events::Action;

use crate::components::{Network, PayoffMatrix, Population};
use crate::rng::RandomSource;
use crate::systems::action::choose_action;

/// Realized actions of one interaction, after noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub first: usize,
    pub second: usize,
    pub first_action: Action,
    pub second_action: Action,
}

/// Totals for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundOutcome {
    /// Slots where the initiating agent cooperated
    pub cooperations: usize,
    /// Slots played (`agents * degree`)
    pub slots: usize,
}

impl RoundOutcome {
    /// Cooperation fraction. Only the initiating side of each slot counts.
    pub fn cooperation_fraction(&self) -> f64 {
        if self.slots == 0 {
            0.0
        } else {
            self.cooperations as f64 / self.slots as f64
        }
    }
}

/// Plays one interaction between agents `i` and `j`.
///
/// Always consumes two `uniform_real` draws (one per side) for noise, even
/// when `noise` is zero.
pub fn interact<R: RandomSource>(
    population: &mut Population,
    payoffs: &PayoffMatrix,
    noise: f64,
    rng: &mut R,
    i: usize,
    j: usize,
) -> Interaction {
    let mut ai = choose_action(&population[i], &population[j]);
    let mut aj = choose_action(&population[j], &population[i]);

    if rng.uniform_real() < noise {
        ai = ai.flip();
    }
    if rng.uniform_real() < noise {
        aj = aj.flip();
    }

    // Grudges land on the victim of a defection
    if ai.is_defect() {
        population[j].hold_grudge();
    }
    if aj.is_defect() {
        population[i].hold_grudge();
    }

    let (pi, pj) = payoffs.outcome(ai, aj);
    population[i].payoff += pi;
    population[j].payoff += pj;

    population[i].last_action = ai;
    population[j].last_action = aj;

    Interaction {
        first: i,
        second: j,
        first_action: ai,
        second_action: aj,
    }
}

/// Plays every slot of the network once. Payoffs must already be reset.
pub fn play_round<R: RandomSource>(
    population: &mut Population,
    network: &Network,
    payoffs: &PayoffMatrix,
    noise: f64,
    rng: &mut R,
) -> RoundOutcome {
    let mut outcome = RoundOutcome {
        cooperations: 0,
        slots: network.slot_count(),
    };
    for i in 0..network.len() {
        for &j in network.neighbors(i) {
            let interaction = interact(population, payoffs, noise, rng, i, j);
            if interaction.first_action.is_cooperate() {
                outcome.cooperations += 1;
            }
        }
    }
    outcome
}
