//! Imitation System
//!
//! Fermi-rule strategy copying. Agents are visited in index order and each
//! update is written immediately, so later agents may copy a strategy that
//! changed earlier in the same pass.

use crate::components::{Network, Population};
use crate::rng::RandomSource;

/// Probability that an agent with `own` payoff copies a neighbor with `other`.
///
/// `1 / (1 + exp(-beta * (other - own)))`; exactly 0.5 at equal payoffs.
pub fn fermi_probability(beta: f64, own: f64, other: f64) -> f64 {
    1.0 / (1.0 + (-beta * (other - own)).exp())
}

/// Runs one imitation pass and returns how many agents changed strategy.
///
/// Per agent: one `uniform_int(degree)` to pick a neighbor slot, then one
/// `uniform_real` for the accept test.
pub fn imitation_step<R: RandomSource>(
    population: &mut Population,
    network: &Network,
    beta: f64,
    rng: &mut R,
) -> usize {
    let mut switched = 0;
    for i in 0..population.len() {
        let j = network.neighbor(i, rng.uniform_int(network.degree()));
        let prob = fermi_probability(beta, population[i].payoff, population[j].payoff);

        if rng.uniform_real() < prob {
            let strategy = population[j].strategy;
            if population[i].strategy != strategy {
                switched += 1;
            }
            population[i].strategy = strategy;
        }
    }
    switched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use pd_events::Strategy;

    #[test]
    fn test_fermi_probability() {
        assert_eq!(fermi_probability(1.0, 2.0, 2.0), 0.5);
        assert!(fermi_probability(1.0, 0.0, 10.0) > 0.99);
        assert!(fermi_probability(1.0, 10.0, 0.0) < 0.01);
        assert_eq!(fermi_probability(0.0, 0.0, 100.0), 0.5);
        // Large gaps saturate instead of producing NaN
        assert_eq!(fermi_probability(1.0, 0.0, 1.0e6), 1.0);
        assert_eq!(fermi_probability(1.0, 1.0e6, 0.0), 0.0);
    }

    #[test]
    fn test_imitation_picks_slot_and_accepts() {
        let mut population = Population::from_strategies([
            Strategy::AlwaysCooperate,
            Strategy::AlwaysDefect,
            Strategy::Grudger,
        ]);
        population[0].payoff = 0.0;
        population[1].payoff = 5.0;
        population[2].payoff = 0.0;
        let network = Network::from_lists(2, &[vec![2, 1], vec![0, 0], vec![2, 2]]).unwrap();

        // Agent 0 picks slot 1 (agent 1) and accepts; agent 1 picks agent 0 and
        // rejects; agent 2 picks itself and accepts.
        let mut rng = ScriptedRng::new(vec![0.1, 0.9, 0.1], vec![1, 0, 0]);
        let switched = imitation_step(&mut population, &network, 1.0, &mut rng);

        assert_eq!(population[0].strategy, Strategy::AlwaysDefect);
        assert_eq!(population[1].strategy, Strategy::AlwaysDefect);
        assert_eq!(population[2].strategy, Strategy::Grudger);
        assert_eq!(switched, 1);
        assert_eq!(rng.ints_drawn(), 3);
        assert_eq!(rng.reals_drawn(), 3);
    }

    #[test]
    fn test_imitation_sees_earlier_updates() {
        // Agent 0 copies agent 1's ALLD, then agent 1 copies agent 0 which is now ALLD.
        let mut population =
            Population::from_strategies([Strategy::TitForTat, Strategy::AlwaysDefect]);
        let network = Network::from_lists(1, &[vec![1], vec![0]]).unwrap();
        let mut rng = ScriptedRng::new(vec![0.0], vec![0]);
        imitation_step(&mut population, &network, 1.0, &mut rng);
        assert_eq!(population[0].strategy, Strategy::AlwaysDefect);
        assert_eq!(population[1].strategy, Strategy::AlwaysDefect);
    }
}
