//! Per-step systems, run in order: payoff reset, round, imitation.

pub mod action;
pub mod imitation;
pub mod round;

pub use action::choose_action;
pub use imitation::{fermi_probability, imitation_step};
pub use round::{interact, play_round, Interaction, RoundOutcome};
