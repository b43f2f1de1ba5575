//! Shared record types and serialization for the network dilemma simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for the engine crate and for anything that reads its output.

pub mod record;
pub mod strategy;

// Re-export strategy types
pub use strategy::{Action, Strategy};

// Re-export record types
pub use record::{FinalStrategies, RunSummary, StepRecord, CSV_HEADER, FINAL_MARKER};
