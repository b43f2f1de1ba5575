//! Interaction Network
//!
//! Each agent has exactly `degree` ordered neighbor slots. Self-links and
//! repeated neighbors are allowed.

use serde::{Deserialize, Serialize};

/// Static adjacency built once at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    degree: usize,
    /// Row-major: neighbors of agent `i` are `slots[i * degree..(i + 1) * degree]`
    slots: Vec<usize>,
}

impl Network {
    /// Builds a network from explicit neighbor lists.
    ///
    /// Returns `None` if any list has a length other than `degree`.
    pub fn from_lists(degree: usize, lists: &[Vec<usize>]) -> Option<Self> {
        let mut slots = Vec::with_capacity(lists.len() * degree);
        for list in lists {
            if list.len() != degree {
                return None;
            }
            slots.extend_from_slice(list);
        }
        Some(Self { degree, slots })
    }

    pub(crate) fn from_slots(degree: usize, slots: Vec<usize>) -> Self {
        debug_assert!(degree == 0 || slots.len() % degree == 0);
        Self { degree, slots }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of agents covered.
    pub fn len(&self) -> usize {
        if self.degree == 0 {
            0
        } else {
            self.slots.len() / self.degree
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ordered neighbor slots of `agent`.
    pub fn neighbors(&self, agent: usize) -> &[usize] {
        &self.slots[agent * self.degree..(agent + 1) * self.degree]
    }

    /// Neighbor in a single slot.
    pub fn neighbor(&self, agent: usize, slot: usize) -> usize {
        self.slots[agent * self.degree + slot]
    }

    /// Total directed interaction slots (`agents * degree`).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// True if every neighbor index is below `population`.
    pub fn is_within(&self, population: usize) -> bool {
        self.slots.iter().all(|&j| j < population)
    }
}
