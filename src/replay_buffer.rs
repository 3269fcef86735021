use ndarray::Array1;
use rand::seq::index;
use rand::Rng;

use crate::error::{MinervaError, Result};

/// One observed interaction with the environment. Immutable once stored;
/// the buffer owns it after insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: Array1<f32>,
    pub action: usize,
    pub reward: f32,
    pub next_state: Array1<f32>,
    pub done: bool,
}

/// Fixed-capacity experience replay with FIFO eviction.
///
/// The backing store is a fixed `Vec` plus a write cursor taken modulo
/// capacity, so appends never reallocate and the oldest transition is
/// overwritten once the buffer is full.
#[derive(Clone, Debug)]
pub struct ReplayBuffer {
    slots: Vec<Transition>,
    capacity: usize,
    cursor: usize,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "replay buffer capacity must be positive");
        ReplayBuffer {
            slots: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    /// Append a transition, evicting the oldest one when full. Never fails.
    pub fn push(&mut self, transition: Transition) {
        if self.slots.len() < self.capacity {
            self.slots.push(transition);
        } else {
            self.slots[self.cursor] = transition;
        }
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    /// Draw `n` transitions uniformly at random without replacement.
    ///
    /// Fails with [`MinervaError::InsufficientData`] when fewer than `n`
    /// transitions are stored; callers gate on a warmup threshold first.
    pub fn sample<R: Rng>(&self, rng: &mut R, n: usize) -> Result<Vec<&Transition>> {
        if n > self.slots.len() {
            return Err(MinervaError::InsufficientData {
                requested: n,
                available: self.slots.len(),
            });
        }
        let picks = index::sample(rng, self.slots.len(), n);
        Ok(picks.into_iter().map(|i| &self.slots[i]).collect())
    }

    /// Iterate over stored transitions, oldest first.
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = &Transition> {
        let split = if self.slots.len() < self.capacity {
            0
        } else {
            self.cursor
        };
        self.slots[split..].iter().chain(self.slots[..split].iter())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
