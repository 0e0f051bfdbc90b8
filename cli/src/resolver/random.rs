//! # Index Sources for Greeting Selection
//!
//! File: cli/src/resolver/random.rs
//!
//! The greeting category picks one reply at random. The choice goes through
//! the `IndexSource` trait so callers can pin it: production uses
//! `UniformIndex`, tests use `FixedIndex`, and `laundrybot chat --seed` uses
//! `SeededIndex` for a reproducible session.
//!
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Supplies an index in `0..bound`. Implementations must return 0 when `bound` is 0.
pub trait IndexSource: Send + Sync {
    fn next_index(&self, bound: usize) -> usize;
}

/// Uniform choice backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformIndex;

impl IndexSource for UniformIndex {
    fn next_index(&self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Always yields the same index (wrapped into range).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIndex(pub usize);

impl IndexSource for FixedIndex {
    fn next_index(&self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.0 % bound
    }
}

/// Uniform choice from a seeded generator, so a whole session can be replayed.
#[derive(Debug)]
pub struct SeededIndex {
    rng: Mutex<StdRng>,
}

impl SeededIndex {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IndexSource for SeededIndex {
    fn next_index(&self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        // A poisoned lock still holds a usable generator.
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen_range(0..bound)
    }
}
