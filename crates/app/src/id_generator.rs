//! In-process random id generator.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::IdGenerator;

/// Default size of the id space: candidates are drawn from `0..1000`.
pub const DEFAULT_ID_SPACE: u32 = 1000;

/// Draws short numeric ids from a bounded range.
///
/// The range is kept small on purpose so ids stay short. With many resources
/// in one collection, most draws collide and the caller's retry budget is what
/// eventually gives up.
pub struct RandomIdGenerator {
    rng: Mutex<StdRng>,
    space: u32,
}

impl RandomIdGenerator {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic generator, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Change the upper bound (exclusive) of the drawn range.
    ///
    /// A zero bound is raised to one.
    #[must_use]
    pub fn with_space(mut self, space: u32) -> Self {
        self.space = space.max(1);
        self
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            space: DEFAULT_ID_SPACE,
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..self.space).to_string()
    }
}
