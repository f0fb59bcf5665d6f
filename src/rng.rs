use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Serializable random source. Every shuffle forks a fresh generator, so a
/// stored game continues with the same randomness it would have had in memory.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRng {
    seed: u64,
    forks: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, forks: 0 }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn forks(&self) -> u64 {
        self.forks
    }

    /// Independent generator for the next random operation.
    pub fn fork(&mut self) -> StdRng {
        self.forks += 1;
        StdRng::seed_from_u64(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }
}
