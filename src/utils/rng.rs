use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hands out the stall impulse RNG for each plane.
///
/// Two planes sharing a config seed still draw different impulses, and the
/// same plane draws the same impulses on every run.
#[derive(Debug, Clone, Copy)]
pub struct RngManager {
    seed: u64,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn plane_rng(&self, plane: &str) -> ChaCha8Rng {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        plane.hash(&mut hasher);
        ChaCha8Rng::seed_from_u64(hasher.finish())
    }
}
