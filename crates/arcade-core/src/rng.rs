use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

/// Per-instance randomness source, seeded at `reset`.
///
/// Every stochastic decision a game makes (spawn chance, spawn ranges, food
/// placement, shuffles, easy-mode opponent, maze carving) flows through this
/// handle, so a fixed seed reproduces a run exactly. The RNG is not part of
/// the serialized state snapshot.
#[derive(Debug, Clone)]
pub struct GameRng(StdRng);

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Independent event with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.0.random::<f32>() < p
    }

    /// Uniform draw from the half-open range `lo..hi`.
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        self.0.random_range(lo..hi)
    }

    /// Uniform draw from the half-open range `lo..hi`.
    pub fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        self.0.random_range(lo..hi)
    }

    /// Uniform draw from the half-open range `lo..hi`.
    pub fn range_usize(&mut self, lo: usize, hi: usize) -> usize {
        self.0.random_range(lo..hi)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }

    /// Uniform pick from a slice; `None` when the slice is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }
}
