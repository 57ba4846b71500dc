//! Per tile pseudorandom streams.
//!
//! Every stream is the root xoshiro256** generator advanced by a number of
//! `jump()`, each one skipping 2^128 draws. Stream `k` only depends on the
//! root seed and `k`, so a render is reproducible whatever the order tiles
//! are dispatched in.

use rand::{distributions::Standard, prelude::Distribution, SeedableRng};

use crate::{math::distributions::Samples, Rng};

pub const DEFAULT_SEED: u64 = 19791102;

pub fn root_stream(seed: u64) -> Rng {
    Rng::seed_from_u64(seed)
}

/// Yields the streams of tiles 0, 1, 2, ... in order, one jump per stream
#[derive(Clone, Debug)]
pub struct TileStreams {
    next: Rng,
}

impl TileStreams {
    pub fn new(seed: u64) -> Self {
        Self {
            next: root_stream(seed),
        }
    }
}

impl Iterator for TileStreams {
    type Item = Rng;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.clone();
        self.next.jump();
        Some(current)
    }
}

pub trait Sampler {
    /// Uniform in [0, 1(
    fn sample_1d(&mut self) -> f32;

    fn sample_2d(&mut self) -> Samples<2> {
        Samples([self.sample_1d(), self.sample_1d()])
    }

    fn sample_3d(&mut self) -> Samples<3> {
        Samples([self.sample_1d(), self.sample_1d(), self.sample_1d()])
    }
}

impl Sampler for Rng {
    fn sample_1d(&mut self) -> f32 {
        Standard.sample(self)
    }
}
