use glam::Vec3;

use crate::{color::Rgb, shape::IntersectionRecord, soa::Vec3Soa};

/// The paths of every sample of one pixel, traced together
///
/// Paths not in the active list are done: their light is final.
#[derive(Debug, Clone)]
pub struct RayBatch {
    origins: Vec3Soa,
    directions: Vec3Soa,
    throughput: Vec<Rgb>,
    light: Vec<Rgb>,
    active: Vec<usize>,
}

impl RayBatch {
    pub fn new(len: usize) -> Self {
        Self {
            origins: Vec3Soa::new(len),
            directions: Vec3Soa::new(len),
            throughput: vec![Rgb::splat(1.0); len],
            light: vec![Rgb::splat(0.0); len],
            active: (0..len).collect(),
        }
    }

    /// Start over with fresh paths, keeping the allocations
    pub fn reset(&mut self) {
        self.throughput.fill(Rgb::splat(1.0));
        self.light.fill(Rgb::splat(0.0));
        self.active.clear();
        self.active.extend(0..self.len());
    }

    pub fn len(&self) -> usize {
        self.light.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn origins(&self) -> &Vec3Soa {
        &self.origins
    }

    pub fn directions(&self) -> &Vec3Soa {
        &self.directions
    }

    pub fn origin(&self, k: usize) -> Vec3 {
        self.origins.get(k)
    }

    pub fn direction(&self, k: usize) -> Vec3 {
        self.directions.get(k)
    }

    pub fn throughput(&self, k: usize) -> Rgb {
        self.throughput[k]
    }

    pub fn light(&self, k: usize) -> Rgb {
        self.light[k]
    }

    pub fn set_ray(&mut self, k: usize, origin: Vec3, direction: Vec3) {
        self.origins.set(k, origin);
        self.directions.set(k, direction);
    }

    pub fn scale_throughput(&mut self, k: usize, factor: Rgb) {
        self.throughput[k] *= factor;
    }

    /// Adds the light reaching the camera through path `k` from a surface emitting `emission`
    ///
    /// Has to happen before the throughput accounts for the next bounce.
    pub fn accumulate_light(&mut self, k: usize, emission: Rgb) {
        self.light[k] += self.throughput[k] * emission;
    }

    pub fn active(&self) -> &[usize] {
        &self.active
    }

    /// Drop the paths that hit nothing, keeping the order of the others
    pub fn retain_hits(&mut self, record: &IntersectionRecord) {
        self.active.retain(|&k| record.hit[k]);
    }

    /// Hand the active list over, to be rebuilt with [Self::replace_active]
    pub fn take_active(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.active)
    }

    pub fn replace_active(&mut self, active: Vec<usize>) {
        debug_assert!(active.iter().all(|&k| k < self.len()));
        debug_assert!({
            let mut sorted = active.clone();
            sorted.sort_unstable();
            sorted.windows(2).all(|w| w[0] != w[1])
        });
        self.active = active;
    }

    pub fn is_done(&self) -> bool {
        self.active.is_empty()
    }

    /// Box filter over the samples
    pub fn average_light(&self) -> Rgb {
        if self.is_empty() {
            return Rgb::splat(0.0);
        }
        let sum = self
            .light
            .iter()
            .fold(Rgb::splat(0.0), |acc, &light| acc + light);
        sum / self.len() as f32
    }
}
