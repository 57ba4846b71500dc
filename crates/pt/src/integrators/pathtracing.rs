use log::trace;

use crate::{
    camera::{PixelCoord, ViewportCoord},
    color::Rgb,
    math::vec::Vec3SameDirExt,
    sampler::Sampler,
    scene::SceneData,
    shape::{intersect_scene, IntersectionRecord},
    tile::PixelRect,
    Rng,
};

use super::batch::RayBatch;

/// Distance a bounced ray starts from the surface it leaves
pub const BOUNCE_OFFSET: f32 = 1e-4;

/// Where a path stands after a bounce
///
/// Paths that miss every primitive are dropped by [RayBatch::retain_hits] before shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Active,
    TerminatedByRoulette,
    /// The surface does not send light back toward the path
    Absorbed,
    /// The bounce limit is reached
    Exhausted,
}

/// Russian roulette: the weight a surviving path is scaled by, or None if the path is killed
///
/// `xi` is uniform in [0, 1(, the path survives with probability `survival_probability`.
pub fn survival_weight(survival_probability: f32, xi: f32) -> Option<f32> {
    (xi < survival_probability).then(|| 1.0 / survival_probability)
}

/// Unidirectional path tracer with uniform hemisphere sampling and russian roulette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathTracer {
    pub samples_per_pixel: usize,
    pub survival_probability: f32,
    pub max_bounces: Option<u32>,
}

/// Per worker buffers, reused from one pixel to the next
pub struct TileWorkspace {
    batch: RayBatch,
    record: IntersectionRecord,
}

impl TileWorkspace {
    pub fn new(samples_per_pixel: usize) -> Self {
        Self {
            batch: RayBatch::new(samples_per_pixel),
            record: IntersectionRecord::new(samples_per_pixel),
        }
    }
}

impl PathTracer {
    /// Render every pixel of `rect`, in the order the rectangle iterates them
    pub fn render_tile(
        &self,
        scene: &SceneData,
        frame_size: (u32, u32),
        rect: PixelRect,
        rng: &mut Rng,
    ) -> Vec<Rgb> {
        let mut workspace = TileWorkspace::new(self.samples_per_pixel);
        rect.into_iter()
            .map(|(x, y)| self.render_pixel(scene, frame_size, x, y, rng, &mut workspace))
            .collect()
    }

    pub fn render_pixel(
        &self,
        scene: &SceneData,
        (width, height): (u32, u32),
        x: u32,
        y: u32,
        rng: &mut Rng,
        workspace: &mut TileWorkspace,
    ) -> Rgb {
        let TileWorkspace { batch, record } = workspace;
        batch.reset();

        for k in 0..batch.len() {
            let coords = PixelCoord::sample_around(rng, x, y);
            let ViewportCoord { vx, vy } = ViewportCoord::from_pixel_coord(width, height, coords);
            let ray = scene.camera().ray(vx, vy);
            batch.set_ray(k, ray.origin, ray.direction);
        }

        let mut bounce = 0;
        while !batch.is_done() {
            record.reset();
            intersect_scene(
                scene,
                batch.origins(),
                batch.directions(),
                record,
                batch.active(),
            );
            batch.retain_hits(record);

            let active = batch.take_active();
            let mut survivors = Vec::with_capacity(active.len());
            for k in active {
                if self.shade(scene, batch, record, k, bounce, rng) == PathState::Active {
                    survivors.push(k);
                }
            }
            trace!("pixel ({x}, {y}) bounce {bounce}: {} paths left", survivors.len());
            batch.replace_active(survivors);
            bounce += 1;
        }

        batch.average_light()
    }

    /// Collect the emission at the hit of path `k` then bounce it
    fn shade(
        &self,
        scene: &SceneData,
        batch: &mut RayBatch,
        record: &IntersectionRecord,
        k: usize,
        bounce: u32,
        rng: &mut Rng,
    ) -> PathState {
        let material = scene.material(record.material[k]);
        batch.accumulate_light(k, material.emission);

        if self.max_bounces.is_some_and(|max| bounce >= max) {
            return PathState::Exhausted;
        }

        let Some(weight) = survival_weight(self.survival_probability, rng.sample_1d()) else {
            return PathState::TerminatedByRoulette;
        };

        let wo = -batch.direction(k).normalize_or_zero();
        let normal = record.normal.get(k).same_direction(wo);
        let Some(sample) = material.bsdf(normal).sample_f(wo, rng.sample_3d()) else {
            return PathState::Absorbed;
        };

        let cos = sample.wi.dot(normal).abs();
        let factor = sample.f * (cos * weight / sample.pdf);
        if !factor.is_finite() {
            return PathState::Absorbed;
        }

        batch.scale_throughput(k, factor);
        let position = record.position.get(k);
        batch.set_ray(k, position + BOUNCE_OFFSET * sample.wi, sample.wi);
        PathState::Active
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::SeedableRng;

    use super::*;
    use crate::scene::{
        CameraDescription, MaterialDescription, PlaneDescription, SceneDescription,
        SphereDescription,
    };

    #[test]
    fn roulette_is_unbiased() {
        let throughput = Rgb::from_array([0.3, 0.6, 0.9]);
        for p in [0.25, 0.5, 0.75, 1.0] {
            let mut rng = Rng::seed_from_u64(1234);
            let n = 100_000;
            let mut sum = [0.0f64; 3];
            for _ in 0..n {
                if let Some(w) = survival_weight(p, rng.sample_1d()) {
                    let t = (w * throughput).to_array();
                    for c in 0..3 {
                        sum[c] += t[c] as f64;
                    }
                }
            }
            for c in 0..3 {
                let mean = sum[c] / n as f64;
                let expected = throughput.to_array()[c] as f64;
                assert!(
                    (mean - expected).abs() < 0.02 * expected + 1e-3,
                    "{p}: {mean} vs {expected}"
                );
            }
        }
    }

    #[test]
    fn roulette_kills_exactly_the_draws_above_p() {
        assert_eq!(survival_weight(0.75, 0.74), Some(1.0 / 0.75));
        assert_eq!(survival_weight(0.75, 0.75), None);
        assert_eq!(survival_weight(1.0, 0.999_999), Some(1.0));
    }

    fn emissive_sphere_scene() -> SceneData {
        let mut scene = SceneDescription::new();
        let glowing = scene.insert_material(MaterialDescription {
            albedo: Rgb::splat(1.0),
            emission: Rgb::from_array([1.0, 0.5, 0.25]),
            ..Default::default()
        });
        scene.insert_sphere(SphereDescription {
            center: Vec3::ZERO,
            radius: 1.0,
            material: Some(glowing),
        });
        scene.set_camera(CameraDescription {
            from: Vec3::new(0.0, 0.0, -4.0),
            at: Vec3::ZERO,
            aspect_ratio: 1.0,
            hfov: 1.0,
        });
        scene.build().expect("valid scene")
    }

    #[test]
    fn convex_emitter_without_roulette_shows_its_emission() {
        let scene = emissive_sphere_scene();
        let tracer = PathTracer {
            samples_per_pixel: 1,
            survival_probability: 1.0,
            max_bounces: None,
        };
        let mut rng = Rng::seed_from_u64(9);
        let mut workspace = TileWorkspace::new(1);

        let center = tracer.render_pixel(&scene, (16, 16), 8, 8, &mut rng, &mut workspace);
        let expected = [1.0, 0.5, 0.25];
        for (c, e) in center.to_array().into_iter().zip(expected) {
            assert!((c - e).abs() < 1e-2, "{center:?}");
        }

        let corner = tracer.render_pixel(&scene, (16, 16), 0, 0, &mut rng, &mut workspace);
        assert!(corner.is_black());
    }

    #[test]
    fn closed_scene_ends_with_bounce_limit() {
        let mut scene = SceneDescription::new();
        let light = scene.insert_material(MaterialDescription {
            emission: Rgb::splat(1.0),
            albedo: Rgb::splat(0.0),
            ..Default::default()
        });
        // a box around the camera: no ray can escape
        for normal in [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z] {
            scene.insert_plane(PlaneDescription {
                point: -normal,
                normal,
                width: 2.5,
                height: 2.5,
                material: Some(light),
            });
        }
        let scene = scene.build().expect("valid scene");
        let tracer = PathTracer {
            samples_per_pixel: 4,
            survival_probability: 1.0,
            max_bounces: Some(3),
        };
        let mut rng = Rng::seed_from_u64(2);
        let pixels = tracer.render_tile(
            &scene,
            (2, 2),
            PixelRect {
                min_x: 0,
                min_y: 0,
                max_x: 1,
                max_y: 1,
            },
            &mut rng,
        );
        assert_eq!(pixels.len(), 4);
        for pixel in pixels {
            // black albedo: only the first hit contributes
            assert_eq!(pixel.to_array(), [1.0, 1.0, 1.0]);
        }
    }

    #[test]
    fn same_stream_same_pixels() {
        let scene = emissive_sphere_scene();
        let tracer = PathTracer {
            samples_per_pixel: 8,
            survival_probability: 0.75,
            max_bounces: None,
        };
        let rect = PixelRect {
            min_x: 4,
            min_y: 4,
            max_x: 11,
            max_y: 11,
        };
        let a = tracer.render_tile(&scene, (16, 16), rect, &mut Rng::seed_from_u64(5));
        let b = tracer.render_tile(&scene, (16, 16), rect, &mut Rng::seed_from_u64(5));
        assert_eq!(a, b);
        assert!(a.iter().all(|c| c.is_finite()));
    }
}
