//! Batched ray / primitive intersection.
//!
//! Every test takes the whole batch as structure of arrays plus the list of
//! rays still in flight, and only ever makes the [IntersectionRecord] closer:
//! a slot is overwritten only by a hit with a strictly smaller `t`.

pub mod plane;
pub mod sphere;

pub use plane::{intersect_plane, Plane};
pub use sphere::{intersect_sphere, Sphere};

use glam::Vec3;

use crate::{material::MaterialId, scene::SceneData, soa::Vec3Soa};

/// Nearest hit found so far for each ray of a batch
#[derive(Debug, Clone)]
pub struct IntersectionRecord {
    pub hit: Vec<bool>,
    pub t: Vec<f32>,
    pub position: Vec3Soa,
    pub normal: Vec3Soa,
    pub material: Vec<MaterialId>,
}

impl IntersectionRecord {
    pub fn new(len: usize) -> Self {
        Self {
            hit: vec![false; len],
            t: vec![f32::INFINITY; len],
            position: Vec3Soa::new(len),
            normal: Vec3Soa::new(len),
            material: vec![MaterialId::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every hit
    pub fn reset(&mut self) {
        self.hit.fill(false);
        self.t.fill(f32::INFINITY);
    }

    /// Whether a hit at `t` would be closer than what is recorded for ray `k`
    pub fn is_closer(&self, k: usize, t: f32) -> bool {
        t < self.t[k]
    }

    pub fn record(
        &mut self,
        k: usize,
        t: f32,
        position: Vec3,
        normal: Vec3,
        material: MaterialId,
    ) {
        self.hit[k] = true;
        self.t[k] = t;
        self.position.set(k, position);
        self.normal.set(k, normal);
        self.material[k] = material;
    }
}

/// Test every primitive of the scene against every active ray
pub fn intersect_scene(
    scene: &SceneData,
    origins: &Vec3Soa,
    directions: &Vec3Soa,
    record: &mut IntersectionRecord,
    active: &[usize],
) {
    for (sphere, material) in scene.spheres().iter() {
        intersect_sphere(origins, directions, &sphere, material, record, active);
    }
    for (plane, material) in scene.planes().iter() {
        intersect_plane(origins, directions, &plane, material, record, active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{PlaneDescription, SceneDescription, SphereDescription};

    #[test]
    fn reset_forgets_hits() {
        let mut record = IntersectionRecord::new(2);
        record.record(1, 2.0, Vec3::ONE, Vec3::Y, MaterialId(3));
        assert!(record.hit[1]);
        assert!(!record.is_closer(1, 2.0));
        record.reset();
        assert!(!record.hit[1]);
        assert_eq!(record.t[1], f32::INFINITY);
    }

    #[test]
    fn nearest_primitive_wins_whatever_the_order() {
        let mut scene = SceneDescription::new();
        let far = scene.insert_material(Default::default());
        let near = scene.insert_material(Default::default());
        scene.insert_plane(PlaneDescription {
            point: Vec3::new(0.0, 0.0, 5.0),
            normal: -Vec3::Z,
            material: Some(far),
            ..Default::default()
        });
        scene.insert_sphere(SphereDescription {
            center: Vec3::new(0.0, 0.0, 2.0),
            radius: 0.5,
            material: Some(near),
        });
        let scene = scene.build().expect("valid scene");

        let origins = Vec3Soa::splat(2, Vec3::ZERO);
        let directions: Vec3Soa = [Vec3::Z, Vec3::new(1.0, 0.0, 1.0)].into_iter().collect();
        let mut record = IntersectionRecord::new(2);
        intersect_scene(&scene, &origins, &directions, &mut record, &[0, 1]);

        assert!(record.hit[0] && record.hit[1]);
        assert_eq!(record.material[0], near);
        assert!((record.t[0] - 1.5).abs() < 1e-5);
        assert_eq!(record.material[1], far);
        assert!((record.position.get(1) - Vec3::new(5.0, 0.0, 5.0)).length() < 1e-4);
    }
}
