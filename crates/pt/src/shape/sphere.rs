use glam::Vec3;

use crate::{
    material::MaterialId,
    math::{float::RAY_EPSILON, vec::Vec3AsNonZero},
    soa::Vec3Soa,
};

use super::IntersectionRecord;

/// A simple sphere shape, normals are pointing outwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Distance along the ray to the first intersection in front of the origin
    ///
    /// The direction does not have to be normalized, `t` is expressed in units of `direction`.
    pub fn hit_distance(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let direction = direction.into_non_zero(RAY_EPSILON)?;
        let a = direction.length_squared();
        let oc = origin - self.center;

        // t^2 + u t + v = 0
        let u = 2.0 * oc.dot(direction) / a;
        let v = (oc.length_squared() - self.radius * self.radius) / a;

        let half_u = 0.5 * u;
        let discriminant_quarter = half_u * half_u - v;
        if !(discriminant_quarter >= 0.0) {
            return None;
        }
        let sq = f32::sqrt(discriminant_quarter);

        let in_front = |t: f32| if t >= 0.0 { t } else { f32::INFINITY };
        let t = f32::min(in_front(-half_u - sq), in_front(-half_u + sq));
        t.is_finite().then_some(t)
    }
}

pub fn intersect_sphere(
    origins: &Vec3Soa,
    directions: &Vec3Soa,
    sphere: &Sphere,
    material: MaterialId,
    record: &mut IntersectionRecord,
    active: &[usize],
) {
    for &k in active {
        let origin = origins.get(k);
        let direction = directions.get(k);
        let Some(t) = sphere.hit_distance(origin, direction) else {
            continue;
        };
        if !record.is_closer(k, t) {
            continue;
        }

        let position = origin + t * direction;
        let normal = (position - sphere.center).normalize_or_zero();
        record.record(k, t, position, normal, material);
    }
}
