use glam::Vec3;

use crate::{
    material::MaterialId,
    math::{
        float::{is_almost_zero, RAY_EPSILON},
        transform::Frame,
        vec::Vec3AsNonZero,
    },
    soa::Vec3Soa,
};

use super::IntersectionRecord;

/// A rectangle centered on `point`
///
/// The width is measured along the tangent of `Frame::new(normal)`, the height
/// along its bitangent. Infinite extents make an infinite plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
    pub width: f32,
    pub height: f32,
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

impl Plane {
    /// `normal` is expected to be normalized
    pub fn new(point: Vec3, normal: Vec3, width: f32, height: f32) -> Self {
        let frame = Frame::new(normal);
        Self {
            point,
            normal,
            width,
            height,
            tangent: frame.x(),
            bitangent: frame.y(),
        }
    }

    fn contains(&self, position: Vec3) -> bool {
        let local = position - self.point;
        local.dot(self.tangent).abs() <= 0.5 * self.width
            && local.dot(self.bitangent).abs() <= 0.5 * self.height
    }

    /// Distance along the ray to the rectangle
    ///
    /// A ray parallel to the plane only hits it, at `t = 0`, when it starts exactly on `point`.
    /// Parallelism is judged on the cosine, whatever the length of `direction`.
    pub fn hit_distance(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let direction = direction.into_non_zero(RAY_EPSILON)?;
        let to_origin = origin - self.point;
        let denom = direction.dot(self.normal);

        let t = if is_almost_zero(denom / direction.length()) {
            if to_origin == Vec3::ZERO {
                0.0
            } else {
                return None;
            }
        } else {
            -to_origin.dot(self.normal) / denom
        };

        (t >= 0.0 && self.contains(origin + t * direction)).then_some(t)
    }
}

pub fn intersect_plane(
    origins: &Vec3Soa,
    directions: &Vec3Soa,
    plane: &Plane,
    material: MaterialId,
    record: &mut IntersectionRecord,
    active: &[usize],
) {
    for &k in active {
        let origin = origins.get(k);
        let direction = directions.get(k);
        let Some(t) = plane.hit_distance(origin, direction) else {
            continue;
        };
        if !record.is_closer(k, t) {
            continue;
        }

        record.record(k, t, origin + t * direction, plane.normal, material);
    }
}
