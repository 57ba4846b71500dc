use crate::{math::vec::Vec3, ray::Ray, sampler::Sampler, Rng};

/// A pinhole camera
///
/// Rays leave `eye` toward the image plane spanned by `u` (left to right) and
/// `v` (bottom to top) from its lower left `corner`, all relative to `eye`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub corner: Vec3,
    pub u: Vec3,
    pub v: Vec3,
}

impl Default for PerspectiveCamera {
    /// Looking toward +z from the origin with a one radian horizontal field of view
    fn default() -> Self {
        Self::look_at(Vec3::ZERO, Vec3::Z, 1.0, 1.0)
    }
}

impl PerspectiveCamera {
    /// `aspect_ratio` is width / height and `hfov` the horizontal field of view, in radians
    pub fn look_at(from: Vec3, at: Vec3, aspect_ratio: f32, hfov: f32) -> Self {
        let dir = (at - from).normalize_or_zero();

        // Looking straight up or down, Y can't be used as the up vector
        let up = if dir.cross(Vec3::Y).length_squared() > 1e-8 {
            Vec3::Y
        } else {
            Vec3::Z
        };

        let u = dir.cross(up).normalize_or_zero();
        let v = u.cross(dir);

        let width = 2.0 * f32::tan(0.5 * hfov);
        let u = width * u;
        let v = (width / aspect_ratio) * v;

        Self {
            eye: from,
            corner: dir - 0.5 * u - 0.5 * v,
            u,
            v,
        }
    }

    /// Map a point of the unit image plane to a ray, (0, 0) being the lower left corner
    pub fn ray(&self, x: f32, y: f32) -> Ray {
        Ray::new(self.eye, self.corner + x * self.u + y * self.v)
    }
}

/// Represent a coordinate in the pixel space.
///
/// $\left(0, 0\right)$ is the bottom left corner, a pixel $(i, j)$ covers
/// $\left[i, i+1\right[ \times \left[j, j+1\right[$
#[derive(Debug, Clone, Copy)]
pub struct PixelCoord {
    pub x: f32,
    pub y: f32,
}

impl PixelCoord {
    /// Sample a point uniformly inside the pixel located at `(x, y)`
    pub fn sample_around(rng: &mut Rng, x: u32, y: u32) -> PixelCoord {
        let [dx, dy] = rng.sample_2d().0;
        PixelCoord {
            x: x as f32 + dx,
            y: y as f32 + dy,
        }
    }
}

/// Represent a coordinate in the viewport space.
///
/// The viewport is mapped to the range $\left[0, 1\right]$ for both `vx` and `vy`.
#[derive(Debug, Clone, Copy)]
pub struct ViewportCoord {
    pub vx: f32,
    pub vy: f32,
}

impl ViewportCoord {
    // Convert a coordinate in pixel space into viewport space
    pub fn from_pixel_coord(width: u32, height: u32, coord: PixelCoord) -> Self {
        Self {
            vx: coord.x / width as f32,
            vy: coord.y / height as f32,
        }
    }
}
