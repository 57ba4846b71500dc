use glam::Vec3;

use crate::{color::Rgb, math::float::FloatAsExt};

/// Oren-Nayar rough diffuse reflection
///
/// `sigma` is the standard deviation of the microfacet angles, in radians.
/// With `sigma = 0` this is exactly Lambertian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrenNayar {
    pub albedo: Rgb,
    a: f32,
    b: f32,
}

/// Below this sine, a direction is considered to be the pole and its azimuth is meaningless
const POLE_SIN_THRESHOLD: f32 = 1e-4;

impl OrenNayar {
    pub fn new(albedo: Rgb, sigma: f32) -> Self {
        let s2 = sigma * sigma;
        Self {
            albedo,
            a: 1.0 - s2 / (2.0 * (s2 + 0.33)),
            b: 0.45 * s2 / (s2 + 0.09),
        }
    }

    pub fn f(&self, wi: Vec3, wo: Vec3) -> Rgb {
        if wi.z * wo.z <= 0.0 {
            return Rgb::splat(0.0);
        }
        let lambert = std::f32::consts::FRAC_1_PI * self.albedo;
        if self.b == 0.0 {
            return lambert;
        }

        let cos_i = wi.z.clamp_unit().abs();
        let cos_o = wo.z.clamp_unit().abs();
        let sin_i = f32::sqrt(f32::max(0.0, 1.0 - cos_i * cos_i));
        let sin_o = f32::sqrt(f32::max(0.0, 1.0 - cos_o * cos_o));

        // cos(phi_i - phi_o) = cos phi_i cos phi_o + sin phi_i sin phi_o
        let cos_dphi = if sin_i > POLE_SIN_THRESHOLD && sin_o > POLE_SIN_THRESHOLD {
            ((wi.x * wo.x + wi.y * wo.y) / (sin_i * sin_o)).clamp_unit()
        } else {
            0.0
        };

        // alpha is the largest angle, beta the smallest
        let (sin_alpha, tan_beta) = if cos_i > cos_o {
            (sin_o, sin_i / cos_i)
        } else {
            (sin_i, sin_o / cos_o)
        };

        (self.a + self.b * cos_dphi.max(0.0) * sin_alpha * tan_beta) * lambert
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(theta: f32, phi: f32) -> Vec3 {
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();
        Vec3::new(st * cp, st * sp, ct)
    }

    #[test]
    fn zero_sigma_is_lambertian() {
        let albedo = Rgb::from_array([0.2, 0.5, 0.9]);
        let on = OrenNayar::new(albedo, 0.0);
        for (wi, wo) in [
            (dir(0.3, 0.1), dir(1.2, 2.0)),
            (Vec3::Z, dir(0.7, 0.0)),
            (dir(1.5, 3.0), dir(0.01, 1.0)),
        ] {
            let f = on.f(wi, wo).to_array();
            let expected = (std::f32::consts::FRAC_1_PI * albedo).to_array();
            for c in 0..3 {
                assert_eq!(f[c], expected[c]);
            }
        }
    }

    #[test]
    fn finite_at_poles_and_grazing() {
        let on = OrenNayar::new(Rgb::splat(1.0), 0.8);
        for (wi, wo) in [
            (Vec3::Z, Vec3::Z),
            (Vec3::Z, dir(1.0, 0.5)),
            (dir(std::f32::consts::FRAC_PI_2 - 1e-6, 0.0), dir(0.5, 0.0)),
            (Vec3::new(1e-7, 0.0, 1.0).normalize(), Vec3::Z),
        ] {
            let f = on.f(wi, wo);
            assert!(f.is_finite(), "{wi:?} {wo:?} {f:?}");
            assert!(f.min_element() >= 0.0);
        }
    }

    #[test]
    fn backscatter_is_brighter() {
        let on = OrenNayar::new(Rgb::splat(1.0), 0.5);
        let wo = dir(1.0, 0.0);
        let back = on.f(dir(1.0, 0.0), wo).to_array()[0];
        let side = on.f(dir(1.0, std::f32::consts::PI), wo).to_array()[0];
        assert!(back > side);
    }

    #[test]
    fn opposite_sides_is_zero() {
        let on = OrenNayar::new(Rgb::splat(1.0), 0.3);
        assert!(on.f(Vec3::Z, -Vec3::Z).is_black());
    }
}
