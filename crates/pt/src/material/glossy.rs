use glam::Vec3;

use crate::{
    color::Rgb,
    math::{distributions::GeneralizedTrowbridgeReitz, float::FloatAsExt, vec::Vec3SameDirExt},
};

/// Cosines and half vectors smaller than this make the lobe vanish
const DEGENERATE_EPS: f32 = 1e-6;

/// Schlick's approximation of the Fresnel reflectance between two media
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schlick {
    pub n1: f32,
    pub n2: f32,
}

impl Schlick {
    pub fn new(n1: f32, n2: f32) -> Self {
        Self { n1, n2 }
    }

    pub fn reflectance(&self, costheta: f32) -> f32 {
        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        let r0 = if r0.is_finite() { r0 } else { 0.0 };
        let c = 1.0 - costheta.clamp_unit().abs();
        r0 + (1.0 - r0) * c.powi(5)
    }
}

/// Cook-Torrance microfacet reflection with a generalized Trowbridge-Reitz distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CookTorrance {
    pub tint: Rgb,
    pub distribution: GeneralizedTrowbridgeReitz,
    pub fresnel: Schlick,
}

fn tan_theta(w: Vec3) -> f32 {
    let cos = w.z.clamp_unit();
    f32::sqrt(f32::max(0.0, 1.0 - cos * cos)) / cos.abs()
}

impl CookTorrance {
    pub fn new(tint: Rgb, alpha: f32, gamma: f32, ior: f32) -> Self {
        Self {
            tint,
            distribution: GeneralizedTrowbridgeReitz::new(alpha, gamma),
            fresnel: Schlick::new(1.0, ior),
        }
    }

    pub fn f(&self, wi: Vec3, wo: Vec3) -> Rgb {
        let cos_i = wi.z.abs();
        let cos_o = wo.z.abs();
        if cos_i < DEGENERATE_EPS || cos_o < DEGENERATE_EPS || wi.z * wo.z <= 0.0 {
            return Rgb::splat(0.0);
        }

        let h = wi + wo;
        if h.length() < DEGENERATE_EPS {
            return Rgb::splat(0.0);
        }
        let h = h.normalize().same_direction(Vec3::Z);

        let d = self.distribution.d(h.z);
        let g = self.distribution.g(tan_theta(wi), tan_theta(wo));
        let f = self.fresnel.reflectance(wi.dot(h));

        let value = d * g * f / (4.0 * cos_i * cos_o);
        match value.into_finite() {
            Some(v) => v * self.tint,
            None => Rgb::splat(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test-only helper: largest channel of a color.
    trait MaxElement {
        fn max_element(&self) -> f32;
    }

    impl MaxElement for Rgb {
        fn max_element(&self) -> f32 {
            self.to_array().into_iter().fold(f32::MIN, f32::max)
        }
    }

    #[test]
    fn schlick_limits() {
        let s = Schlick::new(1.0, 1.5);
        assert!((s.reflectance(1.0) - 0.04).abs() < 1e-6);
        assert!((s.reflectance(0.0) - 1.0).abs() < 1e-6);
        assert_eq!(Schlick::new(1.0, 1.0).reflectance(1.0), 0.0);
    }

    #[test]
    fn degenerate_configurations_are_zero() {
        let ct = CookTorrance::new(Rgb::splat(1.0), 0.2, 2.0, 1.5);
        let wo = Vec3::new(0.6, 0.0, 0.8);
        // grazing
        assert!(ct.f(Vec3::X, wo).is_black());
        // opposite half vector
        assert!(ct.f(-wo, wo).is_black());
        // below the surface
        assert!(ct.f(Vec3::new(0.0, 0.6, -0.8), wo).is_black());
    }

    #[test]
    fn peaks_on_mirror_direction() {
        let ct = CookTorrance::new(Rgb::splat(1.0), 0.1, 2.0, 1.5);
        let wo = Vec3::new(0.6, 0.0, 0.8);
        let mirror = Vec3::new(-0.6, 0.0, 0.8);
        let off = Vec3::new(0.0, 0.6, 0.8);
        let peak = ct.f(mirror, wo);
        assert!(peak.is_finite());
        assert!(peak.max_element() > ct.f(off, wo).max_element());
    }

    #[test]
    fn finite_at_normal_incidence() {
        let ct = CookTorrance::new(Rgb::splat(1.0), 1e-3, 2.0, 1.5);
        let f = ct.f(Vec3::Z, Vec3::Z);
        assert!(f.is_finite());
        assert!(f.max_element() > 0.0);
    }
}
