use std::ops::Deref;

use super::{float::FloatAsExt, vec::Vec3};

/// Samples are expected to be in [0;1(^N
pub struct Samples<const N: usize>(pub [f32; N]);

impl<const N: usize> Deref for Samples<N> {
    type Target = [f32; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub trait Samplable<T, const N: usize> {
    fn sample_with(&self, samples: Samples<N>) -> T;
}

pub trait DirectionalPDF {
    fn pdf(&self, costheta: f32) -> f32;
}

/// Uniform distribution over the +z hemisphere
pub struct UniformHemisphere3;

impl Samplable<Vec3, 2> for UniformHemisphere3 {
    fn sample_with(&self, samples: Samples<2>) -> Vec3 {
        let z = samples[0];
        let r = f32::sqrt(f32::max(0.0, 1.0 - z * z));
        let (s, c) = f32::sin_cos(std::f32::consts::TAU * samples[1]);

        Vec3 {
            x: r * c,
            y: r * s,
            z,
        }
    }
}

impl DirectionalPDF for UniformHemisphere3 {
    fn pdf(&self, costheta: f32) -> f32 {
        if costheta >= 0.0 {
            0.5 * std::f32::consts::FRAC_1_PI
        } else {
            0.0
        }
    }
}

/// Generalized Trowbridge-Reitz microfacet distribution
///
/// `gamma` is the tail exponent, `gamma = 2` is GGX, `gamma = 1` is Berry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralizedTrowbridgeReitz {
    pub alpha: f32,
    pub gamma: f32,
}

impl GeneralizedTrowbridgeReitz {
    pub fn new(alpha: f32, gamma: f32) -> Self {
        Self { alpha, gamma }
    }

    fn normalization(&self) -> f32 {
        let a2 = self.alpha * self.alpha;
        if (a2 - 1.0).abs() < 1e-4 {
            std::f32::consts::FRAC_1_PI
        } else if (self.gamma - 1.0).abs() < 1e-4 {
            (a2 - 1.0) / (std::f32::consts::PI * a2.ln())
        } else {
            (self.gamma - 1.0) * (a2 - 1.0)
                / (std::f32::consts::PI * (1.0 - a2.powf(1.0 - self.gamma)))
        }
    }

    /// Density of microfacet normals making an angle theta with the macro normal
    pub fn d(&self, costheta: f32) -> f32 {
        let a2 = self.alpha * self.alpha;
        let cos2 = costheta.clamp_unit().powi(2);
        let denom = 1.0 + (a2 - 1.0) * cos2;
        self.normalization() / denom.max(f32::MIN_POSITIVE).powf(self.gamma)
    }

    /// Smith auxiliary function, takes tan(theta)
    pub fn lambda(&self, tantheta: f32) -> f32 {
        match tantheta.into_finite() {
            Some(t) => 0.5 * (-1.0 + f32::sqrt(1.0 + self.alpha * self.alpha * t * t)),
            None => 0.0,
        }
    }

    /// Separable shadowing masking term
    pub fn g(&self, tantheta_i: f32, tantheta_o: f32) -> f32 {
        1.0 / (1.0 + self.lambda(tantheta_i) + self.lambda(tantheta_o))
    }
}
