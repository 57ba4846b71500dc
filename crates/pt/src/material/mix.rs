use glam::Vec3;

use crate::{
    color::Rgb,
    math::{distributions::Samples, float::ONE_MINUS_EPSILON},
};

use super::{Bxdf, BxdfSample, CookTorrance, OrenNayar, Schlick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lobe {
    Diffuse,
    Glossy,
}

impl Lobe {
    /// Pick a lobe with probability one half each and rescale `u` into [0, 1( so it can be reused
    pub fn pick(u: f32) -> (Lobe, f32) {
        let (lobe, u) = if u < 0.5 {
            (Lobe::Diffuse, 2.0 * u)
        } else {
            (Lobe::Glossy, 2.0 * (u - 0.5))
        };
        (lobe, u.clamp(0.0, ONE_MINUS_EPSILON))
    }
}

/// A glossy coat over a diffuse base
///
/// The base only receives the light that the coat does not reflect:
/// `f = (1 - F(cos theta_i)) f_diffuse + f_glossy`.
/// This is not exactly energy conserving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayeredBxdf {
    pub diffuse: Bxdf,
    pub glossy: Bxdf,
    pub fresnel: Schlick,
}

impl LayeredBxdf {
    pub fn new(diffuse: OrenNayar, glossy: CookTorrance) -> Self {
        Self {
            fresnel: glossy.fresnel,
            diffuse: Bxdf::OrenNayar(diffuse),
            glossy: Bxdf::CookTorrance(glossy),
        }
    }

    fn lobe(&self, lobe: Lobe) -> &Bxdf {
        match lobe {
            Lobe::Diffuse => &self.diffuse,
            Lobe::Glossy => &self.glossy,
        }
    }

    pub fn f(&self, wi: Vec3, wo: Vec3) -> Rgb {
        let transmitted = 1.0 - self.fresnel.reflectance(wi.z);
        transmitted * self.diffuse.f(wi, wo) + self.glossy.f(wi, wo)
    }

    pub fn pdf(&self, wi: Vec3, wo: Vec3) -> f32 {
        0.5 * self.diffuse.pdf(wi, wo) + 0.5 * self.glossy.pdf(wi, wo)
    }

    pub fn sample_f(&self, wo: Vec3, samples: Samples<3>) -> Option<BxdfSample> {
        let (lobe, u) = Lobe::pick(samples[2]);
        let BxdfSample { wi, .. } = self
            .lobe(lobe)
            .sample_f(wo, Samples([samples[0], samples[1], u]))?;

        let pdf = self.pdf(wi, wo);
        let f = self.f(wi, wo);
        (pdf > 0.0 && f.is_finite()).then_some(BxdfSample { wi, f, pdf })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::{sampler::Sampler, Rng};

    fn layered() -> LayeredBxdf {
        LayeredBxdf::new(
            OrenNayar::new(Rgb::splat(0.5), 0.3),
            CookTorrance::new(Rgb::splat(1.0), 0.2, 2.0, 1.5),
        )
    }

    #[test]
    fn lobes_are_picked_evenly() {
        let mut rng = Rng::seed_from_u64(11);
        let n = 20000;
        let diffuse = (0..n)
            .filter(|_| Lobe::pick(rng.sample_1d()).0 == Lobe::Diffuse)
            .count();
        let ratio = diffuse as f32 / n as f32;
        assert!((ratio - 0.5).abs() < 0.02, "{ratio}");
    }

    #[test]
    fn rescaled_sample_stays_in_unit_interval() {
        for u in [0.0, 0.25, 0.4999999, 0.5, 0.75, ONE_MINUS_EPSILON] {
            let (_, r) = Lobe::pick(u);
            assert!((0.0..1.0).contains(&r), "{u} -> {r}");
        }
        assert_eq!(Lobe::pick(0.25), (Lobe::Diffuse, 0.5));
        assert_eq!(Lobe::pick(0.75), (Lobe::Glossy, 0.5));
    }

    #[test]
    fn mixture_pdf_is_uniform_hemisphere() {
        let bxdf = layered();
        let wo = Vec3::new(0.0, 0.6, 0.8);
        let pdf = bxdf.pdf(Vec3::new(0.6, 0.0, 0.8), wo);
        assert!((pdf - 0.5 * std::f32::consts::FRAC_1_PI).abs() < 1e-6);
    }

    #[test]
    fn sample_is_consistent() {
        let bxdf = layered();
        let mut rng = Rng::seed_from_u64(5);
        let wo = Vec3::new(0.0, 0.6, 0.8);
        for _ in 0..1000 {
            if let Some(s) = bxdf.sample_f(wo, rng.sample_3d()) {
                assert!(s.wi.z > 0.0);
                assert!(s.f.is_finite());
                assert_eq!(s.pdf, bxdf.pdf(s.wi, wo));
                let expected = bxdf.f(s.wi, wo).to_array();
                assert_eq!(s.f.to_array(), expected);
            }
        }
    }

    #[test]
    fn black_coat_leaves_diffuse() {
        let albedo = Rgb::splat(0.5);
        let bxdf = LayeredBxdf::new(
            OrenNayar::new(albedo, 0.0),
            CookTorrance::new(Rgb::splat(0.0), 0.2, 2.0, 1.5),
        );
        let f = bxdf.f(Vec3::Z, Vec3::Z).to_array()[0];
        let expected = 0.96 * 0.5 * std::f32::consts::FRAC_1_PI;
        assert!((f - expected).abs() < 1e-6);
    }
}
