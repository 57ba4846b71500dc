//! Surface scattering.
//!
//! Lobes ([Bxdf]) work in a local shading frame where the normal is +z.
//! [Bsdf] binds a material to a shading normal and works in world space.

mod diffuse;
mod glossy;
mod mix;

pub use diffuse::OrenNayar;
pub use glossy::{CookTorrance, Schlick};
pub use mix::{LayeredBxdf, Lobe};

use glam::Vec3;

use crate::{
    color::Rgb,
    math::{
        distributions::{DirectionalPDF, Samplable, Samples, UniformHemisphere3},
        transform::Frame,
    },
    scene::MaterialDescription,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialId(pub usize);

/// A direction drawn from a scattering function together with its value and density
#[derive(Debug, Clone, Copy)]
pub struct BxdfSample {
    pub wi: Vec3,
    pub f: Rgb,
    pub pdf: f32,
}

/// The scattering lobes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bxdf {
    OrenNayar(OrenNayar),
    CookTorrance(CookTorrance),
}

impl Bxdf {
    pub fn f(&self, wi: Vec3, wo: Vec3) -> Rgb {
        match self {
            Bxdf::OrenNayar(b) => b.f(wi, wo),
            Bxdf::CookTorrance(b) => b.f(wi, wo),
        }
    }

    /// Both lobes sample the hemisphere on the side of `wo` uniformly
    pub fn pdf(&self, wi: Vec3, wo: Vec3) -> f32 {
        match self {
            Bxdf::OrenNayar(_) | Bxdf::CookTorrance(_) => {
                if wi.z * wo.z > 0.0 {
                    UniformHemisphere3.pdf(wi.z.abs())
                } else {
                    0.0
                }
            }
        }
    }

    /// Only the first two samples are used
    pub fn sample_f(&self, wo: Vec3, samples: Samples<3>) -> Option<BxdfSample> {
        let wi = match self {
            Bxdf::OrenNayar(_) | Bxdf::CookTorrance(_) => {
                UniformHemisphere3.sample_with(Samples([samples[0], samples[1]]))
            }
        };
        let wi = if wo.z < 0.0 { Vec3::new(wi.x, wi.y, -wi.z) } else { wi };

        let pdf = self.pdf(wi, wo);
        let f = self.f(wi, wo);
        (pdf > 0.0 && f.is_finite()).then_some(BxdfSample { wi, f, pdf })
    }
}

/// A surface material: what it emits and how it scatters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub emission: Rgb,
    pub bxdf: LayeredBxdf,
}

impl Material {
    pub fn bsdf(&self, normal: Vec3) -> Bsdf<'_> {
        Bsdf::new(normal, &self.bxdf)
    }
}

impl From<&MaterialDescription> for Material {
    /// Roughness in [0, 1] is mapped to an Oren-Nayar `sigma` in [0, pi/2] radians
    /// and to a Trowbridge-Reitz `alpha = roughness^2`.
    fn from(desc: &MaterialDescription) -> Self {
        let roughness = desc.roughness.clamp(0.0, 1.0);
        let sigma = roughness * std::f32::consts::FRAC_PI_2;
        let alpha = f32::max(roughness * roughness, 1e-3);
        Self {
            emission: desc.emission,
            bxdf: LayeredBxdf::new(
                OrenNayar::new(desc.albedo, sigma),
                CookTorrance::new(desc.reflection_tint, alpha, desc.glossy_tail, desc.ior),
            ),
        }
    }
}

/// World space view of a [LayeredBxdf] around a shading normal
pub struct Bsdf<'a> {
    frame: Frame,
    bxdf: &'a LayeredBxdf,
}

impl<'a> Bsdf<'a> {
    /// `normal` is expected to be normalized
    pub fn new(normal: Vec3, bxdf: &'a LayeredBxdf) -> Self {
        Self {
            frame: Frame::new(normal),
            bxdf,
        }
    }

    pub fn f(&self, wi: Vec3, wo: Vec3) -> Rgb {
        self.bxdf.f(self.frame.to_local(wi), self.frame.to_local(wo))
    }

    pub fn pdf(&self, wi: Vec3, wo: Vec3) -> f32 {
        self.bxdf.pdf(self.frame.to_local(wi), self.frame.to_local(wo))
    }

    pub fn sample_f(&self, wo: Vec3, samples: Samples<3>) -> Option<BxdfSample> {
        let sample = self.bxdf.sample_f(self.frame.to_local(wo), samples)?;
        Some(BxdfSample {
            wi: self.frame.from_local(sample.wi),
            ..sample
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::{sampler::Sampler, Rng};

    #[test]
    fn default_material_is_rough_grey() {
        let material = Material::from(&MaterialDescription::default());
        assert!(material.emission.is_black());
        match material.bxdf.diffuse {
            Bxdf::OrenNayar(on) => assert_eq!(on.albedo, Rgb::splat(0.5)),
            Bxdf::CookTorrance(_) => panic!("diffuse lobe should be Oren-Nayar"),
        }
        match material.bxdf.glossy {
            Bxdf::CookTorrance(ct) => {
                assert!((ct.distribution.alpha - 0.04).abs() < 1e-6);
                assert_eq!(ct.fresnel.n2, 1.5);
            }
            Bxdf::OrenNayar(_) => panic!("glossy lobe should be Cook-Torrance"),
        }
    }

    #[test]
    fn sampled_directions_face_the_viewer() {
        let material = Material::from(&MaterialDescription::default());
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let bsdf = material.bsdf(normal);
        let wo = Vec3::new(1.0, 0.2, 0.3).normalize();
        let mut rng = Rng::seed_from_u64(3);
        let mut count = 0;
        for _ in 0..500 {
            if let Some(s) = bsdf.sample_f(wo, rng.sample_3d()) {
                assert!(s.wi.dot(normal) > 0.0);
                assert!((s.wi.length() - 1.0).abs() < 1e-4);
                assert!((s.pdf - bsdf.pdf(s.wi, wo)).abs() < 1e-6);
                count += 1;
            }
        }
        assert!(count > 450);
    }

    #[test]
    fn lobe_sample_below_the_surface_follows_wo() {
        let lobe = Bxdf::OrenNayar(OrenNayar::new(Rgb::splat(1.0), 0.0));
        let wo = Vec3::new(0.0, 0.0, -1.0);
        let s = lobe
            .sample_f(wo, Samples([0.5, 0.25, 0.0]))
            .expect("valid sample");
        assert!(s.wi.z < 0.0);
        assert!((s.pdf - 0.5 * std::f32::consts::FRAC_1_PI).abs() < 1e-7);
    }
}
