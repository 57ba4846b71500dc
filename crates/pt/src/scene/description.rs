use glam::Vec3;
use log::debug;

use crate::{
    camera::PerspectiveCamera,
    color::Rgb,
    error::{RenderError, Result},
    material::{Material, MaterialId},
    shape::{Plane, Sphere},
};

use super::{Planes, SceneData, Spheres};

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDescription {
    pub label: Option<String>,
    pub albedo: Rgb,
    pub emission: Rgb,
    /// In [0, 1], shared by both lobes
    pub roughness: f32,
    pub reflection_tint: Rgb,
    pub ior: f32,
    /// Tail exponent of the glossy microfacet distribution, 2 is GGX
    pub glossy_tail: f32,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        Self {
            label: None,
            albedo: Rgb::splat(0.5),
            emission: Rgb::splat(0.0),
            roughness: 0.2,
            reflection_tint: Rgb::splat(0.0),
            ior: 1.5,
            glossy_tail: 2.0,
        }
    }
}

impl MaterialDescription {
    /// Colours must be finite and non negative, the numbers in their range
    fn check(&self) -> std::result::Result<(), String> {
        for (what, color) in [
            ("albedo", self.albedo),
            ("emission", self.emission),
            ("reflection tint", self.reflection_tint),
        ] {
            if !(color.is_finite() && color.min_element() >= 0.0) {
                return Err(format!("has an invalid {what} {:?}", color.to_array()));
            }
        }
        if !(0.0..=1.0).contains(&self.roughness) {
            return Err(format!("has roughness {}, not in [0, 1]", self.roughness));
        }
        if !(self.ior.is_finite() && self.ior > 0.0) {
            return Err(format!("has index of refraction {}", self.ior));
        }
        if !(self.glossy_tail.is_finite() && self.glossy_tail > 0.0) {
            return Err(format!("has glossy tail exponent {}", self.glossy_tail));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    /// The default material when None
    pub material: Option<MaterialId>,
}

impl Default for SphereDescription {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 1.0,
            material: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneDescription {
    pub point: Vec3,
    /// Does not need to be normalized
    pub normal: Vec3,
    pub width: f32,
    pub height: f32,
    /// The default material when None
    pub material: Option<MaterialId>,
}

impl Default for PlaneDescription {
    fn default() -> Self {
        Self {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            width: 1000.0,
            height: 1000.0,
            material: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraDescription {
    pub from: Vec3,
    pub at: Vec3,
    /// width / height
    pub aspect_ratio: f32,
    /// Horizontal field of view, in radians
    pub hfov: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            from: Vec3::ZERO,
            at: Vec3::Z,
            aspect_ratio: 1.0,
            hfov: 1.011,
        }
    }
}

/// Author facing scene
///
/// Material 0 is always there, it is used by primitives that do not name one.
#[derive(Debug, Clone)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    materials: Vec<MaterialDescription>,
    spheres: Vec<SphereDescription>,
    planes: Vec<PlaneDescription>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneDescription {
    pub fn new() -> Self {
        Self {
            camera: Default::default(),
            materials: vec![MaterialDescription {
                label: Some("Default".to_owned()),
                ..Default::default()
            }],
            spheres: Vec::new(),
            planes: Vec::new(),
        }
    }

    pub const DEFAULT_MATERIAL: MaterialId = MaterialId(0);

    /// Insert a material and returns the Material ID associated with this material
    pub fn insert_material(&mut self, material: MaterialDescription) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn insert_sphere(&mut self, sphere: SphereDescription) {
        self.spheres.push(sphere);
    }

    pub fn insert_plane(&mut self, plane: PlaneDescription) {
        self.planes.push(plane);
    }

    pub fn set_camera(&mut self, camera: CameraDescription) {
        self.camera = camera;
    }

    fn check_material(&self, material: Option<MaterialId>, what: &str) -> Result<MaterialId> {
        let id = material.unwrap_or(Self::DEFAULT_MATERIAL);
        if id.0 < self.materials.len() {
            Ok(id)
        } else {
            Err(RenderError::InvalidScene(format!(
                "{what} uses material {} but there are only {} materials",
                id.0,
                self.materials.len()
            )))
        }
    }

    /// Validate and flatten the scene
    pub fn build(&self) -> Result<SceneData> {
        for (k, material) in self.materials.iter().enumerate() {
            material.check().map_err(|msg| {
                let name = material.label.as_deref().unwrap_or("unnamed");
                RenderError::InvalidScene(format!("material {k} ({name}) {msg}"))
            })?;
        }

        let mut spheres = Spheres::default();
        for (k, sphere) in self.spheres.iter().enumerate() {
            let what = format!("sphere {k}");
            let material = self.check_material(sphere.material, &what)?;
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(RenderError::InvalidScene(format!(
                    "{what} has radius {}, it must be positive and finite",
                    sphere.radius
                )));
            }
            if !sphere.center.is_finite() {
                return Err(RenderError::InvalidScene(format!(
                    "{what} has a non finite center"
                )));
            }
            spheres.push(
                Sphere {
                    center: sphere.center,
                    radius: sphere.radius,
                },
                material,
            );
        }

        let mut planes = Planes::default();
        for (k, plane) in self.planes.iter().enumerate() {
            let what = format!("plane {k}");
            let material = self.check_material(plane.material, &what)?;
            let Some(normal) = plane.normal.try_normalize() else {
                return Err(RenderError::InvalidScene(format!(
                    "{what} has a degenerate normal {}",
                    plane.normal
                )));
            };
            if !plane.point.is_finite() {
                return Err(RenderError::InvalidScene(format!(
                    "{what} has a non finite point"
                )));
            }
            // NaN fails the comparison too
            let valid_extent = |e: f32| e >= 0.0;
            if !(valid_extent(plane.width) && valid_extent(plane.height)) {
                return Err(RenderError::InvalidScene(format!(
                    "{what} has invalid extents {} x {}",
                    plane.width, plane.height
                )));
            }
            planes.push(
                &Plane::new(plane.point, normal, plane.width, plane.height),
                material,
            );
        }

        let camera = &self.camera;
        if !(camera.aspect_ratio.is_finite() && camera.aspect_ratio > 0.0) {
            return Err(RenderError::InvalidScene(format!(
                "camera aspect ratio {} must be positive",
                camera.aspect_ratio
            )));
        }
        if !(camera.hfov > 0.0 && camera.hfov < std::f32::consts::PI) {
            return Err(RenderError::InvalidScene(format!(
                "camera field of view {} is not in (0, pi)",
                camera.hfov
            )));
        }
        if camera.from == camera.at {
            return Err(RenderError::InvalidScene(
                "camera looks at its own position".to_owned(),
            ));
        }

        debug!(
            "Scene with {} materials, {} spheres and {} planes",
            self.materials.len(),
            spheres.len(),
            planes.len()
        );

        Ok(SceneData {
            camera: PerspectiveCamera::look_at(
                camera.from,
                camera.at,
                camera.aspect_ratio,
                camera.hfov,
            ),
            spheres,
            planes,
            materials: self.materials.iter().map(Material::from).collect(),
        })
    }
}
