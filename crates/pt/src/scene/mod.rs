//! Scenes, as authored ([SceneDescription]) and as rendered ([SceneData]).

pub mod description;
pub mod examples;

pub use description::{
    CameraDescription, MaterialDescription, PlaneDescription, SceneDescription, SphereDescription,
};

use crate::{
    camera::PerspectiveCamera,
    material::{Material, MaterialId},
    shape::{Plane, Sphere},
    soa::Vec3Soa,
};

#[derive(Debug, Clone, Default)]
pub struct Spheres {
    pub center: Vec3Soa,
    pub radius: Vec<f32>,
    pub material: Vec<MaterialId>,
}

impl Spheres {
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, k: usize) -> Sphere {
        Sphere {
            center: self.center.get(k),
            radius: self.radius[k],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sphere, MaterialId)> + '_ {
        (0..self.len()).map(|k| (self.get(k), self.material[k]))
    }

    fn push(&mut self, sphere: Sphere, material: MaterialId) {
        self.center.push(sphere.center);
        self.radius.push(sphere.radius);
        self.material.push(material);
    }
}

/// Planes with their frame, computed once when the scene is built
#[derive(Debug, Clone, Default)]
pub struct Planes {
    pub point: Vec3Soa,
    pub normal: Vec3Soa,
    pub tangent: Vec3Soa,
    pub bitangent: Vec3Soa,
    pub width: Vec<f32>,
    pub height: Vec<f32>,
    pub material: Vec<MaterialId>,
}

impl Planes {
    pub fn len(&self) -> usize {
        self.width.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, k: usize) -> Plane {
        Plane {
            point: self.point.get(k),
            normal: self.normal.get(k),
            width: self.width[k],
            height: self.height[k],
            tangent: self.tangent.get(k),
            bitangent: self.bitangent.get(k),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Plane, MaterialId)> + '_ {
        (0..self.len()).map(|k| (self.get(k), self.material[k]))
    }

    fn push(&mut self, plane: &Plane, material: MaterialId) {
        self.point.push(plane.point);
        self.normal.push(plane.normal);
        self.tangent.push(plane.tangent);
        self.bitangent.push(plane.bitangent);
        self.width.push(plane.width);
        self.height.push(plane.height);
        self.material.push(material);
    }
}

/// Flattened scene, immutable during a render
///
/// Only [SceneDescription::build] makes one, so every material id is valid
/// and there is at least one material.
#[derive(Debug, Clone)]
pub struct SceneData {
    camera: PerspectiveCamera,
    spheres: Spheres,
    planes: Planes,
    materials: Vec<Material>,
}

impl SceneData {
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn spheres(&self) -> &Spheres {
        &self.spheres
    }

    pub fn planes(&self) -> &Planes {
        &self.planes
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.planes.len()
    }
}
