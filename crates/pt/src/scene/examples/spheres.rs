use glam::Vec3;

use crate::{
    color::Rgb,
    math::vec::Vec3AsRgbExt,
    scene::{
        CameraDescription, MaterialDescription, PlaneDescription, SceneDescription,
        SphereDescription,
    },
};

pub struct SpheresScene;

impl SpheresScene {
    pub fn insert_into(scene: &mut SceneDescription) {
        let diffuse = scene.insert_material(MaterialDescription {
            label: Some("Rough green".to_owned()),
            albedo: Rgb::from_array([0.2, 0.9, 0.7]),
            roughness: 0.8,
            ..Default::default()
        });
        let glossy_blue = scene.insert_material(MaterialDescription {
            label: Some("Glossy blue".to_owned()),
            albedo: Rgb::from_array([0.2, 0.4, 0.8]),
            roughness: 0.15,
            reflection_tint: Rgb::splat(1.0),
            ..Default::default()
        });
        let metal = scene.insert_material(MaterialDescription {
            label: Some("Dark metal".to_owned()),
            albedo: Rgb::splat(0.05),
            roughness: 0.3,
            reflection_tint: Rgb::from_array([0.95, 0.8, 0.5]),
            ior: 2.5,
            ..Default::default()
        });
        let ground = scene.insert_material(MaterialDescription {
            label: Some("Ground".to_owned()),
            albedo: Rgb::splat(0.6),
            roughness: 0.5,
            ..Default::default()
        });
        let light = scene.insert_material(MaterialDescription {
            label: Some("Light".to_owned()),
            emission: Vec3::splat(15.0).rgb(),
            ..Default::default()
        });

        scene.insert_plane(PlaneDescription {
            point: Vec3::new(0.0, -0.5, 0.0),
            normal: Vec3::Y,
            material: Some(ground),
            ..Default::default()
        });

        scene.insert_sphere(SphereDescription {
            center: Vec3::new(-1.1, 0.0, 0.4),
            radius: 0.5,
            material: Some(diffuse),
        });
        scene.insert_sphere(SphereDescription {
            center: Vec3::new(0.0, 0.0, 0.0),
            radius: 0.5,
            material: Some(glossy_blue),
        });
        scene.insert_sphere(SphereDescription {
            center: Vec3::new(1.1, 0.0, 0.4),
            radius: 0.5,
            material: Some(metal),
        });

        scene.insert_sphere(SphereDescription {
            center: Vec3::new(0.0, 3.0, -1.0),
            radius: 0.8,
            material: Some(light),
        });
        scene.insert_sphere(SphereDescription {
            center: Vec3::new(-3.0, 1.5, -2.0),
            radius: 0.3,
            material: Some(light),
        });

        scene.set_camera(CameraDescription {
            from: Vec3::new(0.0, 1.0, -4.0),
            at: Vec3::new(0.0, 0.0, 0.0),
            ..Default::default()
        });
    }
}
