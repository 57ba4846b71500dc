use glam::Vec3;

use crate::{
    color::Rgb,
    scene::{
        CameraDescription, MaterialDescription, PlaneDescription, SceneDescription,
        SphereDescription,
    },
};

/// A 2 x 2 x 2 box centered on the origin, open toward -z, lit from the ceiling
pub struct CornellBoxScene;

impl CornellBoxScene {
    pub fn insert_into(scene: &mut SceneDescription) {
        let white = scene.insert_material(MaterialDescription {
            label: Some("White".to_owned()),
            albedo: Rgb::splat(0.73),
            roughness: 0.9,
            ..Default::default()
        });
        let red = scene.insert_material(MaterialDescription {
            label: Some("Red".to_owned()),
            albedo: Rgb::from_array([0.65, 0.05, 0.05]),
            roughness: 0.9,
            ..Default::default()
        });
        let green = scene.insert_material(MaterialDescription {
            label: Some("Green".to_owned()),
            albedo: Rgb::from_array([0.12, 0.45, 0.15]),
            roughness: 0.9,
            ..Default::default()
        });
        let glossy = scene.insert_material(MaterialDescription {
            label: Some("Glossy".to_owned()),
            albedo: Rgb::splat(0.1),
            roughness: 0.1,
            reflection_tint: Rgb::splat(1.0),
            ..Default::default()
        });
        let light = scene.insert_material(MaterialDescription {
            label: Some("Light".to_owned()),
            emission: Rgb::splat(12.0),
            ..Default::default()
        });

        let wall = |point: Vec3, normal: Vec3, material| PlaneDescription {
            point,
            normal,
            width: 2.0,
            height: 2.0,
            material: Some(material),
        };
        scene.insert_plane(wall(-Vec3::X, Vec3::X, red));
        scene.insert_plane(wall(Vec3::X, -Vec3::X, green));
        scene.insert_plane(wall(-Vec3::Y, Vec3::Y, white));
        scene.insert_plane(wall(Vec3::Y, -Vec3::Y, white));
        scene.insert_plane(wall(Vec3::Z, -Vec3::Z, white));

        // Just below the ceiling
        scene.insert_plane(PlaneDescription {
            point: Vec3::new(0.0, 0.999, 0.0),
            normal: -Vec3::Y,
            width: 0.6,
            height: 0.6,
            material: Some(light),
        });

        scene.insert_sphere(SphereDescription {
            center: Vec3::new(-0.4, -0.6, 0.3),
            radius: 0.4,
            material: Some(white),
        });
        scene.insert_sphere(SphereDescription {
            center: Vec3::new(0.45, -0.65, -0.25),
            radius: 0.35,
            material: Some(glossy),
        });

        scene.set_camera(CameraDescription {
            from: Vec3::new(0.0, 0.0, -3.5),
            at: Vec3::ZERO,
            hfov: 0.8,
            ..Default::default()
        });
    }
}
