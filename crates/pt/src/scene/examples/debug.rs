use glam::Vec3;

use crate::{
    color::Rgb,
    scene::{CameraDescription, MaterialDescription, SceneDescription, SphereDescription},
};

/// A single glowing sphere in front of the camera
pub struct DebugScene;

impl DebugScene {
    pub const EMISSION: Rgb = Rgb::from_array([1.0, 0.8, 0.6]);

    pub fn insert_into(scene: &mut SceneDescription) {
        let glowing = scene.insert_material(MaterialDescription {
            label: Some("Glowing white".to_owned()),
            albedo: Rgb::splat(1.0),
            emission: Self::EMISSION,
            ..Default::default()
        });

        scene.insert_sphere(SphereDescription {
            center: Vec3::ZERO,
            radius: 1.0,
            material: Some(glowing),
        });

        scene.set_camera(CameraDescription {
            from: Vec3::new(0.0, 0.0, -4.0),
            at: Vec3::ZERO,
            ..Default::default()
        });
    }
}
