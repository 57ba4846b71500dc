use core::fmt::Display;
use std::str::FromStr;

use clap::ValueEnum;
use pt::scene::{
    examples::{CornellBoxScene, DebugScene, SpheresScene},
    SceneDescription,
};

#[derive(Debug, Default, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum AvailableScene {
    #[default]
    #[value(name = "cornell")]
    CornellBox,
    Spheres,
    Debug,
}

impl AvailableScene {
    pub fn insert_into(self, scene: &mut SceneDescription) {
        match self {
            AvailableScene::CornellBox => CornellBoxScene::insert_into(scene),
            AvailableScene::Spheres => SpheresScene::insert_into(scene),
            AvailableScene::Debug => DebugScene::insert_into(scene),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl FromStr for Dimensions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((a, b)) = s.split_once('x') else {
            return Err(anyhow::anyhow!("Incorrect format, expected `width`x`height`"));
        };
        let width: u32 = a.trim().parse()?;
        let height: u32 = b.trim().parse()?;
        if width == 0 || height == 0 {
            return Err(anyhow::anyhow!("{width}x{height} has no pixel"));
        }

        Ok(Dimensions { width, height })
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}x{}", self.width, self.height))
    }
}
