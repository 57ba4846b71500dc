use std::path::PathBuf;

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgb, Rgb32FImage, RgbImage};
use pt::FrameBuffer;

/// Writes the final image, the format follows the file extension
///
/// `.exr` keeps the linear values, anything else is 8 bits sRGB.
pub struct FileOutput {
    pub path: PathBuf,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_hdr(&self) -> bool {
        matches!(
            self.path.extension().and_then(|e| e.to_str()),
            Some("exr")
        )
    }

    pub fn commit(&self, frame: &FrameBuffer) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }

        if self.is_hdr() {
            log::info!("Saving HDR image to {}", self.path.display());
            to_linear_image(frame)?.save(&self.path)
        } else {
            log::info!("Saving LDR image to {}", self.path.display());
            to_srgb_image(frame)?.save(&self.path)
        }
        .with_context(|| format!("writing {}", self.path.display()))
    }
}

pub fn to_srgb_image(frame: &FrameBuffer) -> Result<RgbImage> {
    ImageBuffer::from_raw(frame.width(), frame.height(), frame.to_srgb8_top_down())
        .context("frame buffer does not match its dimensions")
}

pub fn to_linear_image(frame: &FrameBuffer) -> Result<Rgb32FImage> {
    let width = frame.width();
    let height = frame.height();
    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        Rgb(frame.get(x, height - 1 - y).to_array())
    }))
}

