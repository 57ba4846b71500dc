use crate::{color::Rgb, tile::PixelRect};

/// Row major linear RGB image, row 0 is the bottom of the image
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    /// A black frame
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::splat(0.0); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Rgb {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Write a block of pixels, ordered as the rectangle iterates them
    pub fn write_rect(&mut self, rect: PixelRect, colors: &[Rgb]) {
        debug_assert_eq!(rect.len(), colors.len());
        for ((x, y), &color) in rect.into_iter().zip(colors) {
            self.set(x, y, color);
        }
    }

    /// 8 bits sRGB, top row first, as image files expect it
    pub fn to_srgb8_top_down(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for row in self.pixels.chunks(self.width.max(1) as usize).rev() {
            for color in row {
                bytes.extend(color.to_srgb().to_byte_array());
            }
        }
        bytes
    }
}
