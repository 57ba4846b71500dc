//! Partition of a frame into tiles.
//!
//! Tiles are numbered left to right, then bottom to top. Tiles on the right
//! and top borders are clipped to the frame.

use crate::error::{RenderError, Result};

/// Inclusive pixel rectangle, `(0, 0)` is the bottom left pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelRect {
    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }
    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }
    /// An inclusive rectangle always holds at least one pixel
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Pixels of a rectangle, row by row from the bottom, each row from the left
pub struct PixelIter {
    rect: PixelRect,
    index: usize,
}

impl Iterator for PixelIter {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.rect.len() {
            return None;
        }
        let x = (self.index % self.rect.width()) as u32;
        let y = (self.index / self.rect.width()) as u32;
        self.index += 1;
        Some((self.rect.min_x + x, self.rect.min_y + y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.rect.len() - self.index;
        (len, Some(len))
    }
}

impl ExactSizeIterator for PixelIter {}

impl IntoIterator for PixelRect {
    type Item = (u32, u32);

    type IntoIter = PixelIter;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            rect: self,
            index: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: usize,
    pub rect: PixelRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTiling {
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
}

impl FrameTiling {
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidTiling(format!(
                "frame {width}x{height} has no pixel"
            )));
        }
        if tile_width == 0 || tile_height == 0 {
            return Err(RenderError::InvalidTiling(format!(
                "tile size {tile_width}x{tile_height} has no pixel"
            )));
        }
        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
        })
    }

    /// Number of tile columns and rows
    pub fn tile_dimensions(&self) -> (usize, usize) {
        (
            self.width.div_ceil(self.tile_width) as usize,
            self.height.div_ceil(self.tile_height) as usize,
        )
    }

    pub fn tile_count(&self) -> usize {
        let (c, r) = self.tile_dimensions();
        c * r
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn tile(&self, id: usize) -> Option<Tile> {
        if id >= self.tile_count() {
            return None;
        }

        let (col_count, _) = self.tile_dimensions();
        let x = (id % col_count) as u32;
        let y = (id / col_count) as u32;

        Some(Tile {
            id,
            rect: PixelRect {
                min_x: x * self.tile_width,
                max_x: u32::min(self.width, (x + 1) * self.tile_width) - 1,
                min_y: y * self.tile_height,
                max_y: u32::min(self.height, (y + 1) * self.tile_height) - 1,
            },
        })
    }

    pub fn tiles(&self) -> TileIterator {
        TileIterator {
            tiling: *self,
            start: 0,
            end: self.tile_count(),
        }
    }
}

impl IntoIterator for FrameTiling {
    type Item = Tile;

    type IntoIter = TileIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

pub struct TileIterator {
    tiling: FrameTiling,
    start: usize,
    end: usize,
}

impl ExactSizeIterator for TileIterator {}

impl DoubleEndedIterator for TileIterator {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;

        self.tiling.tile(self.end)
    }
}

impl Iterator for TileIterator {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        let tile = self.tiling.tile(self.start);
        self.start += 1;
        tile
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}
