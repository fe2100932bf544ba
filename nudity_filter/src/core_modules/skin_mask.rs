// THEORY:
// The `SkinMask` is the bridge between per-pixel classification and spatial
// analysis. It runs the skin classifier once over every pixel of a grid and
// records the boolean result in row-major order. Everything downstream (the
// region labeler, the analyzer) works on this mask alone and never touches
// color again.
//
// The mask is owned by a single analysis call and discarded afterwards.

use crate::core_modules::pixel::pixel::PixelGrid;
use crate::core_modules::skin_classifier::is_skin;
use crate::core_modules::utils::image_helper::image_helper;
use crate::error::{FilterError, Result};
use image::{GrayImage, Luma};
use std::path::Path;

const SKIN_INTENSITY: u8 = 255;

/// Row-major grid of skin / not-skin flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl SkinMask {
    /// Classifies every pixel of `grid`.
    pub fn from_grid<G: PixelGrid + ?Sized>(grid: &G) -> Self {
        let (width, height) = grid.dimensions();
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(is_skin(&grid.pixel(x, y)));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a mask from precomputed row-major flags, checking that there is
    /// exactly one flag per pixel.
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(FilterError::MaskSize {
                expected,
                actual: cells.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn is_skin(&self, x: u32, y: u32) -> bool {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Number of pixels classified as skin, before any noise filtering.
    pub fn skin_pixels(&self) -> usize {
        self.cells.iter().filter(|&&skin| skin).count()
    }

    /// Renders the mask as white-on-black.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_skin(x, y) { SKIN_INTENSITY } else { 0 }])
        })
    }

    /// Writes the mask as a PNG.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        image_helper::save_mask(path, &self.to_image())
    }
}
