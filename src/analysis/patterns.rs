//! Raster sample images converted to label grids with a color palette

use crate::io::error::{Result, WfcError};
use ndarray::Array2;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Converts images to integer-labeled grids
///
/// Labels index into a palette of distinct RGBA colors sorted ascending, so
/// the same image always yields the same labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageProcessor {
    labels: Array2<usize>,
    palette: Vec<[u8; 4]>,
}

impl ImageProcessor {
    /// Load and label a PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a valid image format
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| WfcError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();

        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
        let pixels = Array2::from_shape_fn((height, width), |(y, x)| {
            rgba_img.get_pixel(x as u32, y as u32).0
        });
        Ok(Self::from_pixels(&pixels))
    }

    /// Label a grid of RGBA colors
    pub fn from_pixels(pixels: &Array2<[u8; 4]>) -> Self {
        let colors: BTreeSet<[u8; 4]> = pixels.iter().copied().collect();
        let palette: Vec<[u8; 4]> = colors.into_iter().collect();
        let lookup: HashMap<[u8; 4], usize> = palette
            .iter()
            .enumerate()
            .map(|(label, &color)| (color, label))
            .collect();

        let labels = pixels.mapv(|color| lookup.get(&color).copied().unwrap_or(0));
        Self { labels, palette }
    }

    /// Label per pixel, indexed (row, col)
    pub const fn labels(&self) -> &Array2<usize> {
        &self.labels
    }

    /// RGBA color of each label
    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    /// Number of pixels carrying each label
    pub fn label_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.palette.len()];
        for &label in &self.labels {
            if let Some(count) = counts.get_mut(label) {
                *count += 1;
            }
        }
        counts
    }

    /// Consume the processor and return labels and palette
    pub fn into_parts(self) -> (Array2<usize>, Vec<[u8; 4]>) {
        (self.labels, self.palette)
    }
}
