//! PNG export of label grids through a color palette

use crate::io::error::{Result, WfcError, invalid_source};
use image::{ImageBuffer, Rgba};
use ndarray::Array2;
use std::path::Path;

/// Map every label to its palette color
///
/// # Errors
///
/// Returns `InvalidSourceData` if a label has no palette entry
pub fn labels_to_rgba(labels: &Array2<usize>, palette: &[[u8; 4]]) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    let (height, width) = labels.dim();
    let mut img = ImageBuffer::new(width as u32, height as u32);

    for ((row, col), &label) in labels.indexed_iter() {
        let rgba = palette.get(label).copied().ok_or_else(|| {
            invalid_source(&format!(
                "label {label} has no color, palette holds {}",
                palette.len()
            ))
        })?;
        img.put_pixel(col as u32, row as u32, Rgba(rgba));
    }

    Ok(img)
}

/// Export a label grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - A label is out of bounds for the palette
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_labels_as_png(
    labels: &Array2<usize>,
    palette: &[[u8; 4]],
    output_path: &Path,
) -> Result<()> {
    if labels.is_empty() {
        return Err(invalid_source(&"nothing to export: grid is empty"));
    }
    let img = labels_to_rgba(labels, palette)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| WfcError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path).map_err(|e| WfcError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
