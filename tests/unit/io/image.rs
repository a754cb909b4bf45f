//! Tests for PNG export of label grids including file creation and error handling

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use wavetile::WfcError;
    use wavetile::io::image::{export_labels_as_png, labels_to_rgba};

    // Tests labels map onto palette colors at the right coordinates
    // Verified by swapping row and column in put_pixel
    #[test]
    fn test_labels_to_rgba() {
        let palette = [[255, 0, 0, 255], [0, 255, 0, 255]];
        let img = labels_to_rgba(&array![[0, 1, 1], [1, 0, 0]], &palette).unwrap();

        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.get_pixel(1, 0).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }

    // Tests PNG file creation, including missing parent directories
    // Verified by disabling directory creation
    #[test]
    fn test_export_creates_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("nested").join("out.png");
        let palette = [[0, 0, 0, 255], [255, 255, 255, 255]];

        export_labels_as_png(&array![[0, 1], [1, 0]], &palette, &output_path).unwrap();
        assert!(output_path.exists(), "PNG file should be created");

        let reloaded = image::open(&output_path).unwrap().to_rgba8();
        assert_eq!(reloaded.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }

    // Tests error when the grid is empty
    // Verified by ignoring empty grid check
    #[test]
    fn test_export_empty_grid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let empty: Array2<usize> = Array2::zeros((0, 0));
        let result = export_labels_as_png(&empty, &[[0, 0, 0, 255]], &temp_dir.path().join("e.png"));
        assert!(result.is_err(), "Should fail when the grid is empty");
    }

    // Tests error when a label exceeds the palette
    // Verified by disabling bounds check
    #[test]
    fn test_export_label_out_of_palette() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("invalid.png");
        let result = export_labels_as_png(&array![[0, 4]], &[[0, 0, 0, 255]], &output_path);

        assert!(matches!(result, Err(WfcError::InvalidSourceData { .. })));
        assert!(!output_path.exists());
    }
}
