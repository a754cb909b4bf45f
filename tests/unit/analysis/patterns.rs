//! Tests for labeling sample images with a sorted color palette

#[cfg(test)]
mod tests {
    use ndarray::array;
    use wavetile::analysis::patterns::ImageProcessor;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    // Tests labels follow the ascending color order of the palette
    // Verified by assigning labels in first-seen order
    #[test]
    fn test_palette_is_sorted() {
        let pixels = array![[RED, GREEN], [BLUE, RED]];
        let processor = ImageProcessor::from_pixels(&pixels);

        assert_eq!(processor.palette(), &[BLUE, GREEN, RED]);
        assert_eq!(processor.labels(), &array![[2, 1], [0, 2]]);
    }

    // Tests pixel counts per label
    // Verified by counting distinct colors instead of pixels
    #[test]
    fn test_label_counts() {
        let pixels = array![[RED, RED, RED], [GREEN, GREEN, BLUE], [BLUE, BLUE, BLUE]];
        let processor = ImageProcessor::from_pixels(&pixels);

        assert_eq!(processor.label_counts(), vec![4, 2, 3]);
        assert_eq!(processor.label_counts().iter().sum::<usize>(), 9);
    }

    // Tests a single color labels every pixel zero
    // Verified by starting labels at one
    #[test]
    fn test_single_color() {
        let pixels = array![[GREEN, GREEN], [GREEN, GREEN]];
        let (labels, palette) = ImageProcessor::from_pixels(&pixels).into_parts();

        assert_eq!(palette, vec![GREEN]);
        assert!(labels.iter().all(|&label| label == 0));
    }

    // Tests PNG loading reads rows top to bottom
    // Verified by swapping width and height when reading pixels
    #[test]
    fn test_from_png_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sample.png");
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba(RED));
        img.save(&path).unwrap();

        let processor = ImageProcessor::from_png_file(&path).unwrap();
        assert_eq!(processor.labels().dim(), (2, 3));
        assert_eq!(processor.palette(), &[[0, 0, 0, 0], RED]);
        assert_eq!(processor.labels()[(1, 2)], 1);
        assert_eq!(processor.label_counts(), vec![5, 1]);
    }

    // Tests missing files surface an image load error
    // Verified by returning an empty processor on failure
    #[test]
    fn test_missing_file() {
        let result = ImageProcessor::from_png_file("does/not/exist.png");
        assert!(matches!(result, Err(wavetile::WfcError::ImageLoad { .. })));
    }
}
