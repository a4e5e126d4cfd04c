//! Image decoding and preprocessing for OCR.

use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::error::OcrError;

/// Image preprocessor for the OCR pipeline.
pub struct ImagePreprocessor {
    /// Maximum image dimension.
    max_size: u32,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self { max_size: 2048 }
    }

    /// Set maximum image dimension.
    pub fn with_max_size(mut self, size: u32) -> Self {
        self.max_size = size;
        self
    }

    /// Decode raw image bytes (PNG, JPEG, ...) and prepare them for recognition.
    pub fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, OcrError> {
        if bytes.is_empty() {
            return Err(OcrError::InvalidImage("no image data".to_string()));
        }

        let image = image::load_from_memory(bytes)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        self.prepare(image)
    }

    /// Reject degenerate images and downscale oversized ones.
    pub fn prepare(&self, image: DynamicImage) -> Result<DynamicImage, OcrError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!(
                "empty image dimensions {}x{}",
                width, height
            )));
        }

        let (new_width, new_height) = self.calculate_resize_dimensions(width, height);
        if (new_width, new_height) == (width, height) {
            return Ok(image);
        }

        debug!(
            "Resizing image from {}x{} to {}x{}",
            width, height, new_width, new_height
        );

        Ok(image.resize_exact(
            new_width,
            new_height,
            image::imageops::FilterType::Lanczos3,
        ))
    }

    /// Calculate dimensions keeping the aspect ratio with the longer side
    /// capped at `max_size`.
    fn calculate_resize_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let longer = width.max(height);
        if longer <= self.max_size || self.max_size == 0 {
            return (width, height);
        }

        let scale = self.max_size as f32 / longer as f32;
        let new_width = ((width as f32 * scale).round() as u32).max(1);
        let new_height = ((height as f32 * scale).round() as u32).max(1);

        (new_width, new_height)
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::new_rgb8(width, height);
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_resize_dimensions() {
        let preprocessor = ImagePreprocessor::new().with_max_size(1000);

        assert_eq!(preprocessor.calculate_resize_dimensions(800, 600), (800, 600));
        assert_eq!(preprocessor.calculate_resize_dimensions(2000, 1000), (1000, 500));
        assert_eq!(preprocessor.calculate_resize_dimensions(500, 4000), (125, 1000));
    }

    #[test]
    fn test_decode_png() {
        let preprocessor = ImagePreprocessor::new().with_max_size(32);
        let image = preprocessor.decode(&png_bytes(64, 16)).unwrap();

        assert_eq!(image.dimensions(), (32, 8));
    }

    #[test]
    fn test_decode_garbage() {
        let preprocessor = ImagePreprocessor::new();

        assert!(matches!(
            preprocessor.decode(b"definitely not an image"),
            Err(OcrError::InvalidImage(_))
        ));
        assert!(matches!(preprocessor.decode(&[]), Err(OcrError::InvalidImage(_))));
    }
}
