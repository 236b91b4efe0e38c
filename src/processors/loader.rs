// panelkit/src/processors/loader.rs
use crate::core::{ImageToolError, Result};
use image::{DynamicImage, ImageError, ImageReader};
use std::path::Path;

/// Reads a raster from disk.
pub trait Decoder: Send + Sync {
    fn open(&self, path: &Path) -> Result<DynamicImage>;
}

#[derive(Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn with_max_dimensions(mut self, limit: Option<(u32, u32)>) -> Self {
        self.max_dimensions = limit;
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for Loader {
    fn open(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("Loading image from: {}", path.display());

        let decode_error = |source| ImageToolError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let image = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| decode_error(ImageError::IoError(e)))?
            .decode()
            .map_err(decode_error)?;

        let (width, height) = (image.width(), image.height());
        if let Some((max_w, max_h)) = self.max_dimensions {
            if width > max_w || height > max_h {
                return Err(ImageToolError::LimitExceeded(format!(
                    "Image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_w, max_h
                )));
            }
        }

        log::info!(
            "Loaded image: {}x{} pixels, format: {:?}",
            width,
            height,
            image.color()
        );

        Ok(image)
    }
}
