// panelkit/src/processors/compressor.rs
use crate::core::{ImageToolError, OutputFormat, Result};
use crate::utils::format_file_size;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageFormat};
use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

/// Writes a raster to disk.
pub trait Encoder: Send + Sync {
    /// Save `image` to `path`. Without an explicit `format` the path
    /// extension decides.
    fn save(&self, image: &DynamicImage, path: &Path, format: Option<OutputFormat>) -> Result<()>;
}

pub struct Compressor {
    quality: u8,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Encode fully in memory so a rejected image never leaves a file behind.
    fn encode(&self, image: &DynamicImage, format: ImageFormat) -> image::ImageResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        match format {
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel.
                let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
                DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
            }
            _ => normalize_color(image, format).write_to(&mut buffer, format)?,
        }

        Ok(buffer.into_inner())
    }

    fn log_save_result(&self, path: &Path) -> Result<()> {
        let file_size = std::fs::metadata(path)?.len();
        log::info!("Saved image: {} ({})", path.display(), format_file_size(file_size));
        Ok(())
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(95)
    }
}

impl Encoder for Compressor {
    fn save(&self, image: &DynamicImage, path: &Path, format: Option<OutputFormat>) -> Result<()> {
        let encode_error = |source| ImageToolError::Encode {
            path: path.to_path_buf(),
            source,
        };

        let format = match format {
            Some(format) => format.to_image_format(),
            None => ImageFormat::from_path(path).map_err(encode_error)?,
        };

        log::debug!(
            "Saving image to {} with format {:?}, quality: {}",
            path.display(),
            format,
            self.quality
        );

        let bytes = self.encode(image, format).map_err(encode_error)?;
        if let Err(e) = std::fs::write(path, &bytes) {
            // drop whatever part of the file made it to disk
            let _ = std::fs::remove_file(path);
            return Err(encode_error(e.into()));
        }

        self.log_save_result(path)
    }
}

/// Convert to 8-bit RGB(A) when the target encoder cannot take the decoded
/// colour type as is.
fn normalize_color(image: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    use ColorType::*;

    let supported = match format {
        ImageFormat::Png => matches!(
            image.color(),
            L8 | La8 | Rgb8 | Rgba8 | L16 | La16 | Rgb16 | Rgba16
        ),
        ImageFormat::Gif => matches!(image.color(), Rgb8 | Rgba8),
        _ => matches!(image.color(), L8 | Rgb8 | Rgba8),
    };

    if supported {
        Cow::Borrowed(image)
    } else if image.color().has_alpha() {
        log::debug!("Converting {:?} to Rgba8 for {:?}", image.color(), format);
        Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
    } else {
        log::debug!("Converting {:?} to Rgb8 for {:?}", image.color(), format);
        Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8()))
    }
}
