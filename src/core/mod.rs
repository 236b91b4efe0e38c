// panelkit/src/core/mod.rs
mod policy;
mod processor;
mod request;

pub use policy::{derive_contain_size, derive_crop_height, derive_letterbox_offset, derive_width_bound_height};
pub use processor::ImageProcessor;
pub use request::{
    Clip, ContainRequest, LetterboxRequest, OutputFileSet, SliceFailure, SliceRequest,
    VideoRequest, WidthScaleRequest,
};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    Nearest,
    Bilinear,
    Bicubic,
    Gaussian,
    #[default]
    Lanczos3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Gif,
    Tiff,
    Bmp,
    WebP,
}

impl OutputFormat {
    /// Lower-case format name, also used as the file extension of slice segments.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Gif => "gif",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Bmp => "bmp",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Gif => image::ImageFormat::Gif,
            OutputFormat::Tiff => image::ImageFormat::Tiff,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
            OutputFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// Opaque fill colour for letterbox canvases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FillColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, u8::MAX])
    }
}

impl std::str::FromStr for FillColor {
    type Err = ImageToolError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ImageToolError::InvalidParameter(format!(
                "Color must be #rrggbb, got '{}'",
                s
            )));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| {
                ImageToolError::InvalidParameter(format!("Invalid color '{}': {}", s, e))
            })
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// How the video encoder process is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// `<shell> -c "<command line>"`, the command line rendered verbatim.
    #[default]
    Shell,
    /// The program is spawned directly with an argument vector.
    Direct,
}

#[derive(Debug, Clone)]
pub struct VideoConfig {
    pub program: String,
    pub codec: String,
    pub pixel_format: String,
    pub mode: ExecMode,
    pub shell: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            codec: "libx264".to_string(),
            pixel_format: "yuv420p".to_string(),
            mode: ExecMode::Shell,
            shell: "bash".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub jpeg_quality: u8,
    pub max_dimensions: Option<(u32, u32)>,
    pub video: VideoConfig,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 95,
            max_dimensions: Some((100_000, 100_000)),
            video: VideoConfig::default(),
        }
    }
}

impl ProcessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(ImageToolError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        if let Some((w, h)) = self.max_dimensions {
            if w == 0 || h == 0 {
                return Err(ImageToolError::InvalidParameter(
                    "Maximum dimensions must be positive".to_string(),
                ));
            }
        }

        if self.video.program.trim().is_empty() {
            return Err(ImageToolError::InvalidParameter(
                "Video encoder program must not be empty".to_string(),
            ));
        }

        if self.video.mode == ExecMode::Shell && self.video.shell.trim().is_empty() {
            return Err(ImageToolError::InvalidParameter(
                "Shell must not be empty in shell mode".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ImageToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Encoder process error: {0}")]
    Subprocess(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
}

impl ImageToolError {
    pub fn is_decode(&self) -> bool {
        matches!(self, ImageToolError::Decode { .. })
    }

    pub fn is_encode(&self) -> bool {
        matches!(self, ImageToolError::Encode { .. })
    }

    pub fn is_subprocess(&self) -> bool {
        matches!(self, ImageToolError::Subprocess(_))
    }
}

pub type Result<T> = std::result::Result<T, ImageToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!("#ff8000".parse::<FillColor>().unwrap(), FillColor::new(255, 128, 0));
        assert_eq!("000000".parse::<FillColor>().unwrap(), FillColor::new(0, 0, 0));
        assert!("#fff".parse::<FillColor>().is_err());
        assert!("#gg0000".parse::<FillColor>().is_err());
    }

    #[test]
    fn fill_color_is_opaque() {
        assert_eq!(FillColor::new(1, 2, 3).to_rgba(), image::Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn format_extensions_are_lower_case_names() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpeg");
        assert_eq!(OutputFormat::Tiff.extension(), "tiff");
        assert_eq!(OutputFormat::WebP.extension(), "webp");
    }

    #[test]
    fn default_config_is_valid() {
        assert!(ProcessConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_config() {
        let config = ProcessConfig {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut config = ProcessConfig::default();
        config.video.program = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = ProcessConfig::default();
        config.video.shell = String::new();
        assert!(config.validate().is_err());
        config.video.mode = ExecMode::Direct;
        assert!(config.validate().is_ok());
    }
}
