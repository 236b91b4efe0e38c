// panelkit/src/cli.rs
use crate::core::{ExecMode, FillColor, OutputFormat, ResampleFilter};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "panelkit", version, about = "Slice, rescale and letterbox images, or compile them into a video")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JPEG quality (1-100)
    #[arg(short, long, global = true, default_value_t = 95)]
    pub quality: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut a tall image into equal-height segments named <y>.<format>
    Slice {
        input: PathBuf,

        #[arg(short, long)]
        output_dir: PathBuf,

        #[arg(long, default_value_t = 1080)]
        max_height: u32,

        #[arg(long, default_value_t = 720)]
        min_height: u32,

        /// Width divided by height of each segment
        #[arg(short, long, default_value_t = 0.5625)]
        aspect_ratio: f64,

        #[arg(short, long, value_enum, default_value_t = Format::Jpeg)]
        format: Format,

        /// Leave already written segments in place when slicing fails
        #[arg(long)]
        keep_partial: bool,
    },

    /// Shrink an image to a width, keeping its aspect ratio
    Downscale {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long)]
        width: u32,

        #[arg(long, value_enum, default_value_t = Algorithm::Lanczos3)]
        algorithm: Algorithm,
    },

    /// Resize an image to fit inside a box, enlarging it if needed
    Fit {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        max_width: u32,

        #[arg(long)]
        max_height: u32,

        #[arg(long, value_enum, default_value_t = Algorithm::Lanczos3)]
        algorithm: Algorithm,
    },

    /// Centre an image on a solid-colour canvas (PNG output)
    Letterbox {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long)]
        width: u32,

        #[arg(long)]
        height: u32,

        /// Fill colour as #rrggbb
        #[arg(short, long, default_value = "#000000")]
        color: FillColor,
    },

    /// Re-encode an image; the output extension picks the format
    Convert {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Concatenate stills into a video, in the order given
    Video {
        /// Clips as <path>:<seconds>
        #[arg(required = true)]
        clips: Vec<String>,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value = "ffmpeg")]
        ffmpeg: String,

        #[arg(long, default_value = "libx264")]
        codec: String,

        #[arg(long, default_value = "yuv420p")]
        pixel_format: String,

        /// Run the encoder directly instead of through a shell
        #[arg(long)]
        no_shell: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Gaussian,
    Lanczos3,
}

impl From<Algorithm> for ResampleFilter {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResampleFilter::Nearest,
            Algorithm::Bilinear => ResampleFilter::Bilinear,
            Algorithm::Bicubic => ResampleFilter::Bicubic,
            Algorithm::Gaussian => ResampleFilter::Gaussian,
            Algorithm::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    Jpeg,
    Png,
    Gif,
    Tiff,
    Bmp,
    Webp,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Jpeg => OutputFormat::Jpeg,
            Format::Png => OutputFormat::Png,
            Format::Gif => OutputFormat::Gif,
            Format::Tiff => OutputFormat::Tiff,
            Format::Bmp => OutputFormat::Bmp,
            Format::Webp => OutputFormat::WebP,
        }
    }
}

pub fn exec_mode(no_shell: bool) -> ExecMode {
    if no_shell {
        ExecMode::Direct
    } else {
        ExecMode::Shell
    }
}
