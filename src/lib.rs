pub mod cli;
mod core;
mod processors;
mod utils;

#[cfg(test)]
mod test_helpers;

pub use crate::cli::{Algorithm, Cli, Commands, Format};
pub use crate::core::{
    derive_contain_size, derive_crop_height, derive_letterbox_offset, derive_width_bound_height,
    Clip, ContainRequest, ExecMode, FillColor, ImageProcessor, ImageToolError,
    LetterboxRequest, OutputFileSet, OutputFormat, ProcessConfig, ResampleFilter, Result,
    SliceFailure, SliceRequest, VideoConfig, VideoRequest, WidthScaleRequest,
};
pub use crate::processors::{
    Canvas, Compressor, Decoder, Encoder, FfmpegEncoder, Loader, Painter, Resampler, Resizer,
    VideoEncoder,
};
pub use crate::utils::{format_file_size, parse_clip};

pub mod prelude {
    pub use crate::{
        Clip, ContainRequest, ImageProcessor, LetterboxRequest, ProcessConfig, ResampleFilter,
        SliceRequest, VideoRequest, WidthScaleRequest,
    };
    pub use crate::processors::prelude::*;
}

// Re-export commonly used types
pub use image::DynamicImage;
