// panelkit/src/processors/mod.rs
mod canvas;
mod compressor;
mod loader;
mod resizer;
mod video;

pub use canvas::{Canvas, Painter};
pub use compressor::{Compressor, Encoder};
pub use loader::{Decoder, Loader};
pub use resizer::{Resampler, Resizer};
pub use video::{FfmpegEncoder, VideoEncoder};

pub mod prelude {
    pub use super::{Canvas, Decoder, Encoder, Resizer, VideoEncoder};
}
