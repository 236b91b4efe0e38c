//! In-memory collaborators for exercising [`ImageProcessor`] without codecs
//! or subprocesses.
//!
//! [`FakeBackend`] implements every capability trait. It decodes registered
//! paths into blank rasters of the registered size and records each call,
//! so tests assert on requested dimensions instead of pixels.

use crate::core::{
    Clip, FillColor, ImageProcessor, ImageToolError, OutputFormat, ProcessConfig, ResampleFilter,
    Result, VideoRequest,
};
use crate::processors::{Canvas, Decoder, Encoder, Resizer, VideoEncoder};
use image::{DynamicImage, ImageError};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    Open(PathBuf),
    Resize {
        width: u32,
        height: u32,
        filter: ResampleFilter,
    },
    NewCanvas {
        width: u32,
        height: u32,
    },
    Fill(FillColor),
    Draw {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    Save {
        path: PathBuf,
        width: u32,
        height: u32,
        format: Option<OutputFormat>,
    },
    Encode {
        clips: Vec<Clip>,
        output: PathBuf,
    },
}

/// Clones share the same recording, so a test can keep one handle and move
/// the others into a processor.
#[derive(Clone, Default)]
pub struct FakeBackend {
    sources: Arc<Mutex<HashMap<PathBuf, (u32, u32)>>>,
    operations: Arc<Mutex<Vec<RecordedOp>>>,
    saves: Arc<Mutex<usize>>,
    fail_save_at: Option<usize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(self, path: impl AsRef<Path>, width: u32, height: u32) -> Self {
        self.sources
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), (width, height));
        self
    }

    /// Make the save with this zero-based index fail.
    pub fn failing_save(mut self, index: usize) -> Self {
        self.fail_save_at = Some(index);
        self
    }

    pub fn operations(&self) -> Vec<RecordedOp> {
        self.operations.lock().unwrap().clone()
    }

    pub fn processor(&self) -> ImageProcessor {
        ImageProcessor::new(ProcessConfig::default())
            .with_decoder(self.clone())
            .with_resizer(self.clone())
            .with_canvas(self.clone())
            .with_encoder(self.clone())
            .with_video_encoder(self.clone())
    }

    fn record(&self, op: RecordedOp) {
        self.operations.lock().unwrap().push(op);
    }
}

impl Decoder for FakeBackend {
    fn open(&self, path: &Path) -> Result<DynamicImage> {
        self.record(RecordedOp::Open(path.to_path_buf()));

        let size = self.sources.lock().unwrap().get(path).copied();
        match size {
            Some((width, height)) => Ok(DynamicImage::new_luma8(width, height)),
            None => Err(ImageToolError::Decode {
                path: path.to_path_buf(),
                source: ImageError::IoError(std::io::ErrorKind::NotFound.into()),
            }),
        }
    }
}

impl Resizer for FakeBackend {
    fn resize(&self, _image: &DynamicImage, width: u32, height: u32, filter: ResampleFilter) -> DynamicImage {
        self.record(RecordedOp::Resize {
            width,
            height,
            filter,
        });
        DynamicImage::new_luma8(width, height)
    }
}

impl Canvas for FakeBackend {
    fn new_canvas(&self, width: u32, height: u32) -> DynamicImage {
        self.record(RecordedOp::NewCanvas { width, height });
        DynamicImage::new_luma8(width, height)
    }

    fn fill(&self, _canvas: &mut DynamicImage, color: FillColor) {
        self.record(RecordedOp::Fill(color));
    }

    fn draw(&self, _canvas: &mut DynamicImage, source: &DynamicImage, x: i64, y: i64) {
        self.record(RecordedOp::Draw {
            x,
            y,
            width: source.width(),
            height: source.height(),
        });
    }
}

impl Encoder for FakeBackend {
    fn save(&self, image: &DynamicImage, path: &Path, format: Option<OutputFormat>) -> Result<()> {
        let index = {
            let mut saves = self.saves.lock().unwrap();
            *saves += 1;
            *saves - 1
        };

        if self.fail_save_at == Some(index) {
            return Err(ImageToolError::Encode {
                path: path.to_path_buf(),
                source: ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )),
            });
        }

        self.record(RecordedOp::Save {
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
            format,
        });
        Ok(())
    }
}

impl VideoEncoder for FakeBackend {
    fn encode(&self, request: &VideoRequest, sink: &mut dyn Write) -> Result<()> {
        self.record(RecordedOp::Encode {
            clips: request.clips.clone(),
            output: request.output.clone(),
        });
        writeln!(sink, "encoded {} clip(s)", request.clips.len())?;
        Ok(())
    }
}
