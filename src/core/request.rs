// panelkit/src/core/request.rs
use super::{FillColor, ImageToolError, OutputFormat, ResampleFilter, Result};
use std::path::{Path, PathBuf};

/// Cut a tall image into equal-height bands.
#[derive(Debug, Clone)]
pub struct SliceRequest {
    pub source: PathBuf,
    /// Directory receiving one file per band, named `<y>.<format>`.
    pub output_dir: PathBuf,
    pub max_height: u32,
    pub min_height: u32,
    pub aspect_ratio: f64,
    pub format: OutputFormat,
}

impl SliceRequest {
    pub fn output_file_name(&self, y: u32) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", y, self.format.extension()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_height == 0 || self.min_height == 0 {
            return Err(ImageToolError::InvalidParameter(
                "Slice heights must be positive".to_string(),
            ));
        }

        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ImageToolError::InvalidParameter(format!(
                "Aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }

        if self.min_height > self.max_height {
            log::warn!(
                "Minimum slice height {} exceeds maximum {}",
                self.min_height,
                self.max_height
            );
        }

        Ok(())
    }
}

/// Paths written by a slice run, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputFileSet {
    paths: Vec<PathBuf>,
}

impl OutputFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<'a> IntoIterator for &'a OutputFileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// A slice run that stopped early. Files in `written` are left on disk.
#[derive(Debug)]
pub struct SliceFailure {
    pub error: ImageToolError,
    pub written: OutputFileSet,
}

impl SliceFailure {
    /// Remove every segment written before the failure.
    ///
    /// Stops at the first file that cannot be removed; files already missing
    /// are skipped.
    pub fn cleanup(&self) -> Result<()> {
        for path in &self.written {
            match std::fs::remove_file(path) {
                Ok(()) => log::debug!("Removed partial segment {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for SliceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} segment(s) written before failure)",
            self.error,
            self.written.len()
        )
    }
}

impl std::error::Error for SliceFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Downscale to a target width, keeping the aspect ratio.
#[derive(Debug, Clone)]
pub struct WidthScaleRequest {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub filter: ResampleFilter,
}

/// Resize to fit inside a box, up or down.
#[derive(Debug, Clone)]
pub struct ContainRequest {
    pub source: PathBuf,
    pub output: PathBuf,
    pub max_width: u32,
    pub max_height: u32,
    pub filter: ResampleFilter,
}

/// Centre the unscaled source on a solid canvas.
#[derive(Debug, Clone)]
pub struct LetterboxRequest {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub color: FillColor,
}

pub(crate) fn require_positive(name: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(ImageToolError::InvalidParameter(format!(
            "{} must be positive",
            name
        )));
    }
    Ok(())
}

/// One still image shown for `duration` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub path: PathBuf,
    pub duration: f64,
}

impl Clip {
    pub fn new(path: impl AsRef<Path>, duration: f64) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            duration,
        }
    }
}

/// Stills to concatenate into one video, played in the order given.
#[derive(Debug, Clone)]
pub struct VideoRequest {
    pub clips: Vec<Clip>,
    pub output: PathBuf,
}

impl VideoRequest {
    pub fn validate(&self) -> Result<()> {
        if self.clips.is_empty() {
            return Err(ImageToolError::InvalidParameter(
                "At least one clip is required".to_string(),
            ));
        }

        for clip in &self.clips {
            if !clip.duration.is_finite() || clip.duration <= 0.0 {
                return Err(ImageToolError::InvalidParameter(format!(
                    "Duration for {} must be positive, got {}",
                    clip.path.display(),
                    clip.duration
                )));
            }
        }

        Ok(())
    }
}
