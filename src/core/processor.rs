// panelkit/src/core/processor.rs
use super::policy::{derive_contain_size, derive_crop_height, derive_letterbox_offset, derive_width_bound_height};
use super::request::require_positive;
use super::{
    ContainRequest, ImageToolError, LetterboxRequest, OutputFileSet, OutputFormat, ProcessConfig,
    Result, SliceFailure, SliceRequest, VideoRequest, WidthScaleRequest,
};
use crate::processors::{
    Canvas, Compressor, Decoder, Encoder, FfmpegEncoder, Loader, Painter, Resampler, Resizer,
    VideoEncoder,
};
use image::DynamicImage;
use std::io::Write;
use std::path::Path;

/// Runs every operation against a set of swappable collaborators.
///
/// Each call is synchronous: decode, compute geometry, write, return. The
/// processor holds no per-call state, so one instance may be shared across
/// threads as long as callers keep output paths disjoint.
pub struct ImageProcessor {
    config: ProcessConfig,
    decoder: Box<dyn Decoder>,
    resizer: Box<dyn Resizer>,
    canvas: Box<dyn Canvas>,
    encoder: Box<dyn Encoder>,
    video: Box<dyn VideoEncoder>,
}

impl ImageProcessor {
    pub fn new(config: ProcessConfig) -> Self {
        let decoder = Loader::new().with_max_dimensions(config.max_dimensions);
        let encoder = Compressor::new(config.jpeg_quality);
        let video = FfmpegEncoder::new(config.video.clone());

        Self {
            config,
            decoder: Box::new(decoder),
            resizer: Box::new(Resampler::new()),
            canvas: Box::new(Painter::new()),
            encoder: Box::new(encoder),
            video: Box::new(video),
        }
    }

    pub fn with_decoder(mut self, decoder: impl Decoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn with_resizer(mut self, resizer: impl Resizer + 'static) -> Self {
        self.resizer = Box::new(resizer);
        self
    }

    pub fn with_canvas(mut self, canvas: impl Canvas + 'static) -> Self {
        self.canvas = Box::new(canvas);
        self
    }

    pub fn with_encoder(mut self, encoder: impl Encoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn with_video_encoder(mut self, video: impl VideoEncoder + 'static) -> Self {
        self.video = Box::new(video);
        self
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Cut the source into bands of one fixed height, top to bottom.
    ///
    /// Rows left over below the last full band are dropped. A source shorter
    /// than the derived band height is the exception: the band height is
    /// clamped to the source, which comes out as a single full-height segment
    /// instead of nothing. On failure the
    /// bands already written stay on disk and are listed in the returned
    /// [`SliceFailure`].
    pub fn slice(&self, request: &SliceRequest) -> std::result::Result<OutputFileSet, SliceFailure> {
        let mut written = OutputFileSet::new();
        match self.slice_into(request, &mut written) {
            Ok(()) => Ok(written),
            Err(error) => Err(SliceFailure { error, written }),
        }
    }

    fn slice_into(&self, request: &SliceRequest, written: &mut OutputFileSet) -> Result<()> {
        request.validate()?;
        let image = self.decoder.open(&request.source)?;
        let (width, height) = (image.width(), image.height());

        let derived = derive_crop_height(width, request.aspect_ratio, request.max_height, request.min_height);
        let crop_height = derived.clamp(1, height.max(1));
        if crop_height != derived {
            log::debug!(
                "Crop height {} clamped to source height {}",
                derived,
                crop_height
            );
        }

        log::info!(
            "Slicing {} ({}x{}) into {}px bands",
            request.source.display(),
            width,
            height,
            crop_height
        );

        create_output_dir(&request.output_dir)?;

        let mut y = 0u32;
        while y.checked_add(crop_height).is_some_and(|end| end <= height) {
            let segment = image.crop_imm(0, y, width, crop_height);
            let path = request.output_file_name(y);
            self.encoder.save(&segment, &path, Some(request.format))?;
            written.push(path);
            y += crop_height;
        }

        let dropped = height - y;
        if dropped > 0 {
            log::debug!("Dropped {} trailing rows", dropped);
        }

        Ok(())
    }

    /// Shrink to `request.width`, keeping the aspect ratio.
    ///
    /// Sources no wider than the target are left alone: the call succeeds and
    /// nothing is written.
    pub fn scale_down_by_width(&self, request: &WidthScaleRequest) -> Result<()> {
        require_positive("Target width", request.width)?;
        ensure_distinct(&request.source, &request.output)?;

        let image = self.decoder.open(&request.source)?;
        if image.width() <= request.width {
            log::info!(
                "{} is {}px wide, not above {}px; nothing to do",
                request.source.display(),
                image.width(),
                request.width
            );
            return Ok(());
        }

        let height = derive_width_bound_height(image.width(), image.height(), request.width);
        let resized = self.resizer.resize(&image, request.width, height, request.filter);
        self.save(&resized, &request.output, None)
    }

    /// Resize so the image fits inside the box, enlarging it if needed.
    pub fn scale_by_resolution(&self, request: &ContainRequest) -> Result<()> {
        require_positive("Maximum width", request.max_width)?;
        require_positive("Maximum height", request.max_height)?;
        ensure_distinct(&request.source, &request.output)?;

        let image = self.decoder.open(&request.source)?;
        let (width, height) =
            derive_contain_size(image.width(), image.height(), request.max_width, request.max_height);
        self.check_output_size(width, height)?;

        let resized = self.resizer.resize(&image, width, height, request.filter);
        self.save(&resized, &request.output, None)
    }

    /// Centre the unscaled source on a solid canvas and save it as PNG.
    ///
    /// A source larger than the canvas is cropped by the canvas edges.
    pub fn scale_up_and_fill(&self, request: &LetterboxRequest) -> Result<()> {
        require_positive("Canvas width", request.width)?;
        require_positive("Canvas height", request.height)?;
        ensure_distinct(&request.source, &request.output)?;

        self.check_output_size(request.width, request.height)?;
        let image = self.decoder.open(&request.source)?;

        let mut canvas = self.canvas.new_canvas(request.width, request.height);
        self.canvas.fill(&mut canvas, request.color);

        let (x, y) = derive_letterbox_offset(request.width, request.height, image.width(), image.height());
        self.canvas.draw(&mut canvas, &image, x, y);

        let opaque = DynamicImage::ImageRgb8(canvas.to_rgb8());
        self.save(&opaque, &request.output, Some(OutputFormat::Png))
    }

    /// Re-encode `source` into the format implied by `output`'s extension.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(&self, source: P, output: Q) -> Result<()> {
        let (source, output) = (source.as_ref(), output.as_ref());
        ensure_distinct(source, output)?;

        let image = self.decoder.open(source)?;
        self.save(&image, output, None)
    }

    /// Encode the clips, in order, into a single video.
    ///
    /// Blocks until the encoder exits; there is no timeout or cancellation.
    pub fn compose_video(&self, request: &VideoRequest, sink: &mut dyn Write) -> Result<()> {
        request.validate()?;
        log::info!(
            "Composing {} clip(s) into {}",
            request.clips.len(),
            request.output.display()
        );
        self.video.encode(request, sink)
    }

    /// Rasters this processor allocates obey the same bound as decoded input.
    fn check_output_size(&self, width: u32, height: u32) -> Result<()> {
        if let Some((max_width, max_height)) = self.config.max_dimensions {
            if width > max_width || height > max_height {
                return Err(ImageToolError::LimitExceeded(format!(
                    "Output size {}x{} exceeds maximum {}x{}",
                    width, height, max_width, max_height
                )));
            }
        }
        Ok(())
    }

    fn save(&self, image: &DynamicImage, path: &Path, format: Option<OutputFormat>) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_output_dir(parent)?;
            }
        }
        self.encoder.save(image, path, format)
    }
}

/// A directory that cannot be created is a failure to write the output.
fn create_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| ImageToolError::Encode {
        path: dir.to_path_buf(),
        source: image::ImageError::IoError(e),
    })
}

fn ensure_distinct(source: &Path, output: &Path) -> Result<()> {
    if source == output {
        return Err(ImageToolError::InvalidParameter(format!(
            "Output would overwrite source: {}",
            source.display()
        )));
    }
    Ok(())
}
