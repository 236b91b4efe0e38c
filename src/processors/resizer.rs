// panelkit/src/processors/resizer.rs
use crate::core::ResampleFilter;
use image::{imageops::FilterType, DynamicImage};

/// Resamples a raster to an exact size.
pub trait Resizer: Send + Sync {
    fn resize(&self, image: &DynamicImage, width: u32, height: u32, filter: ResampleFilter) -> DynamicImage;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Resampler;

impl Resampler {
    pub fn new() -> Self {
        Self
    }

    fn filter_type(filter: ResampleFilter) -> FilterType {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Bilinear => FilterType::Triangle,
            ResampleFilter::Bicubic => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Resizer for Resampler {
    fn resize(&self, image: &DynamicImage, width: u32, height: u32, filter: ResampleFilter) -> DynamicImage {
        if width == image.width() && height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resize");
            return image.clone();
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{} ({:?})",
            image.width(),
            image.height(),
            width,
            height,
            filter
        );

        image.resize_exact(width, height, Self::filter_type(filter))
    }
}
