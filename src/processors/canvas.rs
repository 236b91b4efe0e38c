// panelkit/src/processors/canvas.rs
use crate::core::FillColor;
use image::{imageops, DynamicImage, RgbaImage};
use imageproc::rect::Rect;

/// Drawing surface used for letterboxing.
pub trait Canvas: Send + Sync {
    fn new_canvas(&self, width: u32, height: u32) -> DynamicImage;

    fn fill(&self, canvas: &mut DynamicImage, color: FillColor);

    /// Paint `source` with its top-left corner at `(x, y)`. Anything outside
    /// the canvas is clipped.
    fn draw(&self, canvas: &mut DynamicImage, source: &DynamicImage, x: i64, y: i64);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Painter;

impl Painter {
    pub fn new() -> Self {
        Self
    }
}

impl Canvas for Painter {
    fn new_canvas(&self, width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
    }

    fn fill(&self, canvas: &mut DynamicImage, color: FillColor) {
        let (width, height) = (canvas.width(), canvas.height());
        if width == 0 || height == 0 {
            return;
        }
        let mut buffer = canvas.to_rgba8();
        imageproc::drawing::draw_filled_rect_mut(
            &mut buffer,
            Rect::at(0, 0).of_size(width, height),
            color.to_rgba(),
        );
        *canvas = DynamicImage::ImageRgba8(buffer);
    }

    fn draw(&self, canvas: &mut DynamicImage, source: &DynamicImage, x: i64, y: i64) {
        log::debug!(
            "Drawing {}x{} onto {}x{} canvas at ({}, {})",
            source.width(),
            source.height(),
            canvas.width(),
            canvas.height(),
            x,
            y
        );
        imageops::overlay(canvas, &DynamicImage::ImageRgba8(source.to_rgba8()), x, y);
    }
}
