//! Pure dimension math for slicing, resizing and letterboxing.
//!
//! Nothing here touches pixels or the filesystem. All integer divisions
//! truncate toward zero so derived sizes match the reference output exactly.

/// Height of every band when slicing an image of `source_width` pixels.
///
/// The aspect-derived height `floor(source_width / aspect_ratio)` is used as is
/// when it reaches `max_height`. Below the cap it is replaced by `min_height`,
/// which keeps narrow images from being cut into many thin strips.
///
/// ```
/// # use panelkit::derive_crop_height;
/// assert_eq!(derive_crop_height(400, 2.0, 300, 250), 250);
/// assert_eq!(derive_crop_height(1200, 2.0, 300, 250), 600);
/// ```
pub fn derive_crop_height(source_width: u32, aspect_ratio: f64, max_height: u32, min_height: u32) -> u32 {
    // `as` saturates, so NaN and negative quotients land on 0 and fall back.
    let crop_height = (source_width as f64 / aspect_ratio).floor() as u32;
    if crop_height < max_height {
        min_height
    } else {
        crop_height
    }
}

/// Height after scaling `(source_width, source_height)` to `target_width`.
pub fn derive_width_bound_height(source_width: u32, source_height: u32, target_width: u32) -> u32 {
    scale_edge(source_height, target_width, source_width)
}

/// Largest size with the source aspect ratio that fits inside `max_width x max_height`.
///
/// Width is tried as the binding edge first; if the resulting height overflows
/// the box, height binds instead.
pub fn derive_contain_size(
    source_width: u32,
    source_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    let new_height = scale_edge(source_height, max_width, source_width);
    if new_height > max_height {
        (scale_edge(source_width, max_height, source_height), max_height)
    } else {
        (max_width, new_height)
    }
}

/// Top-left offset that centres a source on a canvas. Negative when the
/// source overflows the canvas; clipping is left to the drawing step.
pub fn derive_letterbox_offset(
    canvas_width: u32,
    canvas_height: u32,
    source_width: u32,
    source_height: u32,
) -> (i64, i64) {
    let x = (canvas_width as i64 - source_width as i64) / 2;
    let y = (canvas_height as i64 - source_height as i64) / 2;
    (x, y)
}

/// `floor(edge * numerator / denominator)`, at least 1.
fn scale_edge(edge: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 1;
    }
    let scaled = edge as u64 * numerator as u64 / denominator as u64;
    scaled.clamp(1, u32::MAX as u64) as u32
}
