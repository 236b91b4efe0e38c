// panelkit/src/utils/mod.rs
use crate::core::{Clip, ImageToolError, Result};

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

/// Parse `path:seconds`. The last colon splits, so paths may contain colons.
pub fn parse_clip(spec: &str) -> Result<Clip> {
    let (path, duration) = spec.rsplit_once(':').ok_or_else(|| {
        ImageToolError::InvalidParameter(format!("Expected <path>:<seconds>, got '{}'", spec))
    })?;

    if path.is_empty() {
        return Err(ImageToolError::InvalidParameter(format!(
            "Missing image path in '{}'",
            spec
        )));
    }

    let duration: f64 = duration.trim().parse().map_err(|_| {
        ImageToolError::InvalidParameter(format!("Invalid duration in '{}'", spec))
    })?;

    Ok(Clip::new(path, duration))
}
