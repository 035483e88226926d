//! # Transform Module
//!
//! Grayscale conversion plus aspect-preserving downscale.
//!
//! Images wider than `max_width` are scaled down to that width; narrower
//! images keep their size. The result is always single-channel.

mod resize;

pub use resize::GrayResizer;

use crate::error::TransformError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default width limit for processed images
pub const DEFAULT_MAX_WIDTH: u32 = 1024;

/// Options for [`to_grayscale_and_resize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Width limit; `None` keeps the original size
    pub max_width: Option<u32>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            max_width: Some(DEFAULT_MAX_WIDTH),
        }
    }
}

/// Outcome of a processed image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// (width, height)
    pub original_size: (u32, u32),
    /// (width, height)
    pub output_size: (u32, u32),
}

/// Target size for an image of `width` x `height` under `max_width`.
///
/// Dimensions are rounded and never drop below one pixel.
pub fn target_size(width: u32, height: u32, max_width: Option<u32>) -> (u32, u32) {
    let scale = match max_width {
        Some(limit) if width > limit => limit as f64 / width as f64,
        _ => 1.0,
    };

    let scaled = |value: u32| ((value as f64 * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

/// Read an image, convert it to grayscale, downscale it and save it.
///
/// The output format follows the output path's extension. Missing parent
/// directories are created.
pub fn to_grayscale_and_resize(
    input_path: &Path,
    output_path: &Path,
    options: TransformOptions,
) -> Result<ProcessResult, TransformError> {
    let image = image::open(input_path).map_err(|e| TransformError::Read {
        path: input_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let original_size = (image.width(), image.height());
    let (width, height) = target_size(original_size.0, original_size.1, options.max_width);

    let gray = GrayResizer::new().resize_to_grayscale(&image, width, height)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TransformError::Write {
            path: output_path.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    gray.save(output_path).map_err(|e| TransformError::Write {
        path: output_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(
        input = %input_path.display(),
        output = %output_path.display(),
        width,
        height,
        "Saved grayscale image"
    );

    Ok(ProcessResult {
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        original_size,
        output_size: (width, height),
    })
}
