//! Grayscale resizing on top of fast_image_resize.

use crate::error::TransformError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, GrayImage};

/// Reusable grayscale resizer
pub struct GrayResizer {
    resizer: Resizer,
}

impl GrayResizer {
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
        }
    }

    /// Convert to grayscale, then resize to exactly `width` x `height`.
    ///
    /// Uses a box filter, which averages source pixels when shrinking.
    pub fn resize_to_grayscale(
        &mut self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<GrayImage, TransformError> {
        let gray = image.to_luma8();
        let (src_width, src_height) = gray.dimensions();

        if src_width == 0 || src_height == 0 {
            return Err(TransformError::InvalidDimensions {
                width: src_width,
                height: src_height,
            });
        }
        if width == 0 || height == 0 {
            return Err(TransformError::InvalidDimensions { width, height });
        }
        if (src_width, src_height) == (width, height) {
            return Ok(gray);
        }

        let src_image = Image::from_vec_u8(src_width, src_height, gray.into_raw(), PixelType::U8)
            .map_err(|e| TransformError::Resize(e.to_string()))?;
        let mut dst_image = Image::new(width, height, PixelType::U8);

        let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box));
        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| TransformError::Resize(e.to_string()))?;

        GrayImage::from_raw(width, height, dst_image.into_vec())
            .ok_or_else(|| TransformError::Resize("Output buffer has the wrong size".to_string()))
    }
}

impl Default for GrayResizer {
    fn default() -> Self {
        Self::new()
    }
}
