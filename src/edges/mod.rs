//! Edge detection: grayscale, Gaussian blur, Canny.
//!
//! This stage turns a color frame into a binary single-channel edge map that
//! the segment detector consumes:
//!
//! - Luma conversion (BT.601) and promotion to `ImageF32` on the 0..255 scale,
//!   so the Canny thresholds keep their conventional meaning.
//! - Separable Gaussian blur with an odd kernel size to suppress noise.
//! - Sobel gradients, non-maximum suppression and hysteresis thresholding.
//!
//! Borders are handled by clamping indices (replicate).

pub mod blur;
pub mod canny;
pub mod grad;

pub use blur::{gaussian_blur, gaussian_kernel};
pub use canny::canny;
pub use grad::{sobel_gradients, Grad, GradientNorm};

use crate::error::{LaneError, LaneResult};
use crate::image::{Frame, ImageF32};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Gaussian kernel size, odd and at least 3.
    pub blur_kernel_size: usize,
    /// Lower hysteresis threshold on the gradient magnitude.
    pub canny_low_threshold: f32,
    /// Upper hysteresis threshold on the gradient magnitude.
    pub canny_high_threshold: f32,
    /// Use the L2 gradient norm instead of `|gx| + |gy|`.
    pub l2_gradient: bool,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            blur_kernel_size: 5,
            canny_low_threshold: 50.0,
            canny_high_threshold: 150.0,
            l2_gradient: false,
        }
    }
}

impl EdgeParams {
    pub fn validate(&self) -> LaneResult<()> {
        if self.blur_kernel_size < 3 || self.blur_kernel_size % 2 == 0 {
            return Err(LaneError::InvalidParams(format!(
                "blur kernel size must be odd and >= 3, got {}",
                self.blur_kernel_size
            )));
        }
        if !(self.canny_low_threshold >= 0.0
            && self.canny_low_threshold <= self.canny_high_threshold)
        {
            return Err(LaneError::InvalidParams(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {} / {}",
                self.canny_low_threshold, self.canny_high_threshold
            )));
        }
        Ok(())
    }

    fn norm(&self) -> GradientNorm {
        if self.l2_gradient {
            GradientNorm::L2
        } else {
            GradientNorm::L1
        }
    }
}

/// Binary edge map (single channel, 0 / 255) of `frame`.
pub fn detect_edges(frame: &Frame, params: &EdgeParams) -> LaneResult<Frame> {
    frame.validate()?;
    params.validate()?;
    let gray = ImageF32::from_frame(frame);
    let blurred = gaussian_blur(&gray, params.blur_kernel_size);
    Ok(canny(
        &blurred,
        params.canny_low_threshold,
        params.canny_high_threshold,
        params.norm(),
    ))
}
