//! Line segment detection on binary edge maps.
//!
//! A progressive probabilistic Hough transform:
//!
//! - Every non-zero pixel votes into a `(theta, rho)` accumulator. Pixels are
//!   visited in raster order, so results are deterministic for a given input.
//! - When a pixel's best bin reaches `vote_threshold`, the corresponding line
//!   is walked in both directions from the pixel. Runs of missing pixels up to
//!   `max_line_gap` long are bridged.
//! - The walked extent becomes a segment when it spans at least
//!   `min_line_length` along x or y. The walked pixels are removed either way,
//!   and their votes are withdrawn for accepted segments, so each edge pixel
//!   contributes to at most one segment.
//!
//! Parameters are in pixels (distances) and radians (angles) of the input map.

mod hough;

use crate::error::{LaneError, LaneResult};
use crate::image::{Frame, ImageView};
use crate::types::LineSegment;
use serde::{Deserialize, Serialize};

/// Finest accepted distance resolution, in pixels.
pub const MIN_DISTANCE_RESOLUTION: f32 = 0.5;
/// Finest accepted angle resolution (0.1 degree).
pub const MIN_ANGLE_RESOLUTION: f32 = std::f32::consts::PI / 1800.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Accumulator distance resolution in pixels.
    pub distance_resolution: f32,
    /// Accumulator angle resolution in radians.
    pub angle_resolution: f32,
    /// Minimum votes for a line to be followed.
    pub vote_threshold: u32,
    /// Segments shorter than this (along both axes) are rejected.
    pub min_line_length: f32,
    /// Largest gap bridged between pixels of one segment.
    pub max_line_gap: f32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            distance_resolution: 1.0,
            angle_resolution: std::f32::consts::PI / 180.0,
            vote_threshold: 20,
            min_line_length: 20.0,
            max_line_gap: 500.0,
        }
    }
}

impl HoughParams {
    pub fn validate(&self) -> LaneResult<()> {
        if !(self.distance_resolution >= MIN_DISTANCE_RESOLUTION
            && self.distance_resolution.is_finite())
        {
            return Err(LaneError::InvalidParams(format!(
                "distance resolution must be at least {MIN_DISTANCE_RESOLUTION} px, got {}",
                self.distance_resolution
            )));
        }
        if !(self.angle_resolution >= MIN_ANGLE_RESOLUTION
            && self.angle_resolution <= std::f32::consts::PI)
        {
            return Err(LaneError::InvalidParams(format!(
                "angle resolution must lie in [{MIN_ANGLE_RESOLUTION}, pi], got {}",
                self.angle_resolution
            )));
        }
        if self.vote_threshold == 0 {
            return Err(LaneError::InvalidParams(
                "vote threshold must be at least 1".to_string(),
            ));
        }
        if !(self.min_line_length >= 0.0 && self.max_line_gap >= 0.0) {
            return Err(LaneError::InvalidParams(format!(
                "line length and gap must be non-negative, got {} / {}",
                self.min_line_length, self.max_line_gap
            )));
        }
        Ok(())
    }
}

/// Detect line segments among the non-zero pixels of a single-channel map.
pub fn detect_segments(edges: &Frame, params: &HoughParams) -> LaneResult<Vec<LineSegment>> {
    edges.validate()?;
    if edges.channels() != 1 {
        return Err(LaneError::MalformedInput(format!(
            "segment detection expects a single-channel map, got {} channels",
            edges.channels()
        )));
    }
    params.validate()?;
    Ok(hough::probabilistic_hough(edges, params))
}
