//! Parameter types configuring the per-frame lane pipeline.
//!
//! Every field has a default, so a partial JSON object deserializes into a
//! complete parameter set. Defaults target 960×540 to 1280×720 dash-camera
//! footage.

use crate::edges::EdgeParams;
use crate::error::{LaneError, LaneResult};
use crate::lanes::ExtrapolateParams;
use crate::render::RenderParams;
use crate::roi::RoiParams;
use crate::segments::HoughParams;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters, one group per stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneParams {
    /// Blur and Canny thresholds.
    pub edges: EdgeParams,
    /// Probabilistic Hough transform.
    pub hough: HoughParams,
    /// Region-of-interest trapezoid.
    pub roi: RoiParams,
    /// Lane span and slope guard.
    pub extrapolate: ExtrapolateParams,
    /// Overlay color, stroke and blend weights.
    pub render: RenderParams,
}

impl LaneParams {
    /// Check every stage's parameters before any frame is touched.
    pub fn validate(&self) -> LaneResult<()> {
        self.edges.validate()?;
        self.hough.validate()?;
        let roi = &self.roi;
        let fractions = [
            ("roi.bottom_frac", roi.bottom_frac),
            ("roi.top_frac", roi.top_frac),
            ("roi.side_margin_frac", roi.side_margin_frac),
            ("roi.top_inset_frac", roi.top_inset_frac),
            ("extrapolate.y2_frac", self.extrapolate.y2_frac),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(LaneError::InvalidParams(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }
        let guard = self.extrapolate.min_abs_slope;
        if !(guard > 0.0 && guard.is_finite()) {
            return Err(LaneError::InvalidParams(format!(
                "extrapolate.min_abs_slope must be positive, got {guard}"
            )));
        }
        let render = &self.render;
        if !(render.blend_alpha.is_finite()
            && render.overlay_beta.is_finite()
            && render.blend_gamma.is_finite())
        {
            return Err(LaneError::InvalidParams(
                "render blend weights must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
