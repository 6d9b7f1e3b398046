use crate::types::{LaneAnomaly, LineModel, LineSegment, Side};
use serde::{Deserialize, Serialize};

/// Vertical span and numeric guard for lane extrapolation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrapolateParams {
    /// Upper end of the drawn lane as a fraction of the frame height.
    pub y2_frac: f64,
    /// Lines flatter than this cannot be inverted reliably and are omitted.
    pub min_abs_slope: f64,
}

impl Default for ExtrapolateParams {
    fn default() -> Self {
        Self {
            y2_frac: 0.6,
            min_abs_slope: 1e-3,
        }
    }
}

/// Turn a line model into a segment from the bottom row (`y = height`) up to
/// `round(height * y2_frac)`. The x endpoints are rounded to whole pixels.
///
/// `side` only labels the anomaly returned for a near-zero slope.
pub fn extrapolate(
    model: &LineModel,
    height: usize,
    side: Side,
    params: &ExtrapolateParams,
) -> Result<LineSegment, LaneAnomaly> {
    let slope = model.slope;
    if !slope.is_finite() || slope == 0.0 || slope.abs() < params.min_abs_slope {
        return Err(LaneAnomaly::NearZeroSlope { side, slope });
    }
    let y1 = height as f64;
    let y2 = (y1 * params.y2_frac).round();
    let x1 = model.x_at(y1).round();
    let x2 = model.x_at(y2).round();
    if !(x1.is_finite() && x2.is_finite()) {
        return Err(LaneAnomaly::NearZeroSlope { side, slope });
    }
    Ok(LineSegment::new(x1, y1, x2, y2))
}
