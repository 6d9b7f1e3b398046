//! Lane estimation from raw line segments.
//!
//! The estimator reduces an unordered, noisy set of segments to at most one
//! line per side:
//!
//! - Classification: each segment is fitted through its endpoints and put in
//!   the left bucket when its slope is negative, the right bucket otherwise.
//!   Vertical segments have no slope-intercept form and are discarded.
//! - Averaging: each bucket collapses to the unweighted mean slope and mean
//!   intercept. There is no length weighting and no outlier rejection beyond
//!   the sign split.
//! - Extrapolation: each mean line is inverted at the bottom row and at a fixed
//!   fraction of the height, yielding a segment spanning the lower part of the
//!   frame. Lines too flat to invert are omitted.
//!
//! Every anomaly is absorbed here and reported in [`LaneEstimate::anomalies`];
//! a missing side never prevents the other side from being produced.

mod average;
mod classify;
mod extrapolate;

pub use average::average_lines;
pub use classify::{classify_segments, fit_line, SlopeBuckets};
pub use extrapolate::{extrapolate, ExtrapolateParams};

use crate::types::{LaneAnomaly, LaneLines, LineModel, LineSegment, Side};
use log::debug;
use serde::Serialize;

/// Outcome of lane estimation for one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneEstimate {
    pub left_candidates: usize,
    pub right_candidates: usize,
    pub left_model: Option<LineModel>,
    pub right_model: Option<LineModel>,
    pub lines: LaneLines,
    pub anomalies: Vec<LaneAnomaly>,
}

/// Classify, average and extrapolate `segments` for a frame of `height` rows.
pub fn estimate_lanes(
    segments: &[LineSegment],
    height: usize,
    params: &ExtrapolateParams,
) -> LaneEstimate {
    let mut estimate = LaneEstimate::default();
    if segments.is_empty() {
        debug!("estimate_lanes: no segments detected");
        estimate.anomalies.push(LaneAnomaly::NoSegmentsDetected);
        return estimate;
    }

    let buckets = classify_segments(segments);
    estimate.left_candidates = buckets.left.len();
    estimate.right_candidates = buckets.right.len();
    estimate.anomalies.extend(buckets.discarded);
    estimate.left_model = average_lines(&buckets.left);
    estimate.right_model = average_lines(&buckets.right);

    let anomalies = &mut estimate.anomalies;
    estimate.lines.left = resolve_side(estimate.left_model, Side::Left, height, params, anomalies);
    estimate.lines.right =
        resolve_side(estimate.right_model, Side::Right, height, params, anomalies);
    estimate
}

fn resolve_side(
    model: Option<LineModel>,
    side: Side,
    height: usize,
    params: &ExtrapolateParams,
    anomalies: &mut Vec<LaneAnomaly>,
) -> Option<LineSegment> {
    let model = model?;
    match extrapolate(&model, height, side, params) {
        Ok(segment) => Some(segment),
        Err(anomaly) => {
            debug!("estimate_lanes: omitting {side:?} lane, {anomaly:?}");
            anomalies.push(anomaly);
            None
        }
    }
}
