use super::params::LaneParams;
use crate::diagnostics::{elapsed_ms, FrameReport, InputDescriptor, TimingBreakdown};
use crate::edges::detect_edges;
use crate::error::LaneResult;
use crate::image::{Frame, ImageView};
use crate::lanes::{estimate_lanes, LaneEstimate};
use crate::render::render_lanes;
use crate::roi::mask_region;
use crate::segments::detect_segments;
use crate::types::{LaneLines, LineSegment};
use log::debug;
use std::time::Instant;

/// Lane estimate for one frame, before rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct LaneDetection {
    /// Raw segments returned by the Hough stage.
    pub segments: Vec<LineSegment>,
    pub estimate: LaneEstimate,
    pub report: FrameReport,
}

impl LaneDetection {
    pub fn lines(&self) -> &LaneLines {
        &self.estimate.lines
    }
}

/// Composited frame plus the trace that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    pub frame: Frame,
    pub report: FrameReport,
}

/// Stateless per-frame lane detector. Frames are independent; the same
/// detector can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct LaneDetector {
    params: LaneParams,
}

impl LaneDetector {
    /// Create a detector with the supplied parameters.
    pub fn new(params: LaneParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LaneParams {
        &self.params
    }

    /// Run edges, region mask, segment detection and lane estimation.
    pub fn detect(&self, frame: &Frame) -> LaneResult<LaneDetection> {
        let total_start = Instant::now();
        frame.validate()?;
        self.params.validate()?;
        let mut timings = TimingBreakdown::default();

        let stage_start = Instant::now();
        let edges = detect_edges(frame, &self.params.edges)?;
        timings.push("edges", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        let masked = mask_region(&edges, &self.params.roi);
        timings.push("roi", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        let segments = detect_segments(&masked, &self.params.hough)?;
        timings.push("segments", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        let estimate = estimate_lanes(&segments, frame.height(), &self.params.extrapolate);
        timings.push("lanes", elapsed_ms(stage_start));

        timings.total_ms = elapsed_ms(total_start);
        let report = FrameReport::new(describe(frame), segments.len(), &estimate, timings);
        debug!("LaneDetector::detect {}", report.summary());

        Ok(LaneDetection {
            segments,
            estimate,
            report,
        })
    }

    /// Detect lanes and composite them over a copy of `frame`.
    pub fn process(&self, frame: &Frame) -> LaneResult<FrameOutput> {
        let total_start = Instant::now();
        let LaneDetection { mut report, .. } = self.detect(frame)?;

        let stage_start = Instant::now();
        let composited = render_lanes(frame, &report.lines, &self.params.render)?;
        report.timings.push("render", elapsed_ms(stage_start));
        report.timings.total_ms = elapsed_ms(total_start);

        Ok(FrameOutput {
            frame: composited,
            report,
        })
    }
}

fn describe(frame: &Frame) -> InputDescriptor {
    InputDescriptor {
        width: frame.width(),
        height: frame.height(),
        channels: frame.channels(),
    }
}
