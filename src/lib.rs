#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod types;

// Stage modules. Public so tools can run a single stage, but their
// signatures follow the detector's needs.
pub mod edges;
pub mod lanes;
pub mod render;
pub mod roi;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{FrameOutput, LaneDetection, LaneDetector, LaneParams};
pub use crate::error::{LaneError, LaneResult};
pub use crate::types::{LaneAnomaly, LaneLines, LineModel, LineSegment, Polygon, Side};

// Per-frame diagnostics returned by the detector.
pub use crate::diagnostics::{FrameReport, TimingBreakdown};

// Sequence processing.
pub use crate::pipeline::{FrameSink, FrameSource, RunSummary, SequenceRunner};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lane_detector::prelude::*;
///
/// # fn main() -> Result<(), LaneError> {
/// let frame = Frame::new(1280, 720, 3);
/// let detector = LaneDetector::new(LaneParams::default());
/// let output = detector.process(&frame)?;
/// println!("{}", output.report.summary());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{Frame, ImageView};
    pub use crate::{LaneDetector, LaneError, LaneLines, LaneParams, LineSegment};
}
