//! Diagnostics data model exposed by the detector and the binaries.
//!
//! [`FrameReport`] is the per-frame trace: input shape, segment and bucket
//! counts, fitted models, final lines, recorded anomalies and stage timings.

pub mod report;
pub mod timing;

pub use report::{FrameReport, InputDescriptor};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
