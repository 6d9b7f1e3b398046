use super::TimingBreakdown;
use crate::lanes::LaneEstimate;
use crate::types::{LaneAnomaly, LaneLines, LineModel};
use serde::Serialize;

/// Shape of the frame a report was produced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

/// Per-frame trace of the lane pipeline.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    /// Position of the frame in its sequence, when run through a sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub input: InputDescriptor,
    pub segment_count: usize,
    pub left_candidates: usize,
    pub right_candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_model: Option<LineModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_model: Option<LineModel>,
    pub lines: LaneLines,
    pub anomalies: Vec<LaneAnomaly>,
    pub timings: TimingBreakdown,
}

fn format_optional(model: Option<LineModel>) -> String {
    model
        .map(|m| format!("{:.3}", m.slope))
        .unwrap_or_else(|| "-".to_string())
}

impl FrameReport {
    pub fn new(
        input: InputDescriptor,
        segment_count: usize,
        estimate: &LaneEstimate,
        timings: TimingBreakdown,
    ) -> Self {
        Self {
            index: None,
            input,
            segment_count,
            left_candidates: estimate.left_candidates,
            right_candidates: estimate.right_candidates,
            left_model: estimate.left_model,
            right_model: estimate.right_model,
            lines: estimate.lines,
            anomalies: estimate.anomalies.clone(),
            timings,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// One-line summary used in logs and by the binaries.
    pub fn summary(&self) -> String {
        format!(
            "{}x{} segments={} left={} (slope {}) right={} (slope {}) anomalies={} {:.2}ms",
            self.input.width,
            self.input.height,
            self.segment_count,
            self.left_candidates,
            format_optional(self.left_model),
            self.right_candidates,
            format_optional(self.right_model),
            self.anomalies.len(),
            self.timings.total_ms
        )
    }
}
