use super::{FrameSink, FrameSource};
use crate::detector::{FrameOutput, LaneDetector};
use crate::diagnostics::FrameReport;
use crate::error::{LaneError, LaneResult};
use crate::image::Frame;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Outcome of a [`SequenceRunner::run`].
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub frames_read: usize,
    pub frames_processed: usize,
    /// Indices of frames that could not be decoded or were rejected as
    /// malformed, ascending; nothing was written for them.
    pub failed_frames: Vec<usize>,
    pub cancelled: bool,
    pub reports: Vec<FrameReport>,
}

/// Pulls frames from a source, runs the detector on each and pushes the
/// composited frames to a sink in input order.
///
/// With a batch size above one, each batch is processed in parallel on the
/// rayon pool; results are still written in input order, so the output does
/// not depend on the batch size. The cancel flag is checked before every
/// batch.
///
/// A frame the source cannot decode, or the detector rejects as malformed,
/// is listed in [`RunSummary::failed_frames`] and the run continues. Any other
/// source error stops the run once the frames already read are written.
pub struct SequenceRunner<S, K> {
    detector: LaneDetector,
    source: S,
    sink: K,
    batch_size: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<S: FrameSource, K: FrameSink> SequenceRunner<S, K> {
    pub fn new(detector: LaneDetector, source: S, sink: K) -> Self {
        Self {
            detector,
            source,
            sink,
            batch_size: 1,
            cancel: None,
        }
    }

    /// Process up to `batch_size` frames concurrently (clamped to at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Stop before the next batch once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Drive the source to exhaustion (or cancellation). The sink is finished
    /// on every path, including errors.
    pub fn run(&mut self) -> LaneResult<RunSummary> {
        let mut summary = RunSummary::default();
        let driven = self.drive(&mut summary);
        let finished = self.sink.finish();
        summary.failed_frames.sort_unstable();
        driven?;
        finished?;
        info!(
            "SequenceRunner: read={} processed={} failed={} cancelled={}",
            summary.frames_read,
            summary.frames_processed,
            summary.failed_frames.len(),
            summary.cancelled
        );
        Ok(summary)
    }

    fn drive(&mut self, summary: &mut RunSummary) -> LaneResult<()> {
        let mut exhausted = false;
        while !exhausted {
            if self.is_cancelled() {
                debug!("SequenceRunner: cancelled after {} frames", summary.frames_read);
                summary.cancelled = true;
                break;
            }

            let mut batch: Vec<(usize, Frame)> = Vec::with_capacity(self.batch_size);
            let mut source_error = None;
            while batch.len() < self.batch_size {
                match self.source.next_frame() {
                    Ok(Some(frame)) => {
                        batch.push((summary.frames_read, frame));
                        summary.frames_read += 1;
                    }
                    Ok(None) => {
                        exhausted = true;
                        break;
                    }
                    Err(err) if is_frame_error(&err) => {
                        warn!(
                            "SequenceRunner: skipping unreadable frame {}: {err}",
                            summary.frames_read
                        );
                        summary.failed_frames.push(summary.frames_read);
                        summary.frames_read += 1;
                    }
                    Err(err) => {
                        source_error = Some(err);
                        break;
                    }
                }
            }

            let detector = &self.detector;
            let outputs: Vec<LaneResult<FrameOutput>> = if batch.len() > 1 {
                batch
                    .par_iter()
                    .map(|(_, frame)| detector.process(frame))
                    .collect()
            } else {
                batch
                    .iter()
                    .map(|(_, frame)| detector.process(frame))
                    .collect()
            };

            for ((index, _), output) in batch.iter().zip(outputs) {
                match output {
                    Ok(output) => {
                        self.sink.write_frame(*index, &output.frame)?;
                        summary.frames_processed += 1;
                        summary.reports.push(output.report.with_index(*index));
                    }
                    Err(LaneError::MalformedInput(msg)) => {
                        warn!("SequenceRunner: skipping frame {index}: {msg}");
                        summary.failed_frames.push(*index);
                    }
                    Err(err) => return Err(err),
                }
            }

            // frames read before a source failure are always written first
            if let Some(err) = source_error {
                return Err(err);
            }
        }
        Ok(())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

/// Errors that spoil a single frame. Sources are expected to advance past the
/// frame before returning one of these.
fn is_frame_error(err: &LaneError) -> bool {
    matches!(err, LaneError::Image(_) | LaneError::MalformedInput(_))
}
