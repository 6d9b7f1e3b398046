//! Frame sources, sinks and the sequence runner.
//!
//! A [`FrameSource`] yields frames until it returns `Ok(None)`; a
//! [`FrameSink`] receives composited frames in input order and is always
//! finished, whether the run ends normally, is cancelled, or fails.
//!
//! Image sequences (one image file per frame) are supported out of the box.
//! A video container backend plugs in by implementing the two traits.

mod runner;
mod sink;
mod source;

pub use runner::{RunSummary, SequenceRunner};
pub use sink::{ImageSequenceSink, MemorySink};
pub use source::{ImageSequenceSource, MemorySource, IMAGE_EXTENSIONS};

use crate::error::LaneResult;
use crate::image::Frame;

/// Ordered producer of frames.
pub trait FrameSource {
    /// Next frame, or `Ok(None)` once the source is exhausted.
    ///
    /// `LaneError::Image` and `LaneError::MalformedInput` mean that only the
    /// current frame is unusable: the source must have moved past it, and the
    /// runner skips it. Any other error ends the run.
    fn next_frame(&mut self) -> LaneResult<Option<Frame>>;
}

/// Ordered consumer of composited frames.
pub trait FrameSink {
    fn write_frame(&mut self, index: usize, frame: &Frame) -> LaneResult<()>;

    /// Flush and release the sink. Called exactly once per run.
    fn finish(&mut self) -> LaneResult<()> {
        Ok(())
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> LaneResult<Option<Frame>> {
        (**self).next_frame()
    }
}

impl<K: FrameSink + ?Sized> FrameSink for Box<K> {
    fn write_frame(&mut self, index: usize, frame: &Frame) -> LaneResult<()> {
        (**self).write_frame(index, frame)
    }

    fn finish(&mut self) -> LaneResult<()> {
        (**self).finish()
    }
}
