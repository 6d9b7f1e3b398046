//! Lane detector orchestrating the per-frame pipeline.
//!
//! Overview
//! - Converts the frame to luma, blurs it and runs Canny to get a binary edge
//!   map.
//! - Zeroes every edge outside the region-of-interest trapezoid.
//! - Extracts line segments with a deterministic probabilistic Hough
//!   transform.
//! - Buckets segments by slope sign, averages each bucket and extrapolates
//!   one line per side over the lower part of the frame.
//! - Draws the lines on a blank overlay and blends it with the frame.
//!
//! No state survives between frames: [`LaneDetector::detect`] and
//! [`LaneDetector::process`] take `&self` and are safe to call from several
//! threads at once.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and the binaries.
//! - `pipeline` – the [`LaneDetector`] implementation.

pub mod params;
mod pipeline;

pub use params::LaneParams;
pub use pipeline::{FrameOutput, LaneDetection, LaneDetector};
