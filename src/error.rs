//! Error types surfaced out of the lane detector.
//!
//! Only stream-level problems become a [`LaneError`]: malformed frames, bad
//! parameters, and I/O. Per-segment and per-side anomalies are absorbed by the
//! stage that detects them and recorded as [`crate::types::LaneAnomaly`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaneError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LaneResult<T> = Result<T, LaneError>;
