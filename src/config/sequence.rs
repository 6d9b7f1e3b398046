use crate::detector::LaneParams;
use crate::error::LaneError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `lane_sequence` tool.
#[derive(Debug, Deserialize)]
pub struct LaneToolConfig {
    /// Directory of input frames (png, jpg, jpeg, bmp), read in name order.
    #[serde(rename = "input")]
    pub input: PathBuf,
    pub output: SequenceOutputConfig,
    /// Frames processed concurrently; 1 processes sequentially.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub params: LaneParams,
}

fn default_batch_size() -> usize {
    1
}

#[derive(Debug, Deserialize)]
pub struct SequenceOutputConfig {
    /// Directory receiving `frame_000000.png`, `frame_000001.png`, ...
    #[serde(rename = "frames_dir")]
    pub frames_dir: PathBuf,
    /// Optional JSON run summary with one report per frame.
    #[serde(default, rename = "report_json")]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<LaneToolConfig, LaneError> {
    let data = fs::read_to_string(path).map_err(|e| {
        LaneError::Config(format!("Failed to read config {}: {e}", path.display()))
    })?;
    let config: LaneToolConfig = serde_json::from_str(&data).map_err(|e| {
        LaneError::Config(format!("Failed to parse config {}: {e}", path.display()))
    })?;
    if config.batch_size == 0 {
        return Err(LaneError::Config(format!(
            "batch_size must be at least 1 in {}",
            path.display()
        )));
    }
    config.params.validate()?;
    Ok(config)
}
