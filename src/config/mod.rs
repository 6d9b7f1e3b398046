//! JSON configuration files for the command-line tools.

pub mod sequence;

pub use sequence::{load_config, LaneToolConfig, SequenceOutputConfig};
