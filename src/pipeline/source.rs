use super::FrameSource;
use crate::error::LaneResult;
use crate::image::io::load_frame;
use crate::image::Frame;
use log::debug;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions (lowercase) picked up by [`ImageSequenceSource::open`].
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Reads the image files of a directory in file-name order, one frame each.
#[derive(Debug)]
pub struct ImageSequenceSource {
    paths: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    /// Collect the image files directly inside `dir`, sorted by file name.
    pub fn open(dir: &Path) -> LaneResult<Self> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        debug!(
            "ImageSequenceSource::open {} frames in {}",
            paths.len(),
            dir.display()
        );
        Ok(Self::from_paths(paths))
    }

    /// Read exactly `paths`, in the given order.
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            paths: paths.into(),
        }
    }

    /// Number of frames not yet read.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> LaneResult<Option<Frame>> {
        match self.paths.pop_front() {
            Some(path) => load_frame(&path).map(Some),
            None => Ok(None),
        }
    }
}

/// Yields frames held in memory.
#[derive(Debug, Default)]
pub struct MemorySource {
    frames: VecDeque<Frame>,
}

impl MemorySource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> LaneResult<Option<Frame>> {
        Ok(self.frames.pop_front())
    }
}
