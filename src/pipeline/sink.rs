use super::FrameSink;
use crate::error::LaneResult;
use crate::image::io::save_frame;
use crate::image::Frame;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes each frame as `frame_<index:06>.png` into a directory.
#[derive(Debug)]
pub struct ImageSequenceSink {
    dir: PathBuf,
    written: usize,
}

impl ImageSequenceSink {
    /// Create `dir` (and parents) if needed.
    pub fn create(dir: &Path) -> LaneResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: 0,
        })
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:06}.png"))
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for ImageSequenceSink {
    fn write_frame(&mut self, index: usize, frame: &Frame) -> LaneResult<()> {
        save_frame(frame, &self.frame_path(index))?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> LaneResult<()> {
        info!(
            "ImageSequenceSink: wrote {} frames to {}",
            self.written,
            self.dir.display()
        );
        Ok(())
    }
}

/// Keeps written frames in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<(usize, Frame)>,
    pub finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for MemorySink {
    fn write_frame(&mut self, index: usize, frame: &Frame) -> LaneResult<()> {
        self.frames.push((index, frame.clone()));
        Ok(())
    }

    fn finish(&mut self) -> LaneResult<()> {
        self.finished = true;
        Ok(())
    }
}
