//! I/O helpers for frames and JSON reports.
//!
//! - `load_frame`: read a PNG/JPEG/BMP into an owned RGB frame.
//! - `save_frame`: write a 1- or 3-channel frame, format chosen by extension.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Frame, ImageView};
use crate::error::{LaneError, LaneResult};
use image::{DynamicImage, GrayImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_frame(path: &Path) -> LaneResult<Frame> {
    let img = image::open(path)?.into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Frame::from_raw(width, height, 3, img.into_raw())
}

/// Save a frame, creating parent directories as needed.
pub fn save_frame(frame: &Frame, path: &Path) -> LaneResult<()> {
    frame.validate()?;
    ensure_parent_dir(path)?;
    let (w, h) = (frame.width() as u32, frame.height() as u32);
    let data = frame.as_bytes().to_vec();
    let image = match frame.channels() {
        1 => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
        _ => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
    }
    .ok_or_else(|| LaneError::MalformedInput("failed to create image buffer".to_string()))?;
    image.save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> LaneResult<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> LaneResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_survives_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/frame.png");
        let mut frame = Frame::new(5, 4, 3);
        frame.pixel_mut(2, 1).copy_from_slice(&[10, 200, 30]);

        save_frame(&frame, &path).unwrap();
        let loaded = load_frame(&path).unwrap();
        assert_eq!(loaded, frame);
    }

    #[test]
    fn gray_frames_load_back_as_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        let mut mask = Frame::new(3, 3, 1);
        mask.pixel_mut(1, 1)[0] = 255;

        save_frame(&mask, &path).unwrap();
        let loaded = load_frame(&path).unwrap();
        assert_eq!(loaded.channels(), 3);
        assert_eq!(loaded.pixel(1, 1), &[255, 255, 255]);
        assert_eq!(loaded.pixel(0, 0), &[0, 0, 0]);
    }
}
