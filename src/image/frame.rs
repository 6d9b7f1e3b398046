//! Owned 8-bit frame with 1 (mask, edge map) or 3 (RGB) interleaved channels.
use super::{ImageView, ImageViewMut};
use crate::error::{LaneError, LaneResult};

/// ITU-R BT.601 luma weights for RGB input.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Zero-filled frame. Dimensions are not validated; see [`Frame::validate`].
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width * height * channels],
        }
    }

    /// Wrap raw interleaved bytes, rejecting empty or inconsistent buffers.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> LaneResult<Self> {
        let frame = Self {
            width,
            height,
            channels,
            data,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Blank frame with the same shape.
    pub fn zeros_like(&self) -> Self {
        Self::new(self.width, self.height, self.channels)
    }

    pub fn validate(&self) -> LaneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LaneError::MalformedInput(format!(
                "zero-sized frame {}x{}",
                self.width, self.height
            )));
        }
        if self.channels != 1 && self.channels != 3 {
            return Err(LaneError::MalformedInput(format!(
                "unsupported channel count {}",
                self.channels
            )));
        }
        let expected = self.width * self.height * self.channels;
        if self.data.len() != expected {
            return Err(LaneError::MalformedInput(format!(
                "buffer holds {} bytes, expected {expected} for {}x{}x{}",
                self.data.len(),
                self.width,
                self.height,
                self.channels
            )));
        }
        Ok(())
    }

    pub fn same_shape(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.channels
    }

    /// Channel samples of pixel (x, y).
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let i = self.offset(x, y);
        &self.data[i..i + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let i = self.offset(x, y);
        let c = self.channels;
        &mut self.data[i..i + c]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Single-channel luma copy. A single-channel frame is cloned as is.
    pub fn to_gray(&self) -> Frame {
        if self.channels == 1 {
            return self.clone();
        }
        let data = self
            .data
            .chunks_exact(self.channels)
            .map(|px| {
                let luma: f32 = px
                    .iter()
                    .zip(LUMA_WEIGHTS.iter())
                    .map(|(&v, &w)| v as f32 * w)
                    .sum();
                luma.round().clamp(0.0, 255.0) as u8
            })
            .collect();
        Frame {
            width: self.width,
            height: self.height,
            channels: 1,
            data,
        }
    }

    /// Number of non-zero samples; handy for masks and edge maps.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Luma of an RGB color, used when drawing on single-channel frames.
pub fn luma_of(color: [u8; 3]) -> u8 {
    let luma: f32 = color
        .iter()
        .zip(LUMA_WEIGHTS.iter())
        .map(|(&v, &w)| v as f32 * w)
        .sum();
    luma.round().clamp(0.0, 255.0) as u8
}

impl ImageView for Frame {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * self.channels;
        let start = y * stride;
        &self.data[start..start + stride]
    }
}

impl ImageViewMut for Frame {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.width * self.channels;
        let start = y * stride;
        &mut self.data[start..start + stride]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_inconsistent_buffers() {
        assert!(matches!(
            Frame::from_raw(0, 4, 3, Vec::new()),
            Err(LaneError::MalformedInput(_))
        ));
        assert!(matches!(
            Frame::from_raw(2, 2, 3, vec![0; 11]),
            Err(LaneError::MalformedInput(_))
        ));
        assert!(matches!(
            Frame::from_raw(2, 2, 4, vec![0; 16]),
            Err(LaneError::MalformedInput(_))
        ));
        assert!(Frame::from_raw(2, 2, 3, vec![0; 12]).is_ok());
    }

    #[test]
    fn gray_conversion_uses_luma_weights() {
        let frame = Frame::from_raw(2, 1, 3, vec![255, 255, 255, 255, 0, 0]).unwrap();
        let gray = frame.to_gray();
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.as_bytes(), &[255, 76]);
    }

    #[test]
    fn rows_have_interleaved_width() {
        let frame = Frame::new(4, 3, 3);
        assert_eq!(frame.rows().count(), 3);
        assert!(frame.rows().all(|r| r.len() == 12));
    }
}
