//! Region-of-interest masking.
//!
//! The region is a trapezoid whose vertices are fixed fractions of the frame
//! size, chosen for a forward-facing dash camera: wide at the bottom of the
//! frame, narrowing toward the horizon. Everything outside it (sky, roadside,
//! hood) is zeroed before segment detection.
//!
//! Masking never mutates its input; a new frame is returned.

mod fill;

pub use fill::fill_polygon;

use crate::image::{Frame, ImageView};
use crate::types::Polygon;
use serde::{Deserialize, Serialize};

/// Trapezoid geometry as fractions of the frame size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiParams {
    /// Bottom edge position as a fraction of the height.
    pub bottom_frac: f64,
    /// Top edge position as a fraction of the height.
    pub top_frac: f64,
    /// Horizontal inset of the bottom corners from each side.
    pub side_margin_frac: f64,
    /// Horizontal inset of the top corners from each side.
    pub top_inset_frac: f64,
}

impl Default for RoiParams {
    fn default() -> Self {
        Self {
            bottom_frac: 0.95,
            top_frac: 0.6,
            side_margin_frac: 0.1,
            top_inset_frac: 0.4,
        }
    }
}

/// Region polygon for a `width × height` frame, vertices rounded to pixels.
///
/// Order: bottom-left, top-left, top-right, bottom-right.
pub fn region_polygon(width: usize, height: usize, params: &RoiParams) -> Polygon {
    let (w, h) = (width as f64, height as f64);
    let px = |fx: f64, fy: f64| [(fx * w).round() as i32, (fy * h).round() as i32];
    Polygon::new(vec![
        px(params.side_margin_frac, params.bottom_frac),
        px(params.top_inset_frac, params.top_frac),
        px(1.0 - params.top_inset_frac, params.top_frac),
        px(1.0 - params.side_margin_frac, params.bottom_frac),
    ])
}

/// Keep pixels inside `polygon`, zero everything else.
///
/// The mask carries one full-intensity sample per channel, so the same code
/// path serves edge maps and color frames.
pub fn apply_region_mask(image: &Frame, polygon: &Polygon) -> Frame {
    let mut mask = image.zeros_like();
    let full = vec![u8::MAX; image.channels()];
    fill_polygon(&mut mask, polygon, &full);

    for (m, &v) in mask.as_bytes_mut().iter_mut().zip(image.as_bytes()) {
        *m &= v;
    }
    mask
}

/// Mask `image` with the region polygon computed for its own dimensions.
pub fn mask_region(image: &Frame, params: &RoiParams) -> Frame {
    let polygon = region_polygon(image.width(), image.height(), params);
    apply_region_mask(image, &polygon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterned_frame(width: usize, height: usize, channels: usize) -> Frame {
        let mut frame = Frame::new(width, height, channels);
        for (i, v) in frame.as_bytes_mut().iter_mut().enumerate() {
            *v = (i % 251) as u8 | 1;
        }
        frame
    }

    #[test]
    fn polygon_matches_fractions_for_720p() {
        let poly = region_polygon(1280, 720, &RoiParams::default());
        assert_eq!(
            poly.vertices,
            vec![[128, 684], [512, 432], [768, 432], [1152, 684]]
        );
    }

    #[test]
    fn mask_zeroes_outside_and_keeps_inside() {
        for channels in [1usize, 3] {
            let frame = patterned_frame(320, 180, channels);
            let poly = region_polygon(320, 180, &RoiParams::default());
            let masked = apply_region_mask(&frame, &poly);

            let [cx, cy] = poly.centroid().unwrap();
            let (cx, cy) = (cx.round() as usize, cy.round() as usize);
            assert_eq!(masked.pixel(cx, cy), frame.pixel(cx, cy));

            for (x, y) in [(0, 0), (319, 0), (0, 179), (319, 179)] {
                assert!(
                    masked.pixel(x, y).iter().all(|&v| v == 0),
                    "corner ({x}, {y}) should be masked"
                );
            }
        }
    }

    #[test]
    fn every_pixel_is_either_kept_or_zeroed() {
        let frame = patterned_frame(64, 48, 3);
        let masked = mask_region(&frame, &RoiParams::default());
        let mut kept = 0;
        for (a, b) in masked.as_bytes().iter().zip(frame.as_bytes()) {
            if *a != 0 {
                assert_eq!(a, b);
                kept += 1;
            }
        }
        assert!(kept > 0);
        assert!(kept < frame.as_bytes().len());
    }

    #[test]
    fn masking_leaves_input_untouched() {
        let frame = patterned_frame(32, 32, 1);
        let copy = frame.clone();
        let _ = mask_region(&frame, &RoiParams::default());
        assert_eq!(frame, copy);
    }
}
