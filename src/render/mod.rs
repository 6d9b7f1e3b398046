//! Lane overlay rendering.
//!
//! Present lane lines are drawn on a blank overlay of the frame's shape, and
//! the overlay is blended with the frame. A frame without any lane line is
//! returned as an exact copy. The caller's frame is never mutated.

mod blend;
mod draw;

pub use blend::add_weighted;
pub use draw::draw_segment;

use crate::error::LaneResult;
use crate::image::{luma_of, Frame, ImageView};
use crate::types::LaneLines;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// RGB color of the lane lines.
    pub line_color: [u8; 3],
    /// Stroke width in pixels.
    pub line_thickness: u32,
    /// Weight of the source frame in the blend.
    pub blend_alpha: f32,
    /// Weight of the overlay in the blend.
    pub overlay_beta: f32,
    /// Constant added to every blended sample.
    pub blend_gamma: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            line_color: [0, 255, 0],
            line_thickness: 8,
            blend_alpha: 0.8,
            overlay_beta: 1.0,
            blend_gamma: 1.0,
        }
    }
}

/// Draw `lines` over `frame` and return the composited frame.
pub fn render_lanes(frame: &Frame, lines: &LaneLines, params: &RenderParams) -> LaneResult<Frame> {
    frame.validate()?;
    if lines.is_empty() {
        return Ok(frame.clone());
    }

    let color: Vec<u8> = match frame.channels() {
        1 => vec![luma_of(params.line_color)],
        _ => params.line_color.to_vec(),
    };
    let mut overlay = frame.zeros_like();
    for (_, segment) in lines.iter() {
        draw_segment(&mut overlay, segment, &color, params.line_thickness);
    }
    add_weighted(
        frame,
        params.blend_alpha,
        &overlay,
        params.overlay_beta,
        params.blend_gamma,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineSegment;

    fn gray_ramp(width: usize, height: usize) -> Frame {
        let mut frame = Frame::new(width, height, 3);
        for (i, v) in frame.as_bytes_mut().iter_mut().enumerate() {
            *v = (i % 200) as u8;
        }
        frame
    }

    #[test]
    fn no_lines_returns_identical_frame() {
        let frame = gray_ramp(40, 30);
        let out = render_lanes(&frame, &LaneLines::default(), &RenderParams::default()).unwrap();
        assert_eq!(out, frame);
    }

    #[test]
    fn present_side_is_drawn_and_absent_side_is_skipped() {
        let frame = Frame::new(100, 60, 3);
        let lines = LaneLines {
            left: Some(LineSegment::new(10.0, 60.0, 40.0, 36.0)),
            right: None,
        };
        let out = render_lanes(&frame, &lines, &RenderParams::default()).unwrap();

        // on the line: 0 * 0.8 + 255 + 1 saturates
        assert_eq!(out.pixel(25, 48), &[1, 255, 1]);
        // far from any line: only gamma is added
        assert_eq!(out.pixel(90, 5), &[1, 1, 1]);
        assert_eq!(frame.count_nonzero(), 0, "input must stay untouched");
    }

    #[test]
    fn single_channel_frames_use_color_luma() {
        let frame = Frame::new(20, 20, 1);
        let lines = LaneLines {
            left: None,
            right: Some(LineSegment::new(0.0, 10.0, 19.0, 10.0)),
        };
        let params = RenderParams {
            blend_gamma: 0.0,
            ..Default::default()
        };
        let out = render_lanes(&frame, &lines, &params).unwrap();
        assert_eq!(out.pixel(10, 10), &[luma_of([0, 255, 0])]);
        assert_eq!(out.pixel(10, 0), &[0]);
    }
}
