//! Thick line rasterization.
//!
//! A thick segment is the set of pixel centres within `thickness / 2` of the
//! segment (a capsule with round caps). Only the part of the capsule's
//! bounding box that overlaps the frame is visited, so segments reaching far
//! outside the frame cost no more than the frame itself.
use crate::image::{Frame, ImageView, ImageViewMut};
use crate::types::LineSegment;
use nalgebra::{Point2, Vector2};

/// Draw `segment` onto `frame` with one `color` sample per channel.
pub fn draw_segment(frame: &mut Frame, segment: &LineSegment, color: &[u8], thickness: u32) {
    let channels = frame.channels();
    assert_eq!(
        color.len(),
        channels,
        "color must provide one sample per channel"
    );
    let p0 = segment.p0();
    let p1 = segment.p1();
    if !(p0.coords.iter().chain(p1.coords.iter())).all(|v| v.is_finite()) {
        return;
    }
    let (w, h) = (frame.width(), frame.height());
    if w == 0 || h == 0 {
        return;
    }

    let radius = thickness.max(1) as f64 / 2.0;
    let Some((x0, x1)) = clip_span(p0.x.min(p1.x) - radius, p0.x.max(p1.x) + radius, w) else {
        return;
    };
    let Some((y0, y1)) = clip_span(p0.y.min(p1.y) - radius, p0.y.max(p1.y) + radius, h) else {
        return;
    };

    let dir = p1 - p0;
    let len_sq = dir.norm_squared();
    let radius_sq = radius * radius;
    for y in y0..=y1 {
        let row = frame.row_mut(y);
        for x in x0..=x1 {
            let p = Point2::new(x as f64, y as f64);
            if distance_sq_to_segment(p, p0, dir, len_sq) <= radius_sq {
                row[x * channels..(x + 1) * channels].copy_from_slice(color);
            }
        }
    }
}

#[inline]
fn distance_sq_to_segment(
    p: Point2<f64>,
    origin: Point2<f64>,
    dir: Vector2<f64>,
    len_sq: f64,
) -> f64 {
    let rel = p - origin;
    let t = if len_sq > 0.0 {
        (rel.dot(&dir) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (rel - dir * t).norm_squared()
}

/// Clamp a continuous `[lo, hi]` range to pixel indices `0..len`.
fn clip_span(lo: f64, hi: f64, len: usize) -> Option<(usize, usize)> {
    let lo = lo.ceil().max(0.0);
    let hi = hi.floor().min((len - 1) as f64);
    (lo <= hi).then(|| (lo as usize, hi as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_line_has_requested_thickness() {
        let mut frame = Frame::new(20, 20, 1);
        draw_segment(&mut frame, &LineSegment::new(2.0, 10.0, 17.0, 10.0), &[255], 4);
        let column: Vec<u8> = (0..20).map(|y| frame.pixel(10, y)[0]).collect();
        let lit = column.iter().filter(|&&v| v == 255).count();
        // rows 8..=12 are within 2 px of y = 10
        assert_eq!(lit, 5);
        assert_eq!(frame.pixel(10, 7), &[0]);
    }

    #[test]
    fn segments_far_outside_the_frame_are_clipped() {
        let mut frame = Frame::new(32, 32, 3);
        draw_segment(
            &mut frame,
            &LineSegment::new(-640.0, 720.0, -64.0, 432.0),
            &[0, 255, 0],
            8,
        );
        assert_eq!(frame.count_nonzero(), 0);

        draw_segment(
            &mut frame,
            &LineSegment::new(-100.0, 16.0, 100.0, 16.0),
            &[0, 255, 0],
            2,
        );
        assert_eq!(frame.pixel(0, 16), &[0, 255, 0]);
        assert_eq!(frame.pixel(31, 16), &[0, 255, 0]);
    }

    #[test]
    fn non_finite_segments_draw_nothing() {
        let mut frame = Frame::new(8, 8, 1);
        draw_segment(
            &mut frame,
            &LineSegment::new(f64::NAN, 0.0, 4.0, 4.0),
            &[255],
            3,
        );
        assert_eq!(frame.count_nonzero(), 0);
    }
}
