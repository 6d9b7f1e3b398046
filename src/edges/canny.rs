//! Canny edge detection: non-maximum suppression, double threshold and
//! 8-connected hysteresis over Sobel gradients.
//!
//! NMS compares each pixel with its two neighbours along the gradient
//! direction quantised to 0°, 45°, 90° or 135°. Ties are broken toward the
//! first neighbour (strictly greater than it, at least equal to the second) so
//! that plateaus keep one-pixel-wide ridges instead of vanishing. The outermost
//! one-pixel frame is never marked.
use super::grad::{sobel_gradients, GradientNorm};
use crate::image::{Frame, ImageF32, ImageView, ImageViewMut};

const TAN_22_5_DEG: f32 = 0.414_213_57;

const NONE: u8 = 0;
const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Binary edge map (0 / 255) of `l`.
pub fn canny(l: &ImageF32, low: f32, high: f32, norm: GradientNorm) -> Frame {
    let (w, h) = (l.w, l.h);
    let mut edges = Frame::new(w, h, 1);
    if w < 3 || h < 3 {
        return edges;
    }

    let grad = sobel_gradients(l, norm);
    let mut state = vec![NONE; w * h];
    let mut stack = Vec::new();

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                (mag_row[x - 1], mag_row[x + 1])
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            if mag <= neighbor1 || mag < neighbor2 {
                continue;
            }

            let idx = y * w + x;
            if mag > high {
                state[idx] = STRONG;
                stack.push(idx);
            } else {
                state[idx] = WEAK;
            }
        }
    }

    while let Some(idx) = stack.pop() {
        let (x, y) = (idx % w, idx / w);
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let n = ny * w + nx;
                if state[n] == WEAK {
                    state[n] = STRONG;
                    stack.push(n);
                }
            }
        }
    }

    for y in 0..h {
        let out = edges.row_mut(y);
        for (x, px) in out.iter_mut().enumerate() {
            if state[y * w + x] == STRONG {
                *px = u8::MAX;
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(width: usize, height: usize, split_x: usize) -> ImageF32 {
        let mut img = ImageF32::new(width, height);
        for y in 0..height {
            for x in split_x..width {
                img.set(x, y, 255.0);
            }
        }
        img
    }

    #[test]
    fn step_edge_becomes_a_thin_line() {
        let img = vertical_step(32, 32, 16);
        let edges = canny(&img, 50.0, 150.0, GradientNorm::L1);
        for y in 1..31 {
            let lit: Vec<usize> = (0..32).filter(|&x| edges.pixel(x, y)[0] == 255).collect();
            assert_eq!(lit.len(), 1, "row {y} should have one edge pixel: {lit:?}");
            assert!(lit[0] == 15 || lit[0] == 16);
        }
    }

    #[test]
    fn flat_image_has_no_edges() {
        let mut img = ImageF32::new(16, 16);
        img.data.iter_mut().for_each(|v| *v = 90.0);
        let edges = canny(&img, 50.0, 150.0, GradientNorm::L2);
        assert_eq!(edges.count_nonzero(), 0);
    }

    #[test]
    fn weak_pixels_need_a_strong_neighbour() {
        // a faint step only passes the low threshold
        let mut img = ImageF32::new(16, 16);
        for y in 0..16 {
            for x in 8..16 {
                img.set(x, y, 20.0);
            }
        }
        let edges = canny(&img, 50.0, 150.0, GradientNorm::L1);
        assert_eq!(edges.count_nonzero(), 0);

        let edges = canny(&img, 50.0, 70.0, GradientNorm::L1);
        assert!(edges.count_nonzero() > 0);
    }
}
