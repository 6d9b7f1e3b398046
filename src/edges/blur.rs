//! Separable Gaussian blur with border clamping.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Normalised Gaussian taps for an odd `ksize`.
///
/// Sigma follows the usual derivation from the kernel size:
/// `0.3 * ((ksize - 1) / 2 - 1) + 0.8`.
pub fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    assert!(ksize % 2 == 1, "gaussian kernel size must be odd");
    let sigma = 0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let radius = (ksize / 2) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut taps: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Blur `src` with a `ksize × ksize` Gaussian, rows then columns.
pub fn gaussian_blur(src: &ImageF32, ksize: usize) -> ImageF32 {
    let taps = gaussian_kernel(ksize);
    let radius = taps.len() / 2;
    let (w, h) = (src.w, src.h);
    let mut horiz = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    for y in 0..h {
        filter_row(src.row(y), horiz.row_mut(y), &taps, radius);
    }

    let mut column = vec![0.0f32; h];
    let mut filtered = vec![0.0f32; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = horiz.get(x, y);
        }
        filter_row(&column, &mut filtered, &taps, radius);
        for (y, &v) in filtered.iter().enumerate() {
            out.set(x, y, v);
        }
    }
    out
}

fn filter_row(row: &[f32], out: &mut [f32], taps: &[f32], radius: usize) {
    let len = row.len();
    for (x, dst_px) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &tap) in taps.iter().enumerate() {
            let offset = x as isize + k as isize - radius as isize;
            acc += tap * row[clamp_index(offset, len)];
        }
        *dst_px = acc;
    }
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_normalised_and_symmetric() {
        for ksize in [3, 5, 7] {
            let taps = gaussian_kernel(ksize);
            assert_eq!(taps.len(), ksize);
            let sum: f32 = taps.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            for i in 0..ksize / 2 {
                assert!((taps[i] - taps[ksize - 1 - i]).abs() < 1e-7);
            }
            assert!(taps[ksize / 2] > taps[0]);
        }
    }

    #[test]
    fn blur_preserves_constant_images() {
        let mut img = ImageF32::new(9, 7);
        img.data.iter_mut().for_each(|v| *v = 42.0);
        let out = gaussian_blur(&img, 5);
        assert!(out.data.iter().all(|v| (v - 42.0).abs() < 1e-3));
    }

    #[test]
    fn blur_spreads_an_impulse() {
        let mut img = ImageF32::new(9, 9);
        img.set(4, 4, 255.0);
        let out = gaussian_blur(&img, 3);
        assert!(out.get(4, 4) < 255.0);
        assert!(out.get(3, 4) > 0.0);
        assert_eq!(out.get(0, 0), 0.0);
    }
}
