//! Even-odd scanline polygon fill.
//!
//! Pixel centres sit on integer coordinates. Each edge covers the half-open
//! row range `[min_y, max_y)`, so rows through a shared vertex are counted
//! once and horizontal edges contribute nothing. Spans run from
//! `ceil(x_enter)` to `floor(x_exit)` inclusive and are clipped to the frame.
use crate::image::{Frame, ImageView, ImageViewMut};
use crate::types::Polygon;

/// Fill `polygon` on `frame` with `value` (one sample per channel).
pub fn fill_polygon(frame: &mut Frame, polygon: &Polygon, value: &[u8]) {
    let channels = frame.channels();
    assert_eq!(
        value.len(),
        channels,
        "fill value must provide one sample per channel"
    );
    let (w, h) = (frame.width(), frame.height());
    if polygon.vertices.len() < 3 || w == 0 || h == 0 {
        return;
    }

    let min_y = polygon.vertices.iter().map(|v| v[1]).min().unwrap_or(0).max(0);
    let max_y = polygon
        .vertices
        .iter()
        .map(|v| v[1])
        .max()
        .unwrap_or(0)
        .min(h as i32 - 1);

    let mut crossings: Vec<f64> = Vec::with_capacity(polygon.vertices.len());
    for y in min_y..=max_y {
        row_crossings(polygon, y as f64, &mut crossings);
        let row = frame.row_mut(y as usize);
        for pair in crossings.chunks_exact(2) {
            let x0 = pair[0].ceil().max(0.0);
            let x1 = pair[1].floor().min((w - 1) as f64);
            if x1 < x0 {
                continue;
            }
            for x in x0 as usize..=x1 as usize {
                row[x * channels..(x + 1) * channels].copy_from_slice(value);
            }
        }
    }
}

fn row_crossings(polygon: &Polygon, y: f64, out: &mut Vec<f64>) {
    out.clear();
    let n = polygon.vertices.len();
    for i in 0..n {
        let a = polygon.vertices[i];
        let b = polygon.vertices[(i + 1) % n];
        let (ay, by) = (a[1] as f64, b[1] as f64);
        if ay == by {
            continue;
        }
        let (lo, hi) = if ay < by { (ay, by) } else { (by, ay) };
        if y < lo || y >= hi {
            continue;
        }
        let t = (y - ay) / (by - ay);
        out.push(a[0] as f64 + t * (b[0] - a[0]) as f64);
    }
    out.sort_by(|p, q| p.total_cmp(q));
}
