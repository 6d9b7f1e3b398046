use super::HoughParams;
use crate::image::{Frame, ImageView};
use crate::types::LineSegment;

/// Vote accumulator over `(theta, rho)` bins.
struct Accumulator {
    num_rho: usize,
    rho_offset: i64,
    cos: Vec<f32>,
    sin: Vec<f32>,
    votes: Vec<u32>,
}

impl Accumulator {
    fn new(width: usize, height: usize, params: &HoughParams) -> Self {
        let num_angle = ((std::f32::consts::PI / params.angle_resolution).round() as usize).max(1);
        let num_rho =
            ((((width + height) * 2 + 1) as f32 / params.distance_resolution).round() as usize)
                .max(1);
        let inv_rho = 1.0 / params.distance_resolution;
        let (cos, sin): (Vec<f32>, Vec<f32>) = (0..num_angle)
            .map(|n| {
                let theta = n as f32 * params.angle_resolution;
                (theta.cos() * inv_rho, theta.sin() * inv_rho)
            })
            .unzip();
        Self {
            num_rho,
            rho_offset: (num_rho as i64 - 1) / 2,
            cos,
            sin,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn bin(&self, n: usize, x: usize, y: usize) -> usize {
        let r = (x as f32 * self.cos[n] + y as f32 * self.sin[n]).round() as i64 + self.rho_offset;
        n * self.num_rho + r.clamp(0, self.num_rho as i64 - 1) as usize
    }

    /// Add the votes of (x, y); returns the best angle bin and its count.
    fn vote(&mut self, x: usize, y: usize) -> (usize, u32) {
        let mut best = (0, 0);
        for n in 0..self.cos.len() {
            let b = self.bin(n, x, y);
            self.votes[b] += 1;
            if self.votes[b] > best.1 {
                best = (n, self.votes[b]);
            }
        }
        best
    }

    fn unvote(&mut self, x: usize, y: usize) {
        for n in 0..self.cos.len() {
            let b = self.bin(n, x, y);
            self.votes[b] = self.votes[b].saturating_sub(1);
        }
    }

    /// Unit step along the line of angle bin `n`, with the major axis stepping
    /// by exactly one pixel.
    fn step(&self, n: usize) -> [f32; 2] {
        let (dx, dy) = (-self.sin[n], self.cos[n]);
        if dx.abs() > dy.abs() {
            [dx.signum(), dy / dx.abs()]
        } else {
            [dx / dy.abs(), dy.signum()]
        }
    }
}

struct Walker<'a> {
    mask: &'a mut [bool],
    width: usize,
    height: usize,
}

impl Walker<'_> {
    #[inline]
    fn pixel_at(&self, p: [f32; 2]) -> Option<(usize, usize)> {
        let (x, y) = (p[0].round(), p[1].round());
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Follow the line from `start` until the gap budget is exhausted or the
    /// frame ends; returns the last set pixel visited.
    fn extent(&self, start: (usize, usize), step: [f32; 2], max_gap: f32) -> (usize, usize) {
        let mut end = start;
        let mut gap = 0.0f32;
        let mut p = [start.0 as f32, start.1 as f32];
        while let Some((x, y)) = self.pixel_at(p) {
            if self.mask[y * self.width + x] {
                gap = 0.0;
                end = (x, y);
            } else {
                gap += 1.0;
                if gap > max_gap {
                    break;
                }
            }
            p[0] += step[0];
            p[1] += step[1];
        }
        end
    }

    /// Clear every set pixel from `start` to `end` along `step`, handing each
    /// one to `on_clear`.
    fn consume(
        &mut self,
        start: (usize, usize),
        end: (usize, usize),
        step: [f32; 2],
        mut on_clear: impl FnMut(usize, usize),
    ) {
        let mut p = [start.0 as f32, start.1 as f32];
        while let Some((x, y)) = self.pixel_at(p) {
            let idx = y * self.width + x;
            if self.mask[idx] {
                self.mask[idx] = false;
                on_clear(x, y);
            }
            if (x, y) == end {
                break;
            }
            p[0] += step[0];
            p[1] += step[1];
        }
    }
}

/// Progressive probabilistic Hough transform with deterministic raster-order
/// point visiting.
pub(super) fn probabilistic_hough(edges: &Frame, params: &HoughParams) -> Vec<LineSegment> {
    let (width, height) = (edges.width(), edges.height());
    let points: Vec<(usize, usize)> = edges
        .rows()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(move |(x, _)| (x, y))
        })
        .collect();

    let mut mask = vec![false; width * height];
    for &(x, y) in &points {
        mask[y * width + x] = true;
    }

    let mut acc = Accumulator::new(width, height, params);
    let mut walker = Walker {
        mask: &mut mask,
        width,
        height,
    };
    let mut segments = Vec::new();

    for &point in &points {
        if !walker.mask[point.1 * width + point.0] {
            continue;
        }
        let (best_n, best_votes) = acc.vote(point.0, point.1);
        if best_votes < params.vote_threshold {
            continue;
        }

        let forward = acc.step(best_n);
        let backward = [-forward[0], -forward[1]];
        let ends = [
            walker.extent(point, forward, params.max_line_gap),
            walker.extent(point, backward, params.max_line_gap),
        ];

        let dx = (ends[1].0 as f32 - ends[0].0 as f32).abs();
        let dy = (ends[1].1 as f32 - ends[0].1 as f32).abs();
        let good_line = dx >= params.min_line_length || dy >= params.min_line_length;

        for (end, step) in ends.iter().zip([forward, backward]) {
            walker.consume(point, *end, step, |x, y| {
                if good_line {
                    acc.unvote(x, y);
                }
            });
        }

        if good_line {
            segments.push(LineSegment::new(
                ends[0].0 as f64,
                ends[0].1 as f64,
                ends[1].0 as f64,
                ends[1].1 as f64,
            ));
        }
    }

    segments
}
