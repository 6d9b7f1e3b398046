use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Straight segment in pixel space, `(x1, y1)` to `(x2, y2)`.
///
/// Segments come either from the Hough detector (integer endpoints) or from
/// the extrapolator. A segment with `x1 == x2` is vertical and has no
/// slope-intercept form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn p0(&self) -> Point2<f64> {
        Point2::new(self.x1, self.y1)
    }

    pub fn p1(&self) -> Point2<f64> {
        Point2::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f64 {
        (self.p1() - self.p0()).norm()
    }

    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }
}

/// Line in slope-intercept form: `y = slope * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LineModel {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Evaluate `y` at `x`.
    #[inline]
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Invert the model at `y`. Callers guard against near-zero slopes.
    #[inline]
    pub fn x_at(&self, y: f64) -> f64 {
        (y - self.intercept) / self.slope
    }
}

/// Ordered polygon with integer pixel vertices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<[i32; 2]>,
}

impl Polygon {
    pub fn new(vertices: Vec<[i32; 2]>) -> Self {
        Self { vertices }
    }

    /// Vertex average; for the region trapezoid this lies inside the polygon.
    pub fn centroid(&self) -> Option<[f64; 2]> {
        if self.vertices.is_empty() {
            return None;
        }
        let n = self.vertices.len() as f64;
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), v| (sx + v[0] as f64, sy + v[1] as f64));
        Some([sx / n, sy / n])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Final lane boundaries for one frame. Either side may be absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneLines {
    pub left: Option<LineSegment>,
    pub right: Option<LineSegment>,
}

impl LaneLines {
    pub fn get(&self, side: Side) -> Option<&LineSegment> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Present sides, left first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &LineSegment)> {
        self.left
            .iter()
            .map(|s| (Side::Left, s))
            .chain(self.right.iter().map(|s| (Side::Right, s)))
    }
}

/// Recoverable per-frame anomaly. Recorded in the frame report, never raised.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LaneAnomaly {
    /// The segment detector returned nothing for this frame.
    NoSegmentsDetected,
    /// Segment at `index` has equal x endpoints and was discarded.
    DegenerateSegment { index: usize },
    /// The averaged line for `side` is too flat to invert; the side is omitted.
    NearZeroSlope { side: Side, slope: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_lines_iterates_present_sides_in_order() {
        let seg = LineSegment::new(0.0, 10.0, 5.0, 6.0);
        let lines = LaneLines {
            left: None,
            right: Some(seg),
        };
        let sides: Vec<Side> = lines.iter().map(|(side, _)| side).collect();
        assert_eq!(sides, vec![Side::Right]);
        assert!(!lines.is_empty());
        assert!(LaneLines::default().is_empty());
    }

    #[test]
    fn line_model_inverts_consistently() {
        let model = LineModel::new(-0.5, 400.0);
        assert_eq!(model.x_at(720.0), -640.0);
        assert_eq!(model.y_at(-640.0), 720.0);
    }

    #[test]
    fn anomaly_serializes_with_kind_tag() {
        let json = serde_json::to_string(&LaneAnomaly::NearZeroSlope {
            side: Side::Left,
            slope: 0.0,
        })
        .unwrap();
        assert!(json.contains("\"kind\":\"nearZeroSlope\""), "{json}");
        assert!(json.contains("\"side\":\"left\""), "{json}");
    }
}
