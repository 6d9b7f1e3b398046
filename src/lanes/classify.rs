use crate::types::{LaneAnomaly, LineModel, LineSegment};
use log::debug;
use nalgebra::Point2;

/// Line models split by slope sign.
///
/// Image rows grow downward, so the left boundary of the ego lane rises to the
/// right and has a negative slope.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlopeBuckets {
    pub left: Vec<LineModel>,
    pub right: Vec<LineModel>,
    /// Segments that could not be fitted (vertical), by input index.
    pub discarded: Vec<LaneAnomaly>,
}

impl SlopeBuckets {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// Least-squares degree-1 fit `y = slope * x + intercept`.
///
/// Returns `None` when all points share one x coordinate (vertical or
/// single-point input), or when the fit is not finite.
pub fn fit_line(points: &[Point2<f64>]) -> Option<LineModel> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean = points
        .iter()
        .fold(Point2::origin(), |acc: Point2<f64>, p| acc + p.coords / n);

    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), p| {
        let d = *p - mean;
        (sxx + d.x * d.x, sxy + d.x * d.y)
    });
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    let intercept = mean.y - slope * mean.x;
    (slope.is_finite() && intercept.is_finite()).then(|| LineModel::new(slope, intercept))
}

/// Fit every segment through its endpoints and bucket it by slope sign.
///
/// Vertical segments are discarded and reported; no other segment is ever
/// dropped, regardless of slope.
pub fn classify_segments(segments: &[LineSegment]) -> SlopeBuckets {
    let mut buckets = SlopeBuckets::default();
    for (index, segment) in segments.iter().enumerate() {
        let Some(model) = fit_line(&[segment.p0(), segment.p1()]) else {
            debug!("classify: discarding vertical segment #{index} {segment:?}");
            buckets
                .discarded
                .push(LaneAnomaly::DegenerateSegment { index });
            continue;
        };
        if model.slope < 0.0 {
            buckets.left.push(model);
        } else {
            buckets.right.push(model);
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_point_fit_matches_line_equation() {
        let model = fit_line(&[Point2::new(100.0, 500.0), Point2::new(300.0, 400.0)]).unwrap();
        assert!((model.slope + 0.5).abs() < 1e-12);
        assert!((model.intercept - 550.0).abs() < 1e-9);
    }

    #[test]
    fn vertical_and_point_inputs_have_no_fit() {
        assert!(fit_line(&[Point2::new(5.0, 0.0), Point2::new(5.0, 10.0)]).is_none());
        assert!(fit_line(&[Point2::new(5.0, 0.0)]).is_none());
        assert!(fit_line(&[]).is_none());
    }

    #[test]
    fn one_segment_lands_in_each_bucket() {
        let segments = [
            LineSegment::new(100.0, 700.0, 400.0, 450.0),
            LineSegment::new(900.0, 450.0, 1200.0, 700.0),
        ];
        let buckets = classify_segments(&segments);
        assert_eq!(buckets.left.len(), 1);
        assert_eq!(buckets.right.len(), 1);
        assert!(buckets.left[0].slope < 0.0);
        assert!(buckets.right[0].slope > 0.0);
        assert!(buckets.discarded.is_empty());
    }

    #[test]
    fn vertical_segments_are_discarded_without_aborting() {
        let segments = [
            LineSegment::new(10.0, 0.0, 10.0, 50.0),
            LineSegment::new(0.0, 50.0, 50.0, 0.0),
            LineSegment::new(20.0, 20.0, 20.0, 20.0),
        ];
        let buckets = classify_segments(&segments);
        assert_eq!(buckets.left.len(), 1);
        assert!(buckets.right.is_empty());
        assert_eq!(
            buckets.discarded,
            vec![
                LaneAnomaly::DegenerateSegment { index: 0 },
                LaneAnomaly::DegenerateSegment { index: 2 },
            ]
        );
    }

    #[test]
    fn horizontal_segments_go_right() {
        let buckets = classify_segments(&[LineSegment::new(0.0, 5.0, 10.0, 5.0)]);
        assert_eq!(buckets.right, vec![LineModel::new(0.0, 5.0)]);
    }

    #[test]
    fn empty_input_is_a_valid_result() {
        let buckets = classify_segments(&[]);
        assert!(buckets.is_empty());
        assert!(buckets.discarded.is_empty());
    }
}
