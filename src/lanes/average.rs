use crate::types::LineModel;

/// Unweighted mean of slopes and of intercepts.
///
/// Every model counts once regardless of the length of the segment it came
/// from. An empty bucket yields `None`.
pub fn average_lines(models: &[LineModel]) -> Option<LineModel> {
    if models.is_empty() {
        return None;
    }
    let n = models.len() as f64;
    let (slope_sum, intercept_sum) = models
        .iter()
        .fold((0.0, 0.0), |(s, b), m| (s + m.slope, b + m.intercept));
    Some(LineModel::new(slope_sum / n, intercept_sum / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bucket_has_no_line() {
        assert_eq!(average_lines(&[]), None);
    }

    #[test]
    fn mean_of_one_is_identity() {
        let model = LineModel::new(-0.731, 612.25);
        assert_eq!(average_lines(&[model]), Some(model));
    }

    #[test]
    fn equal_slopes_average_intercepts_exactly() {
        let m = -0.75;
        let (b1, b2) = (612.0, 640.5);
        let avg = average_lines(&[LineModel::new(m, b1), LineModel::new(m, b2)]).unwrap();
        assert_eq!(avg.slope, m);
        assert_eq!(avg.intercept, (b1 + b2) / 2.0);
    }

    #[test]
    fn mean_is_not_length_weighted() {
        let avg = average_lines(&[
            LineModel::new(1.0, 0.0),
            LineModel::new(2.0, 10.0),
            LineModel::new(3.0, 20.0),
        ])
        .unwrap();
        assert_eq!(avg, LineModel::new(2.0, 10.0));
    }
}
