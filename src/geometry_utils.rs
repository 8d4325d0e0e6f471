use crate::Point2D;

pub fn centroid(points: &[Point2D]) -> Option<Point2D> {
    let count = points.len();
    points
        .iter()
        .cloned()
        .reduce(|acc, el| (acc.0 + el.0, acc.1 + el.1))
        .map(|(x, y)| (x / count as f32, y / count as f32))
}

/// Clamp a coordinate into `[0, limit)` pixel space. NaN lands on 0.
pub fn clamp_to_grid(value: f32, limit: usize) -> f32 {
    if value.is_nan() {
        return 0.;
    }
    value.clamp(0., (limit - 1) as f32)
}

/// Integer pixel delta between two points, truncated toward zero on each axis
pub fn truncated_delta(from: Point2D, to: Point2D) -> (i32, i32) {
    ((to.0 - from.0) as i32, (to.1 - from.1) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_of_two_hands() {
        assert_eq!(centroid(&[(10., 20.), (30., 40.)]), Some((20., 30.)));
        assert_eq!(centroid(&[(5., 5.)]), Some((5., 5.)));
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn test_clamp_to_grid() {
        assert_eq!(clamp_to_grid(-4.0, 320), 0.);
        assert_eq!(clamp_to_grid(400.0, 320), 319.);
        assert_eq!(clamp_to_grid(100.5, 320), 100.5);
        assert_eq!(clamp_to_grid(f32::NAN, 240), 0.);
    }

    #[test]
    fn test_truncated_delta() {
        assert_eq!(truncated_delta((10., 10.), (12.9, 7.5)), (2, -2));
        assert_eq!(truncated_delta((0., 0.), (0.4, -0.4)), (0, 0));
    }
}
