use nalgebra::{Point2, Vector2};

use super::FloatingPoint;

/// Linear interpolation between two points, `t = 0` yields `a` and `t = 1` yields `b`
pub fn lerp<T: FloatingPoint>(a: &Point2<T>, b: &Point2<T>, t: T) -> Point2<T> {
    a + (b - a) * t
}

/// Affine combination of points: `sum(weight * point)`
/// The weights are expected to sum to 1 but this is not enforced
pub fn affine_combination<'a, T: FloatingPoint + 'a>(
    terms: impl IntoIterator<Item = (T, &'a Point2<T>)>,
) -> Point2<T> {
    let coords = terms
        .into_iter()
        .fold(Vector2::zeros(), |acc, (w, p)| acc + p.coords * w);
    Point2::from(coords)
}

/// Projection of a point onto a line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection<T: FloatingPoint> {
    /// Closest point on the segment
    pub point: Point2<T>,
    /// Parameter of the closest point, clamped to `[0, 1]`
    pub t: T,
    /// Squared distance between the query and the closest point
    pub distance_squared: T,
}

/// Find the closest point on the segment `start -> end`
/// A segment of zero length projects everything onto `start` with `t = 0`
pub fn project_onto_segment<T: FloatingPoint>(
    pt: &Point2<T>,
    start: &Point2<T>,
    end: &Point2<T>,
) -> SegmentProjection<T> {
    let v = end - start;
    let w = pt - start;
    let c2 = v.dot(&v);

    let t = if c2 > T::zero() {
        (w.dot(&v) / c2).clamp(T::zero(), T::one())
    } else {
        T::zero()
    };

    let point = start + v * t;
    SegmentProjection {
        point,
        t,
        distance_squared: (pt - point).norm_squared(),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    use super::*;

    #[test]
    fn projection_inside_segment() {
        let p = project_onto_segment(
            &Point2::new(5.0, 3.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
        );
        assert_relative_eq!(p.point, Point2::new(5.0, 0.0));
        assert_relative_eq!(p.t, 0.5);
        assert_relative_eq!(p.distance_squared, 9.0);
    }

    #[test]
    fn projection_clamps_to_end_points() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 0.0);
        let before = project_onto_segment(&Point2::new(-1.0, 1.0), &a, &b);
        assert_relative_eq!(before.t, 0.0);
        assert_relative_eq!(before.point, a);
        let after = project_onto_segment(&Point2::new(4.0, 0.0), &a, &b);
        assert_relative_eq!(after.t, 1.0);
        assert_relative_eq!(after.distance_squared, 4.0);
    }

    #[test]
    fn degenerate_segment_projects_to_start() {
        let a = Point2::new(1.0, 1.0);
        let p = project_onto_segment(&Point2::new(4.0, 5.0), &a, &a);
        assert_relative_eq!(p.t, 0.0);
        assert_relative_eq!(p.point, a);
        assert_relative_eq!(p.distance_squared, 25.0);
    }

    #[test]
    fn combination_of_points() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 8.0);
        let c = affine_combination([(0.25, &a), (0.75, &b)]);
        assert_relative_eq!(c, Point2::new(3.0, 6.0));
        assert_relative_eq!(lerp(&a, &b, 0.25), Point2::new(1.0, 2.0));
    }
}
