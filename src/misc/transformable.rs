use nalgebra::{Matrix3, Point2};

use super::FloatingPoint;

/// A trait for geometry that can be mapped by a transform of type `M`
pub trait Transformable<M> {
    fn transform(&mut self, transform: M);

    fn transformed(&self, transform: M) -> Self
    where
        Self: Clone,
    {
        let mut clone = self.clone();
        clone.transform(transform);
        clone
    }
}

/// Apply a homogeneous 2D transform (3x3 matrix) to a list of points
impl<'a, T: FloatingPoint> Transformable<&'a Matrix3<T>> for Vec<Point2<T>> {
    fn transform(&mut self, transform: &'a Matrix3<T>) {
        self.iter_mut()
            .for_each(|p| *p = transform.transform_point(p));
    }
}
