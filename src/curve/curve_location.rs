use nalgebra::Point2;

use crate::{misc::FloatingPoint, weight::WeightMap};

/// A location on the fine polyline, found by a closest point or arclength query
#[derive(Debug, Clone, PartialEq)]
pub struct CurveLocation<T: FloatingPoint> {
    point: Point2<T>,
    /// Normalized arclength in `[0, 1]`
    u: T,
    /// Index of the fine sample starting the segment
    segment: usize,
    /// Local parameter inside the segment
    t: T,
    weights: WeightMap<T>,
    distance: T,
}

impl<T: FloatingPoint> CurveLocation<T> {
    pub fn new(
        point: Point2<T>,
        u: T,
        segment: usize,
        t: T,
        weights: WeightMap<T>,
        distance: T,
    ) -> Self {
        Self {
            point,
            u,
            segment,
            t,
            weights,
            distance,
        }
    }

    pub fn point(&self) -> &Point2<T> {
        &self.point
    }

    pub fn u(&self) -> T {
        self.u
    }

    pub fn segment(&self) -> usize {
        self.segment
    }

    pub fn t(&self) -> T {
        self.t
    }

    /// Blend of the weight maps of the two samples bounding the segment
    pub fn weights(&self) -> &WeightMap<T> {
        &self.weights
    }

    /// Distance from the query point, 0 for arclength evaluations
    pub fn distance(&self) -> T {
        self.distance
    }
}
