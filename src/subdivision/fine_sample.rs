use nalgebra::Point2;

use crate::{
    misc::{affine_combination, FloatingPoint},
    prelude::WeightMap,
};

/// Where a Catmull-Rom sample came from, so it can be regenerated from moved control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Provenance<T> {
    /// Index of the first anchor of the 4-point window
    window: usize,
    /// Local parameter inside the window, in `[0, 1]`
    local_t: T,
}

impl<T: Copy> Provenance<T> {
    pub fn new(window: usize, local_t: T) -> Self {
        Self { window, local_t }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn local_t(&self) -> T {
        self.local_t
    }
}

/// One point of the dense polyline with its decomposition into control points
#[derive(Debug, Clone, PartialEq)]
pub struct FineSample<T: FloatingPoint> {
    point: Point2<T>,
    weights: WeightMap<T>,
    provenance: Option<Provenance<T>>,
}

impl<T: FloatingPoint> FineSample<T> {
    pub fn new(point: Point2<T>, weights: WeightMap<T>) -> Self {
        Self {
            point,
            weights,
            provenance: None,
        }
    }

    /// A sample sitting exactly on the control point `index`
    pub fn control(index: usize, point: Point2<T>) -> Self {
        Self::new(point, WeightMap::identity(index))
    }

    /// One sample per control point, each with full weight on itself
    pub fn controls(points: &[Point2<T>]) -> Vec<Self> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| Self::control(i, *p))
            .collect()
    }

    /// Affine combination of samples, applied to both positions and weight maps
    pub fn combine(terms: &[(T, &Self)]) -> Self {
        let point = affine_combination(terms.iter().map(|(w, s)| (*w, &s.point)));
        let weights = WeightMap::combine(terms.iter().map(|(w, s)| (*w, &s.weights)));
        Self::new(point, weights)
    }

    /// Midpoint of two samples
    pub fn midpoint(a: &Self, b: &Self) -> Self {
        let half = T::constant(0.5);
        Self::combine(&[(half, a), (half, b)])
    }

    pub fn point(&self) -> &Point2<T> {
        &self.point
    }

    pub fn weights(&self) -> &WeightMap<T> {
        &self.weights
    }

    pub fn provenance(&self) -> Option<Provenance<T>> {
        self.provenance
    }

    pub fn with_provenance(mut self, provenance: Provenance<T>) -> Self {
        self.provenance = Some(provenance);
        self
    }

    /// Recompute the position from the weight map and the current control points
    pub(crate) fn reevaluate(&mut self, control_points: &[Point2<T>]) {
        self.point = self.weights.evaluate(control_points);
    }
}
