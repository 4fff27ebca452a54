use crate::misc::FloatingPoint;

use super::{FineSample, Subdivider, MIN_DEGREE};

/// Uniform B-spline subdivision of arbitrary degree by the Lane-Riesenfeld algorithm
///
/// Every pass doubles the polygon by midpoint insertion, then applies one averaging step
/// for even degrees followed by `(degree - 1) / 2` (odd) or `(degree - 2) / 2` (even)
/// smoothing steps with the mask `(1/4, 1/2, 1/4)`.
/// Open curves keep their end points fixed, closed curves are treated as circular.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneRiesenfeld {
    degree: usize,
}

impl LaneRiesenfeld {
    pub fn new(degree: usize) -> Self {
        Self {
            degree: degree.max(MIN_DEGREE),
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    fn is_odd(&self) -> bool {
        self.degree % 2 == 1
    }

    /// Number of `(1/4, 1/2, 1/4)` smoothing steps per pass
    fn smoothing_steps(&self) -> usize {
        let base = if self.is_odd() { 1 } else { 2 };
        (self.degree - base) / 2
    }

    /// One refinement pass over a polygon of at least 3 samples
    pub fn refine<T: FloatingPoint>(
        &self,
        samples: &[FineSample<T>],
        open: bool,
    ) -> Vec<FineSample<T>> {
        let mut fine = insert_midpoints(samples, open);
        if !self.is_odd() {
            fine = average(&fine, open);
        }
        for _ in 0..self.smoothing_steps() {
            fine = smooth(&fine, open);
        }
        fine
    }
}

impl<T: FloatingPoint> Subdivider<T> for LaneRiesenfeld {
    fn subdivide(
        &self,
        samples: Vec<FineSample<T>>,
        resolution: usize,
        open: bool,
    ) -> Vec<FineSample<T>> {
        (0..resolution).fold(samples, |fine, _| self.refine(&fine, open))
    }
}

/// Insert the midpoint of every edge
/// Open curves leave the first and last edges unsplit, which clamps the ends
fn insert_midpoints<T: FloatingPoint>(fine: &[FineSample<T>], open: bool) -> Vec<FineSample<T>> {
    let len = fine.len();
    let mut next = Vec::with_capacity(len * 2);
    if open {
        next.push(fine[0].clone());
        for j in 1..len - 2 {
            next.push(fine[j].clone());
            next.push(FineSample::midpoint(&fine[j], &fine[j + 1]));
        }
        next.push(fine[len - 2].clone());
        next.push(fine[len - 1].clone());
    } else {
        for j in 0..len {
            next.push(fine[j].clone());
            next.push(FineSample::midpoint(&fine[j], &fine[(j + 1) % len]));
        }
    }
    next
}

/// Replace the polygon by the midpoints of its edges
fn average<T: FloatingPoint>(fine: &[FineSample<T>], open: bool) -> Vec<FineSample<T>> {
    let len = fine.len();
    if open {
        let mut next = Vec::with_capacity(len + 1);
        next.push(fine[0].clone());
        for j in 0..len - 1 {
            next.push(FineSample::midpoint(&fine[j], &fine[j + 1]));
        }
        next.push(fine[len - 1].clone());
        next
    } else {
        (0..len)
            .map(|j| FineSample::midpoint(&fine[j], &fine[(j + 1) % len]))
            .collect()
    }
}

/// Apply the `(1/4, 1/2, 1/4)` mask to every consecutive triple
fn smooth<T: FloatingPoint>(fine: &[FineSample<T>], open: bool) -> Vec<FineSample<T>> {
    let len = fine.len();
    let quarter = T::constant(0.25);
    let half = T::constant(0.5);
    let three_quarters = T::constant(0.75);

    let mask = |j: usize| {
        FineSample::combine(&[
            (quarter, &fine[j]),
            (half, &fine[(j + 1) % len]),
            (quarter, &fine[(j + 2) % len]),
        ])
    };

    if open {
        let mut next = Vec::with_capacity(len + 2);
        next.push(fine[0].clone());
        next.push(FineSample::combine(&[
            (three_quarters, &fine[0]),
            (quarter, &fine[1]),
        ]));
        next.extend((0..len - 2).map(mask));
        next.push(FineSample::combine(&[
            (quarter, &fine[len - 2]),
            (three_quarters, &fine[len - 1]),
        ]));
        next.push(fine[len - 1].clone());
        next
    } else {
        (0..len).map(mask).collect()
    }
}
