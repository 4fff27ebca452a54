use std::collections::BTreeMap;

use nalgebra::{Point2, Vector2};

use crate::{misc::FloatingPoint, weight::WeightMap};

/// Sparse set of new control point positions keyed by control index
pub type PointMap<T> = BTreeMap<usize, Point2<T>>;

/// Turns a drag at a curve location into new positions for the control points behind it
///
/// The `spread_width` control points carrying the most weight at the location are moved.
/// Each of them is displaced by `delta / S`, where `S` is the sum of their weights, so a
/// location fully owned by the selected points follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragProjector {
    spread_width: usize,
}

impl Default for DragProjector {
    fn default() -> Self {
        Self { spread_width: 1 }
    }
}

impl DragProjector {
    /// A width of 0 is treated as 1
    pub fn new(spread_width: usize) -> Self {
        Self {
            spread_width: spread_width.max(1),
        }
    }

    pub fn spread_width(&self) -> usize {
        self.spread_width
    }

    /// Compute the displaced positions, without touching `control_points`
    /// # Example
    /// ```
    /// use subdivo::prelude::*;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let controls = vec![Point2::new(0., 0.), Point2::new(10., 0.)];
    /// let weights: WeightMap<f64> = [(0, 0.25), (1, 0.75)].into_iter().collect();
    /// let moved = DragProjector::new(1).project(&weights, &Vector2::new(0., 3.), &controls);
    /// assert_eq!(moved.len(), 1);
    /// assert_eq!(moved[&1], Point2::new(10., 4.));
    /// ```
    pub fn project<T: FloatingPoint>(
        &self,
        weights: &WeightMap<T>,
        delta: &Vector2<T>,
        control_points: &[Point2<T>],
    ) -> PointMap<T> {
        let selected: Vec<(usize, T)> = weights
            .ranked()
            .into_iter()
            .filter(|(i, _)| *i < control_points.len())
            .take(self.spread_width)
            .collect();

        let total = selected.iter().fold(T::zero(), |acc, (_, w)| acc + *w);
        if total <= T::zero() {
            log::warn!(
                "drag ignored: the {} selected control points carry a total weight of {}",
                selected.len(),
                total
            );
            return PointMap::new();
        }

        let step = delta / total;
        selected
            .into_iter()
            .map(|(i, _)| (i, control_points[i] + step))
            .collect()
    }
}
