use crate::misc::FloatingPoint;

use super::{FineSample, Subdivider};

/// Dyn-Levin 4-point interpolating subdivision
///
/// Existing samples never move; one sample is inserted between every adjacent pair
/// with the mask `(-1/16, 9/16, 9/16, -1/16)`.
/// Open curves use a one-sided cubic mask on the first and last edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DynLevin;

/// Mask applied to the four nearest samples of an inner edge
const INNER_MASK: [f64; 4] = [-0.0625, 0.5625, 0.5625, -0.0625];

/// One-sided mask for the first edge of an open curve, ordered from the end point inwards
const BOUNDARY_MASK: [f64; 4] = [1. / 3., 0.9375, -1. / 3., 0.0625];

/// Quadratic interpolating mask for open curves with only three samples
const SHORT_BOUNDARY_MASK: [f64; 3] = [0.375, 0.75, -0.125];

impl DynLevin {
    /// One refinement pass over a polygon of at least 3 samples
    pub fn refine<T: FloatingPoint>(
        &self,
        fine: &[FineSample<T>],
        open: bool,
    ) -> Vec<FineSample<T>> {
        let len = fine.len();
        let edges = if open { len - 1 } else { len };
        let mut next = Vec::with_capacity(len + edges);

        for i in 0..edges {
            next.push(fine[i].clone());
            let inserted = if open && i == 0 {
                boundary(fine, &[0, 1, 2, 3])
            } else if open && i == len - 2 {
                boundary(fine, &[len - 1, len - 2, len - 3, len.saturating_sub(4)])
            } else {
                let window = [(i + len - 1) % len, i, (i + 1) % len, (i + 2) % len];
                apply(&INNER_MASK, fine, &window)
            };
            next.push(inserted);
        }

        if open {
            next.push(fine[len - 1].clone());
        }
        next
    }
}

impl<T: FloatingPoint> Subdivider<T> for DynLevin {
    fn subdivide(
        &self,
        samples: Vec<FineSample<T>>,
        resolution: usize,
        open: bool,
    ) -> Vec<FineSample<T>> {
        (0..resolution).fold(samples, |fine, _| self.refine(&fine, open))
    }
}

/// Sample inserted on the outermost edge of an open curve
/// `order` lists sample indices from the end point inwards
fn boundary<T: FloatingPoint>(fine: &[FineSample<T>], order: &[usize; 4]) -> FineSample<T> {
    if fine.len() < 4 {
        apply(&SHORT_BOUNDARY_MASK, fine, &order[..3])
    } else {
        apply(&BOUNDARY_MASK, fine, order)
    }
}

fn apply<T: FloatingPoint>(
    mask: &[f64],
    fine: &[FineSample<T>],
    indices: &[usize],
) -> FineSample<T> {
    let terms: Vec<_> = mask
        .iter()
        .zip(indices.iter())
        .map(|(w, i)| (T::constant(*w), &fine[*i]))
        .collect();
    FineSample::combine(&terms)
}
