use crate::misc::FloatingPoint;

use super::{FineSample, Provenance, Subdivider};

/// Catmull-Rom subdivision with tension controlled knot spacing
///
/// The knot interval between two anchors is `|Pj - Pi|^tension`:
/// 0 gives the uniform spline, 0.5 the centripetal spline and 1 the chordal spline.
/// Samples are evaluated with the Barry-Goldman pyramid, so their weights depend on the
/// anchor positions and every sample records its [`Provenance`] for later re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatmullRom<T> {
    tension: T,
}

impl<T: FloatingPoint> CatmullRom<T> {
    pub fn new(tension: T) -> Self {
        Self {
            tension: tension.clamp(T::zero(), T::one()),
        }
    }

    pub fn tension(&self) -> T {
        self.tension
    }

    /// Anchor polygon of the spline
    /// Open curves repeat their first and last samples to provide end tangents
    pub fn anchors(samples: &[FineSample<T>], open: bool) -> Vec<FineSample<T>> {
        match (open, samples.first(), samples.last()) {
            (true, Some(first), Some(last)) => std::iter::once(first)
                .chain(samples.iter())
                .chain(std::iter::once(last))
                .cloned()
                .collect(),
            _ => samples.to_vec(),
        }
    }

    /// Number of 4-point windows over the anchor polygon
    pub fn window_count(anchors: usize, open: bool) -> usize {
        if open {
            anchors.saturating_sub(3)
        } else {
            anchors
        }
    }

    /// Control indices behind the 4 anchors of `window` over `controls` control points
    /// Open curves map the repeated end anchors back onto the first and last controls
    pub fn window_controls(
        window: usize,
        controls: usize,
        open: bool,
    ) -> impl Iterator<Item = usize> {
        let last = controls.saturating_sub(1);
        (window..window + 4).map(move |anchor| {
            if open {
                anchor.saturating_sub(1).min(last)
            } else {
                anchor % controls.max(1)
            }
        })
    }

    /// Evaluate the segment between the 2nd and 3rd anchors of `window` at `local_t` in `[0, 1]`
    /// Windows wrap around the anchor polygon
    pub fn evaluate(
        &self,
        anchors: &[FineSample<T>],
        window: usize,
        local_t: T,
    ) -> FineSample<T> {
        let len = anchors.len();
        let p0 = &anchors[window % len];
        let p1 = &anchors[(window + 1) % len];
        let p2 = &anchors[(window + 2) % len];
        let p3 = &anchors[(window + 3) % len];

        let t0 = T::zero();
        let t1 = self.next_knot(t0, p0, p1);
        let t2 = self.next_knot(t1, p1, p2);
        let t3 = self.next_knot(t2, p2, p3);
        let t = t1 + (t2 - t1) * local_t;

        let a1 = interpolate(p0, p1, t0, t1, t);
        let a2 = interpolate(p1, p2, t1, t2, t);
        let a3 = interpolate(p2, p3, t2, t3, t);

        let b1 = interpolate(&a1, &a2, t0, t2, t);
        let b2 = interpolate(&a2, &a3, t1, t3, t);

        interpolate(&b1, &b2, t1, t2, t).with_provenance(Provenance::new(window, local_t))
    }

    fn next_knot(&self, ti: T, pi: &FineSample<T>, pj: &FineSample<T>) -> T {
        ti + (pj.point() - pi.point()).norm().powf(self.tension)
    }
}

impl<T: FloatingPoint> Subdivider<T> for CatmullRom<T> {
    /// Resolution 0 keeps the control polygon
    /// Otherwise every window yields `2^resolution` samples, the first window also its start
    fn subdivide(
        &self,
        samples: Vec<FineSample<T>>,
        resolution: usize,
        open: bool,
    ) -> Vec<FineSample<T>> {
        if resolution == 0 {
            return samples;
        }

        let anchors = Self::anchors(&samples, open);
        let steps = 1usize << resolution;
        let inv = T::one() / T::from_count(steps);

        let windows = Self::window_count(anchors.len(), open);
        let mut fine = Vec::with_capacity(windows * steps + 1);
        for window in 0..windows {
            let first = if window == 0 { 0 } else { 1 };
            for i in first..=steps {
                fine.push(self.evaluate(&anchors, window, T::from_count(i) * inv));
            }
        }
        fine
    }
}

/// Linear interpolation of two samples over the knot interval `[ta, tb]`
/// A zero-length interval yields `a`
fn interpolate<T: FloatingPoint>(
    a: &FineSample<T>,
    b: &FineSample<T>,
    ta: T,
    tb: T,
    t: T,
) -> FineSample<T> {
    let span = tb - ta;
    if span == T::zero() {
        return a.clone();
    }
    FineSample::combine(&[((tb - t) / span, a), ((t - ta) / span, b)])
}
