use nalgebra::Point2;

use crate::misc::{lerp, FloatingPoint};

/// Position on a polyline found from a normalized arclength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArclengthEval<T: FloatingPoint> {
    /// Interpolated position
    pub point: Point2<T>,
    /// Index of the fine sample starting the segment containing the position
    pub segment: usize,
    /// Local parameter inside that segment, in `[0, 1]`
    pub t: T,
}

/// Normalized cumulative-length parametrization of a polyline
///
/// Adjacent duplicate points are collapsed into one entry before lengths are accumulated,
/// so entry indices and fine sample indices differ; both directions of that mapping are
/// kept alongside the cumulative values.
/// # Example
/// ```
/// use subdivo::prelude::*;
/// use nalgebra::Point2;
/// use approx::assert_relative_eq;
///
/// let table = ArclengthTable::new(&[
///     Point2::new(0., 0.),
///     Point2::new(1., 0.),
///     Point2::new(1., 0.),
///     Point2::new(1., 3.),
/// ]);
/// assert_eq!(table.len(), 3);
/// assert_relative_eq!(table.total_length(), 4.);
/// assert_relative_eq!(table.cumulative()[1], 0.25);
/// let eval = table.eval(0.5).unwrap();
/// assert_relative_eq!(eval.point, Point2::new(1., 1.));
/// assert_eq!(eval.segment, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArclengthTable<T: FloatingPoint> {
    /// Deduplicated points
    points: Vec<Point2<T>>,
    /// Normalized cumulative length at every entry, non-decreasing in `[0, 1]`
    cumulative: Vec<T>,
    total_length: T,
    /// Entry of every fine sample
    sample_to_entry: Vec<usize>,
    /// Last fine sample of every entry
    entry_to_sample: Vec<usize>,
}

impl<T: FloatingPoint> ArclengthTable<T> {
    pub fn new(points: &[Point2<T>]) -> Self {
        let mut entries: Vec<Point2<T>> = Vec::with_capacity(points.len());
        let mut sample_to_entry = Vec::with_capacity(points.len());
        let mut entry_to_sample = Vec::with_capacity(points.len());

        for (i, p) in points.iter().enumerate() {
            if entries.last() != Some(p) {
                entries.push(*p);
                entry_to_sample.push(i);
            }
            let entry = entries.len() - 1;
            entry_to_sample[entry] = i;
            sample_to_entry.push(entry);
        }

        let mut lengths = Vec::with_capacity(entries.len());
        let mut acc = T::zero();
        for (i, p) in entries.iter().enumerate() {
            if i > 0 {
                acc += (p - entries[i - 1]).norm();
            }
            lengths.push(acc);
        }

        let total_length = acc;
        let cumulative = if total_length > T::zero() {
            lengths.into_iter().map(|l| l / total_length).collect()
        } else {
            vec![T::zero(); entries.len()]
        };

        Self {
            points: entries,
            cumulative,
            total_length,
            sample_to_entry,
            entry_to_sample,
        }
    }

    pub fn points(&self) -> &[Point2<T>] {
        &self.points
    }

    pub fn cumulative(&self) -> &[T] {
        &self.cumulative
    }

    /// Length of the polyline
    pub fn total_length(&self) -> T {
        self.total_length
    }

    /// Number of entries after deduplication
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Entry holding the fine sample `sample`
    pub fn entry_of(&self, sample: usize) -> Option<usize> {
        self.sample_to_entry.get(sample).copied()
    }

    /// Last fine sample collapsed into the entry `entry`
    pub fn sample_of(&self, entry: usize) -> Option<usize> {
        self.entry_to_sample.get(entry).copied()
    }

    /// Normalized arclength at parameter `t` of the fine segment starting at sample `segment`
    pub fn u_at(&self, segment: usize, t: T) -> T {
        let at = |sample: usize| {
            self.entry_of(sample)
                .map(|e| self.cumulative[e])
                .unwrap_or_else(T::one)
        };
        let (u0, u1) = (at(segment), at(segment + 1));
        u0 * (T::one() - t) + u1 * t
    }

    /// Entry starting the table segment that contains `u`
    /// `u >= 1` resolves to the last segment
    pub fn find_index(&self, u: T) -> usize {
        let last = self.points.len().saturating_sub(2);
        self.cumulative
            .partition_point(|c| *c <= u)
            .saturating_sub(1)
            .min(last)
    }

    /// Evaluate the polyline at the normalized arclength `u`, clamped to `[0, 1]`
    /// Returns `None` for an empty table
    pub fn eval(&self, u: T) -> Option<ArclengthEval<T>> {
        let first = *self.points.first()?;
        let u = u.clamp(T::zero(), T::one());

        if self.points.len() == 1 {
            return Some(ArclengthEval {
                point: first,
                segment: 0,
                t: T::zero(),
            });
        }

        let entry = self.find_index(u);
        let (c0, c1) = (self.cumulative[entry], self.cumulative[entry + 1]);
        let span = c1 - c0;
        let t = if span > T::zero() {
            ((u - c0) / span).clamp(T::zero(), T::one())
        } else {
            T::zero()
        };

        Some(ArclengthEval {
            point: lerp(&self.points[entry], &self.points[entry + 1], t),
            segment: self.sample_of(entry)?,
            t,
        })
    }
}
