use std::collections::BTreeMap;

use crate::{misc::FloatingPoint, subdivision::FineSample};

/// Closed interval `[min, max]` of fine sample indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfluenceRange {
    min: usize,
    max: usize,
}

impl InfluenceRange {
    /// Create a range, swapping the bounds if they are given in reverse
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Number of samples covered
    pub fn span(&self) -> usize {
        self.max - self.min + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.min <= index && index <= self.max
    }

    /// Smallest range covering both
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Restrict to `[0, len - 1]`, `None` if nothing remains
    pub fn clamp(&self, len: usize) -> Option<Self> {
        if len == 0 || self.min >= len {
            return None;
        }
        Some(Self {
            min: self.min,
            max: self.max.min(len - 1),
        })
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.min..=self.max
    }
}

/// Per control point, the contiguous spans of fine samples it influences
///
/// A control point usually influences one span, but closed curves wrap around, so the
/// point closing the loop also appears at the start of the sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InfluenceIndex {
    ranges: BTreeMap<usize, Vec<InfluenceRange>>,
    sample_count: usize,
}

impl InfluenceIndex {
    /// Derive the ranges with one pass over the samples
    /// A range starts at the first sample carrying the control index and closes when the
    /// next sample no longer carries it, or at the end of the sequence
    pub fn build<T: FloatingPoint>(samples: &[FineSample<T>]) -> Self {
        let mut ranges: BTreeMap<usize, Vec<InfluenceRange>> = BTreeMap::new();
        let mut started: BTreeMap<usize, usize> = BTreeMap::new();

        for (i, sample) in samples.iter().enumerate() {
            for index in sample.weights().indices() {
                started.entry(index).or_insert(i);
            }
            let next = samples.get(i + 1).map(|s| s.weights());
            let closed: Vec<usize> = started
                .keys()
                .copied()
                .filter(|index| !next.is_some_and(|w| w.contains(*index)))
                .collect();
            for index in closed {
                if let Some(start) = started.remove(&index) {
                    ranges
                        .entry(index)
                        .or_default()
                        .push(InfluenceRange::new(start, i));
                }
            }
        }

        Self {
            ranges,
            sample_count: samples.len(),
        }
    }

    /// Number of fine samples the index was built from
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Ranges of the control point `index`, in ascending order
    pub fn ranges(&self, index: usize) -> &[InfluenceRange] {
        self.ranges.get(&index).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// One interval covering every range of the given control points
    /// `None` when none of them influences any sample
    pub fn envelope(&self, indices: impl IntoIterator<Item = usize>) -> Option<InfluenceRange> {
        indices
            .into_iter()
            .flat_map(|i| self.ranges(i).iter())
            .copied()
            .reduce(|a, b| a.union(&b))
            .and_then(|r| r.clamp(self.sample_count))
    }
}

/// Control indices influencing `sample`, by descending weight
pub fn dominant_at<T: FloatingPoint>(samples: &[FineSample<T>], sample: usize) -> Vec<usize> {
    samples
        .get(sample)
        .map(|s| s.weights().ranked().into_iter().map(|(i, _)| i).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use nalgebra::Point2;

    use super::*;
    use crate::subdivision::{subdivide, CurveConfig, SubdivisionScheme};

    fn square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0., 0.),
            Point2::new(0., 10.),
            Point2::new(10., 10.),
            Point2::new(10., 0.),
        ]
    }

    #[test]
    fn open_quadratic_ranges() {
        let fine = subdivide(&square(), &CurveConfig::default().with_resolution(1));
        let index = InfluenceIndex::build(&fine);
        // samples: {0}, {0,1}, {1,2}, {1,2}, {2,3}, {3}
        assert_eq!(index.ranges(0), &[InfluenceRange::new(0, 1)]);
        assert_eq!(index.ranges(1), &[InfluenceRange::new(1, 3)]);
        assert_eq!(index.ranges(2), &[InfluenceRange::new(2, 4)]);
        assert_eq!(index.ranges(3), &[InfluenceRange::new(4, 5)]);
        assert!(index.ranges(4).is_empty());
        assert_eq!(index.sample_count(), 6);
    }

    #[test]
    fn closed_curve_wraps_into_two_ranges() {
        let config = CurveConfig::default()
            .with_scheme(SubdivisionScheme::DynLevin)
            .with_resolution(1)
            .with_open(false);
        let fine = subdivide(&square(), &config);
        let index = InfluenceIndex::build(&fine);
        let first = index.ranges(0);
        assert!(first.len() >= 2);
        assert_eq!(first[0].min(), 0);
        assert_eq!(first[first.len() - 1].max(), fine.len() - 1);
    }

    #[test]
    fn envelope_unions_and_clamps() {
        let fine = subdivide(&square(), &CurveConfig::default().with_resolution(1));
        let index = InfluenceIndex::build(&fine);
        assert_eq!(index.envelope([0, 3]), Some(InfluenceRange::new(0, 5)));
        assert_eq!(index.envelope([1]), Some(InfluenceRange::new(1, 3)));
        assert_eq!(index.envelope([7]), None);
        assert_eq!(index.envelope(std::iter::empty()), None);
    }

    #[test]
    fn ranges_cover_every_occurrence() {
        let config = CurveConfig::default().with_degree(3).with_resolution(3);
        let fine = subdivide(&square(), &config);
        let index = InfluenceIndex::build(&fine);
        for (i, s) in fine.iter().enumerate() {
            for c in s.weights().indices() {
                assert!(index.ranges(c).iter().any(|r| r.contains(i)));
            }
        }
    }

    #[test]
    fn dominant_control_points() {
        let fine = subdivide(&square(), &CurveConfig::default().with_resolution(1));
        assert_eq!(dominant_at(&fine, 0), vec![0]);
        // (0, 5) is the midpoint of the first two controls
        assert_eq!(dominant_at(&fine, 1), vec![0, 1]);
        assert!(dominant_at(&fine, 42).is_empty());
    }

    #[test]
    fn range_helpers() {
        let r = InfluenceRange::new(5, 2);
        assert_eq!((r.min(), r.max(), r.span()), (2, 5, 4));
        assert_eq!(r.clamp(4), Some(InfluenceRange::new(2, 3)));
        assert_eq!(r.clamp(2), None);
        assert_eq!(r.indices().count(), 4);
    }
}
