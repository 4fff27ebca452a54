use std::cmp::Ordering;

use itertools::{EitherOrBoth, Itertools};
use nalgebra::Point2;

use crate::misc::{affine_combination, FloatingPoint};

/// Sparse decomposition of a fine sample into control point contributions
///
/// Maps a control point index to the weight it carries in a fine sample.
/// Entries are kept sorted by control index, so iteration order is deterministic and
/// merging two maps is a linear walk. The size of a map is bounded by the support of
/// the subdivision scheme, not by the number of control points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightMap<T>(Vec<(usize, T)>);

impl<T: FloatingPoint> WeightMap<T> {
    pub fn new() -> Self {
        Self(vec![])
    }

    /// A map where the control point `index` has full influence
    /// # Example
    /// ```
    /// use subdivo::prelude::*;
    /// let w = WeightMap::<f64>::identity(3);
    /// assert_eq!(w.get(3), Some(1.));
    /// assert_eq!(w.len(), 1);
    /// ```
    pub fn identity(index: usize) -> Self {
        Self(vec![(index, T::one())])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Weight of the control point `index`, if it has any structural influence
    pub fn get(&self, index: usize) -> Option<T> {
        self.0
            .binary_search_by_key(&index, |(i, _)| *i)
            .ok()
            .map(|i| self.0[i].1)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.0.iter().copied()
    }

    /// Control point indices in ascending order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().map(|(i, _)| *i)
    }

    pub fn sum(&self) -> T {
        self.0.iter().fold(T::zero(), |acc, (_, w)| acc + *w)
    }

    /// Multiply every weight by `factor`
    /// Scaling by exactly zero removes every entry
    pub fn scale(&self, factor: T) -> Self {
        if factor == T::zero() {
            return Self::new();
        }
        Self(self.0.iter().map(|(i, w)| (*i, *w * factor)).collect())
    }

    /// Sum two maps, adding the weights of indices present in both
    pub fn add(&self, other: &Self) -> Self {
        let merged = self
            .0
            .iter()
            .merge_join_by(other.0.iter(), |(a, _), (b, _)| a.cmp(b))
            .map(|entry| match entry {
                EitherOrBoth::Both((i, a), (_, b)) => (*i, *a + *b),
                EitherOrBoth::Left(e) | EitherOrBoth::Right(e) => *e,
            })
            .collect();
        Self(merged)
    }

    /// Linear blend `(1 - t) * self + t * other`
    pub fn blend(&self, other: &Self, t: T) -> Self {
        self.scale(T::one() - t).add(&other.scale(t))
    }

    /// Weighted sum of maps, the weight-space counterpart of an affine point combination
    pub fn combine<'a>(terms: impl IntoIterator<Item = (T, &'a Self)>) -> Self
    where
        T: 'a,
    {
        terms
            .into_iter()
            .fold(Self::new(), |acc, (w, map)| acc.add(&map.scale(w)))
    }

    /// Evaluate the position described by this map against the current control points
    /// Indices without a control point are ignored
    pub fn evaluate(&self, control_points: &[Point2<T>]) -> Point2<T> {
        affine_combination(
            self.0
                .iter()
                .filter_map(|(i, w)| control_points.get(*i).map(|p| (*w, p))),
        )
    }

    /// Entries ordered by descending weight, ties resolved by ascending control index
    pub fn ranked(&self) -> Vec<(usize, T)> {
        let mut ranked = self.0.clone();
        ranked.sort_by(|(ia, a), (ib, b)| {
            b.partial_cmp(a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| ia.cmp(ib))
        });
        ranked
    }
}

impl<T: FloatingPoint> FromIterator<(usize, T)> for WeightMap<T> {
    /// Collect entries in any order, summing repeated indices
    fn from_iter<I: IntoIterator<Item = (usize, T)>>(iter: I) -> Self {
        let mut entries: Vec<(usize, T)> = iter.into_iter().collect();
        entries.sort_by_key(|(i, _)| *i);
        let merged = entries
            .into_iter()
            .coalesce(|(ia, a), (ib, b)| {
                if ia == ib {
                    Ok((ia, a + b))
                } else {
                    Err(((ia, a), (ib, b)))
                }
            })
            .collect();
        Self(merged)
    }
}
