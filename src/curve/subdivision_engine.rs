use itertools::Itertools;
use nalgebra::{Matrix3, Point2, Vector2};

use crate::{
    arclength::ArclengthTable,
    drag::{DragProjector, PointMap},
    error::SubdivisionError,
    influence::{dominant_at, InfluenceIndex, InfluenceRange},
    misc::{project_onto_segment, FloatingPoint, SegmentProjection, Transformable},
    subdivision::{subdivide, CatmullRom, CurveConfig, CurveConfigUpdate, FineSample},
};

use super::CurveLocation;

/// A subdivision curve that can be queried and edited interactively
///
/// Owns the control points and the configuration together with everything derived from them:
/// the fine samples with their weight maps, the influence ranges of every control point and a
/// lazily built arclength table. Moving control points only recomputes the fine samples they
/// influence.
#[derive(Debug, Clone, PartialEq)]
pub struct SubdivisionEngine<T: FloatingPoint> {
    control_points: Vec<Point2<T>>,
    config: CurveConfig<T>,
    samples: Vec<FineSample<T>>,
    influence: InfluenceIndex,
    /// Invalidated whenever the samples change
    arclength: Option<ArclengthTable<T>>,
}

impl<T: FloatingPoint> SubdivisionEngine<T> {
    /// Create a curve and compute its fine samples
    /// # Failures
    /// - if `control_points` is empty
    /// - if the tension of `config` is not finite
    ///
    /// # Example
    /// ```
    /// use subdivo::prelude::*;
    /// use nalgebra::Point2;
    ///
    /// let control_points = vec![
    ///     Point2::new(0., 0.),
    ///     Point2::new(0., 10.),
    ///     Point2::new(10., 10.),
    ///     Point2::new(10., 0.),
    /// ];
    /// let config = CurveConfig::default()
    ///     .with_scheme(SubdivisionScheme::DynLevin)
    ///     .with_resolution(2);
    /// let curve = SubdivisionEngine::try_new(control_points, config).unwrap();
    /// assert_eq!(curve.fine_samples().len(), 13);
    ///
    /// let empty = SubdivisionEngine::<f64>::try_new(vec![], CurveConfig::default());
    /// assert!(empty.is_err());
    /// ```
    pub fn try_new(control_points: Vec<Point2<T>>, config: CurveConfig<T>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !control_points.is_empty(),
            SubdivisionError::DegenerateInput { count: 0 }
        );
        config.validate()?;

        let mut engine = Self {
            control_points,
            config,
            samples: vec![],
            influence: InfluenceIndex::default(),
            arclength: None,
        };
        engine.subdivide();
        Ok(engine)
    }

    pub fn control_points(&self) -> &[Point2<T>] {
        &self.control_points
    }

    pub fn config(&self) -> &CurveConfig<T> {
        &self.config
    }

    pub fn fine_samples(&self) -> &[FineSample<T>] {
        &self.samples
    }

    /// Positions of the fine samples
    pub fn fine_points(&self) -> Vec<Point2<T>> {
        self.samples.iter().map(|s| *s.point()).collect()
    }

    pub fn influence(&self) -> &InfluenceIndex {
        &self.influence
    }

    /// Control indices influencing the fine sample `sample`, by descending weight
    pub fn dominant_control_points(&self, sample: usize) -> Vec<usize> {
        dominant_at(&self.samples, sample)
    }

    /// Replace the control points
    /// The same count keeps the weight maps and only recomputes positions,
    /// a different count subdivides from scratch
    pub fn set_points(&mut self, control_points: Vec<Point2<T>>) -> anyhow::Result<()> {
        anyhow::ensure!(
            !control_points.is_empty(),
            SubdivisionError::DegenerateInput { count: 0 }
        );

        let same_count = control_points.len() == self.control_points.len();
        self.control_points = control_points;
        if same_count {
            self.recalculate_all();
        } else {
            self.subdivide();
        }
        Ok(())
    }

    /// Apply a partial configuration change
    /// Returns whether the fine samples were rebuilt
    pub fn set_config(&mut self, update: &CurveConfigUpdate<T>) -> anyhow::Result<bool> {
        let next = self.config.updated(update)?;
        let rebuild = self.config.requires_subdivision(&next);
        self.config = next;
        if rebuild {
            self.subdivide();
        }
        Ok(rebuild)
    }

    /// Rebuild the fine samples and the influence ranges from the control points
    pub fn subdivide(&mut self) {
        self.samples = subdivide(&self.control_points, &self.config);
        self.influence = InfluenceIndex::build(&self.samples);
        self.arclength = None;
    }

    /// Recompute the fine samples in `range`, clamped to the sample sequence
    /// Samples keep their weight maps except Catmull-Rom ones, which are evaluated again
    /// from their provenance since their weights depend on the control point positions
    pub fn recalculate(&mut self, range: InfluenceRange) {
        self.arclength = None;
        let Some(range) = range.clamp(self.samples.len()) else {
            return;
        };
        log::trace!(
            "recalculating {} fine samples from {} of {}",
            range.span(),
            range.min(),
            self.samples.len()
        );

        let catmull_rom = (!self.config.scheme().has_affine_weights()).then(|| {
            (
                CatmullRom::new(self.config.tension()),
                CatmullRom::anchors(
                    &FineSample::controls(&self.control_points),
                    self.config.is_open(),
                ),
            )
        });

        for i in range.indices() {
            let sample = &mut self.samples[i];
            match (&catmull_rom, sample.provenance()) {
                (Some((spline, anchors)), Some(provenance)) => {
                    *sample = spline.evaluate(anchors, provenance.window(), provenance.local_t());
                }
                _ => sample.reevaluate(&self.control_points),
            }
        }

        // Catmull-Rom weight maps change with the positions, so their ranges do too
        if catmull_rom.is_some() {
            self.influence = InfluenceIndex::build(&self.samples);
        }
    }

    /// Recompute every fine sample
    pub fn recalculate_all(&mut self) {
        let len = self.samples.len();
        self.recalculate(InfluenceRange::new(0, len.saturating_sub(1)));
    }

    /// Move the control points named in `positions` and recompute the samples they influence
    /// Returns the recomputed range, `None` when the moved points influence nothing
    /// # Failures
    /// - if an index is not a control point of this curve, in which case nothing is moved
    pub fn adjust_points(
        &mut self,
        positions: &PointMap<T>,
    ) -> anyhow::Result<Option<InfluenceRange>> {
        let len = self.control_points.len();
        if let Some(index) = positions.keys().find(|i| **i >= len) {
            anyhow::bail!(SubdivisionError::ControlIndexOutOfRange { index: *index, len });
        }

        for (i, p) in positions.iter() {
            self.control_points[*i] = *p;
        }

        let range = self.affected_range(positions);
        match range {
            Some(range) => self.recalculate(range),
            None => self.arclength = None,
        }
        Ok(range)
    }

    /// Drag the curve at `hit` by `delta`, moving up to `spread_width` control points
    /// Returns the new positions, which can be applied to curves sharing the same control points
    /// # Example
    /// ```
    /// use subdivo::prelude::*;
    /// use nalgebra::{Point2, Vector2};
    /// use approx::assert_relative_eq;
    ///
    /// let mut curve = SubdivisionEngine::try_new(
    ///     vec![Point2::new(0., 0.), Point2::new(5., 5.), Point2::new(10., 0.)],
    ///     CurveConfig::default().with_resolution(0),
    /// ).unwrap();
    /// let hit = curve.closest_point(&Point2::new(5., 6.)).unwrap();
    /// let moved = curve.move_point(&hit, &Vector2::new(0., 1.), 1).unwrap();
    /// assert_relative_eq!(moved[&1], Point2::new(5., 6.));
    /// assert_relative_eq!(curve.control_points()[1], Point2::new(5., 6.));
    /// ```
    pub fn move_point(
        &mut self,
        hit: &CurveLocation<T>,
        delta: &Vector2<T>,
        spread_width: usize,
    ) -> anyhow::Result<PointMap<T>> {
        let positions =
            DragProjector::new(spread_width).project(hit.weights(), delta, &self.control_points);
        self.adjust_points(&positions)?;
        Ok(positions)
    }

    /// Find the location on the fine polyline closest to `query`
    /// Ties resolve to the earliest segment
    /// # Failures
    /// - if the curve has fewer than 2 fine samples
    pub fn closest_point(&mut self, query: &Point2<T>) -> anyhow::Result<CurveLocation<T>> {
        self.ensure_segments()?;

        let (segment, projection) = self
            .samples
            .iter()
            .tuple_windows()
            .map(|(a, b)| project_onto_segment(query, a.point(), b.point()))
            .enumerate()
            .fold(
                None,
                |closest: Option<(usize, SegmentProjection<T>)>, (i, p)| match closest {
                    Some((_, c)) if c.distance_squared <= p.distance_squared => closest,
                    _ => Some((i, p)),
                },
            )
            .ok_or(SubdivisionError::EmptyCurveQuery {
                samples: self.samples.len(),
            })?;

        let u = self.arclength_table().u_at(segment, projection.t);
        let weights = self.samples[segment]
            .weights()
            .blend(self.samples[segment + 1].weights(), projection.t);

        Ok(CurveLocation::new(
            projection.point,
            u,
            segment,
            projection.t,
            weights,
            projection.distance_squared.sqrt(),
        ))
    }

    /// Evaluate the curve at the normalized arclength `u`, clamped to `[0, 1]`
    /// # Failures
    /// - if the curve has fewer than 2 fine samples
    pub fn eval_at(&mut self, u: T) -> anyhow::Result<CurveLocation<T>> {
        self.ensure_segments()?;

        let samples = self.samples.len();
        let eval = self
            .arclength_table()
            .eval(u)
            .ok_or(SubdivisionError::EmptyCurveQuery { samples })?;

        let weights = self.samples[eval.segment]
            .weights()
            .blend(self.samples[eval.segment + 1].weights(), eval.t);

        Ok(CurveLocation::new(
            eval.point,
            u.clamp(T::zero(), T::one()),
            eval.segment,
            eval.t,
            weights,
            T::zero(),
        ))
    }

    /// Length of the fine polyline
    pub fn length(&mut self) -> T {
        self.arclength_table().total_length()
    }

    /// Arclength table of the fine polyline, built on first use after a change
    pub fn arclength_table(&mut self) -> &ArclengthTable<T> {
        let samples = &self.samples;
        self.arclength.get_or_insert_with(|| {
            let points: Vec<_> = samples.iter().map(|s| *s.point()).collect();
            ArclengthTable::new(&points)
        })
    }

    /// Samples depending on the moved control points
    /// Catmull-Rom samples depend on every control point of their window, including ones
    /// whose weight vanished at the current positions, so their windows are inspected instead
    /// of the influence ranges
    fn affected_range(&self, positions: &PointMap<T>) -> Option<InfluenceRange> {
        if self.config.scheme().has_affine_weights() {
            return self.influence.envelope(positions.keys().copied());
        }

        let controls = self.control_points.len();
        let open = self.config.is_open();
        self.samples
            .iter()
            .enumerate()
            .filter(|(_, sample)| match sample.provenance() {
                Some(provenance) => {
                    CatmullRom::<T>::window_controls(provenance.window(), controls, open)
                        .any(|c| positions.contains_key(&c))
                }
                None => sample.weights().indices().any(|c| positions.contains_key(&c)),
            })
            .map(|(i, _)| InfluenceRange::new(i, i))
            .reduce(|a, b| a.union(&b))
    }

    fn ensure_segments(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.samples.len() >= 2,
            SubdivisionError::EmptyCurveQuery {
                samples: self.samples.len()
            }
        );
        Ok(())
    }
}

/// Apply a homogeneous 2D transform to the control points and follow with the fine samples
impl<'a, T: FloatingPoint> Transformable<&'a Matrix3<T>> for SubdivisionEngine<T> {
    fn transform(&mut self, transform: &'a Matrix3<T>) {
        self.control_points.transform(transform);
        self.recalculate_all();
    }
}
