use crate::{error::SubdivisionError, misc::FloatingPoint};

use super::SubdivisionScheme;

/// Lowest degree accepted for B-spline subdivision
pub const MIN_DEGREE: usize = 2;

/// Parameters of a subdivision curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveConfig<T> {
    /// Subdivision algorithm
    scheme: SubdivisionScheme,
    /// B-spline degree, at least 2
    degree: usize,
    /// Number of refinement passes, 0 keeps the control polygon
    resolution: usize,
    /// Open curve, or closed (periodic) curve
    open: bool,
    /// Catmull-Rom knot spacing exponent in `[0, 1]`
    tension: T,
}

impl<T: FloatingPoint> Default for CurveConfig<T> {
    fn default() -> Self {
        Self {
            scheme: SubdivisionScheme::default(),
            degree: MIN_DEGREE,
            resolution: 5,
            open: true,
            tension: T::constant(0.5),
        }
    }
}

impl<T: FloatingPoint> CurveConfig<T> {
    pub fn scheme(&self) -> SubdivisionScheme {
        self.scheme
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn tension(&self) -> T {
        self.tension
    }

    pub fn with_scheme(mut self, scheme: SubdivisionScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Degrees below 2 are clamped to 2
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree.max(MIN_DEGREE);
        self
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Tension is clamped to `[0, 1]`
    /// Non-finite values are kept as given and rejected by [`CurveConfig::validate`]
    pub fn with_tension(mut self, tension: T) -> Self {
        self.tension = if tension.is_finite() {
            tension.clamp(T::zero(), T::one())
        } else {
            tension
        };
        self
    }

    /// Check the values that clamping cannot repair
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.tension.is_finite(),
            SubdivisionError::InvalidConfig(format!("tension must be finite, got {}", self.tension))
        );
        Ok(())
    }

    /// Apply a partial update, returning the validated result
    pub fn updated(&self, update: &CurveConfigUpdate<T>) -> anyhow::Result<Self> {
        let mut next = *self;
        if let Some(scheme) = update.scheme {
            next = next.with_scheme(scheme);
        }
        if let Some(degree) = update.degree {
            next = next.with_degree(degree);
        }
        if let Some(resolution) = update.resolution {
            next = next.with_resolution(resolution);
        }
        if let Some(open) = update.open {
            next = next.with_open(open);
        }
        if let Some(tension) = update.tension {
            next = next.with_tension(tension);
        }
        next.validate()?;
        Ok(next)
    }

    /// Whether switching from `self` to `next` changes the fine samples
    /// Degree only matters for B-spline and tension only for Catmull-Rom
    pub fn requires_subdivision(&self, next: &Self) -> bool {
        self.scheme != next.scheme
            || self.resolution != next.resolution
            || self.open != next.open
            || (next.scheme.uses_degree() && self.degree != next.degree)
            || (next.scheme.uses_tension() && self.tension != next.tension)
    }
}

/// Partial change of a [`CurveConfig`], fields left as `None` are kept
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CurveConfigUpdate<T> {
    scheme: Option<SubdivisionScheme>,
    degree: Option<usize>,
    resolution: Option<usize>,
    open: Option<bool>,
    tension: Option<T>,
}

impl<T> CurveConfigUpdate<T> {
    pub fn new() -> Self {
        Self {
            scheme: None,
            degree: None,
            resolution: None,
            open: None,
            tension: None,
        }
    }

    pub fn with_scheme(mut self, scheme: SubdivisionScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = Some(degree);
        self
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    pub fn with_tension(mut self, tension: T) -> Self {
        self.tension = Some(tension);
        self
    }
}
