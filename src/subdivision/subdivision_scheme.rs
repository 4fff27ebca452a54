use std::{fmt, str::FromStr};

use crate::error::SubdivisionError;

/// Subdivision algorithm used to refine the control polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubdivisionScheme {
    /// Uniform B-spline of arbitrary degree (Lane-Riesenfeld)
    #[default]
    BSpline,
    /// Dyn-Levin 4-point interpolating scheme
    DynLevin,
    /// Catmull-Rom with tension controlled knot spacing
    CatmullRom,
}

impl SubdivisionScheme {
    pub fn name(&self) -> &'static str {
        match self {
            SubdivisionScheme::BSpline => "bspline",
            SubdivisionScheme::DynLevin => "dyn-levin",
            SubdivisionScheme::CatmullRom => "catmull-rom",
        }
    }

    /// Whether the `degree` setting affects this scheme
    pub fn uses_degree(&self) -> bool {
        matches!(self, SubdivisionScheme::BSpline)
    }

    /// Whether the `tension` setting affects this scheme
    pub fn uses_tension(&self) -> bool {
        matches!(self, SubdivisionScheme::CatmullRom)
    }

    /// Whether recalculation can reuse the stored weight maps
    /// Catmull-Rom weights depend on segment lengths, so they have to be derived again
    pub fn has_affine_weights(&self) -> bool {
        !matches!(self, SubdivisionScheme::CatmullRom)
    }
}

impl fmt::Display for SubdivisionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubdivisionScheme {
    type Err = SubdivisionError;

    /// # Example
    /// ```
    /// use subdivo::prelude::*;
    /// let scheme: SubdivisionScheme = "dyn-levin".parse().unwrap();
    /// assert_eq!(scheme, SubdivisionScheme::DynLevin);
    /// assert!("bezier".parse::<SubdivisionScheme>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bspline" => Ok(SubdivisionScheme::BSpline),
            "dyn-levin" => Ok(SubdivisionScheme::DynLevin),
            "catmull-rom" => Ok(SubdivisionScheme::CatmullRom),
            other => Err(SubdivisionError::InvalidConfig(format!(
                "unrecognized subdivision scheme: {other}"
            ))),
        }
    }
}
