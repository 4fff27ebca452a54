pub mod catmull_rom;
pub mod curve_config;
pub mod dyn_levin;
pub mod fine_sample;
pub mod lane_riesenfeld;
pub mod subdivision_scheme;

pub use catmull_rom::*;
pub use curve_config::*;
pub use dyn_levin::*;
pub use fine_sample::*;
pub use lane_riesenfeld::*;
pub use subdivision_scheme::*;

use nalgebra::Point2;

use crate::misc::FloatingPoint;

/// Polygons with fewer samples than this are returned unrefined
pub const MIN_SUBDIVISION_SAMPLES: usize = 3;

/// A subdivision scheme refining a polygon of fine samples
///
/// Implementations combine samples with [`FineSample::combine`], so every produced sample
/// carries its decomposition into control points.
pub trait Subdivider<T: FloatingPoint> {
    /// Refine `samples` (at least [`MIN_SUBDIVISION_SAMPLES`]) with `resolution` passes
    fn subdivide(
        &self,
        samples: Vec<FineSample<T>>,
        resolution: usize,
        open: bool,
    ) -> Vec<FineSample<T>>;
}

/// Build the fine samples of a curve from its control points
///
/// Every control point starts as a sample with full weight on itself, the scheme selected by
/// `config` refines them, and closed curves repeat their first sample at the end.
/// Fewer than 3 control points are returned as the raw polygon.
/// # Example
/// ```
/// use subdivo::prelude::*;
/// use nalgebra::Point2;
///
/// let points = vec![
///     Point2::new(0., 0.),
///     Point2::new(0., 10.),
///     Point2::new(10., 10.),
///     Point2::new(10., 0.),
/// ];
/// let config = CurveConfig::default().with_resolution(1);
/// let fine = subdivide(&points, &config);
/// assert_eq!(fine.len(), 6);
/// assert_eq!(*fine[5].point(), points[3]);
/// ```
pub fn subdivide<T: FloatingPoint>(
    control_points: &[Point2<T>],
    config: &CurveConfig<T>,
) -> Vec<FineSample<T>> {
    let samples = FineSample::controls(control_points);
    if samples.len() < MIN_SUBDIVISION_SAMPLES {
        log::debug!(
            "{} control points are too few to subdivide, keeping the raw polygon",
            samples.len()
        );
        return samples;
    }

    let resolution = config.resolution();
    let open = config.is_open();
    let mut fine = match config.scheme() {
        SubdivisionScheme::BSpline => {
            LaneRiesenfeld::new(config.degree()).subdivide(samples, resolution, open)
        }
        SubdivisionScheme::DynLevin => DynLevin.subdivide(samples, resolution, open),
        SubdivisionScheme::CatmullRom => {
            CatmullRom::new(config.tension()).subdivide(samples, resolution, open)
        }
    };

    if !open {
        if let Some(first) = fine.first().cloned() {
            fine.push(first);
        }
    }

    log::debug!(
        "subdivided {} control points with {} (resolution {}, {}) into {} samples",
        control_points.len(),
        config.scheme(),
        resolution,
        if open { "open" } else { "closed" },
        fine.len()
    );
    fine
}
