/// Failures reported by the subdivision engine.
///
/// Public operations return `anyhow::Result`, with one of these variants as the root cause,
/// so callers can recover the kind with `err.downcast_ref::<SubdivisionError>()`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubdivisionError {
    /// A configuration value could not be accepted even after clamping
    #[error("invalid curve configuration: {0}")]
    InvalidConfig(String),
    /// No control points were supplied
    #[error("at least one control point is required, got {count}")]
    DegenerateInput { count: usize },
    /// A closest point or arclength query against a curve without a segment
    #[error("curve query requires at least 2 fine samples, got {samples}")]
    EmptyCurveQuery { samples: usize },
    /// A control point map names an index the curve does not have
    #[error("control point index {index} is out of range for {len} control points")]
    ControlIndexOutOfRange { index: usize, len: usize },
}
