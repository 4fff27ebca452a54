#![allow(clippy::needless_range_loop)]
//! Interactive subdivision curves in 2D.
//!
//! A curve is built from a few control points refined by a B-spline (Lane-Riesenfeld),
//! Dyn-Levin 4-point or tensioned Catmull-Rom scheme. Every fine sample remembers how much
//! each control point contributes to it, which lets the curve be grabbed anywhere and
//! dragged, with only the affected part of the polyline recomputed.

mod arclength;
mod curve;
mod drag;
mod error;
mod influence;
mod misc;
mod session;
mod subdivision;
mod weight;

pub mod prelude {
    pub use crate::arclength::*;
    pub use crate::curve::*;
    pub use crate::drag::*;
    pub use crate::error::*;
    pub use crate::influence::*;
    pub use crate::misc::*;
    pub use crate::session::*;
    pub use crate::subdivision::*;
    pub use crate::weight::*;
}
