pub mod floating_point;
pub mod transformable;
pub mod vector_ops;

pub use floating_point::*;
pub use transformable::*;
pub use vector_ops::*;
