pub mod curve_location;
pub mod subdivision_engine;
pub use curve_location::*;
pub use subdivision_engine::*;
