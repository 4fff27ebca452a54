use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Trait for floating point types (f32, f64)
/// Used as the scalar type of control points, fine samples and weights
pub trait FloatingPoint: RealField + ToPrimitive + Copy {
    /// Convert a subdivision mask coefficient or other literal into the scalar type
    fn constant(value: f64) -> Self {
        nalgebra::convert(value)
    }

    /// Convert a sample count into the scalar type
    fn from_count(count: usize) -> Self {
        nalgebra::convert(count as f64)
    }
}

impl FloatingPoint for f32 {}
impl FloatingPoint for f64 {}
