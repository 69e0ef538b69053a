pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;

/// Global tolerance for floating-point comparisons.
///
/// Two reals are considered equal when their absolute difference does not
/// exceed this value. Every derived equality (vector, matrix, primitive) and
/// every geometric predicate is defined through it rather than exact zero.
pub const TOLERANCE: f64 = 1e-6;

/// Tolerance equality for two scalars.
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// True when a scalar is indistinguishable from zero.
#[must_use]
pub fn approx_zero(x: f64) -> bool {
    x.abs() <= TOLERANCE
}
