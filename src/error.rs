use thiserror::Error;

/// Top-level error type for the lingeo kernel.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Algebra(#[from] AlgebraError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised by vector and matrix operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlgebraError {
    #[error("dimension mismatch: {lhs}-dimensional vs {rhs}-dimensional")]
    DimensionMismatch { lhs: usize, rhs: usize },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("matrix is singular")]
    Singular,
}

/// Errors raised by geometric constructions and queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
