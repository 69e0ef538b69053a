pub mod algebra;
pub mod error;
pub mod geometry;

pub use algebra::{Matrix, Vector, TOLERANCE};
pub use error::{Error, Result};
pub use geometry::{GeomObject, Line, LineSegment, Plane};
