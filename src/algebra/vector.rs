use std::fmt;

use crate::error::{AlgebraError, GeometryError, Result};
use crate::geometry::{Line, LineSegment, Plane};

use super::{approx_eq, approx_zero, Matrix, TOLERANCE};

/// A real-valued vector of arbitrary dimension.
///
/// The dimension is fixed at construction; operations between two vectors of
/// differing dimension fail with [`AlgebraError::DimensionMismatch`] rather
/// than silently truncating or padding. Cloning produces a fully independent
/// copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    elements: Vec<f64>,
}

impl Vector {
    /// Creates a vector from its components.
    ///
    /// An empty component list yields the degenerate dimension-0 vector: a
    /// valid value with zero norm that only interoperates with other
    /// dimension-0 vectors, except through [`to_3d`](Self::to_3d), which
    /// pads it to the origin like any other under-3-dimensional input.
    #[must_use]
    pub fn new(elements: Vec<f64>) -> Self {
        Self { elements }
    }

    /// The zero vector of dimension `n`.
    #[must_use]
    pub fn zero(n: usize) -> Self {
        Self {
            elements: vec![0.0; n],
        }
    }

    /// Unit vector along the X axis.
    ///
    /// Canonical constants are returned by value so callers can never mutate
    /// the shared reference frame.
    #[must_use]
    pub fn i() -> Self {
        Self::new(vec![1.0, 0.0, 0.0])
    }

    /// Unit vector along the Y axis.
    #[must_use]
    pub fn j() -> Self {
        Self::new(vec![0.0, 1.0, 0.0])
    }

    /// Unit vector along the Z axis.
    #[must_use]
    pub fn k() -> Self {
        Self::new(vec![0.0, 0.0, 1.0])
    }

    /// Number of components.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.elements.len()
    }

    /// Component at `index` (0-based), or `None` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.elements.get(index).copied()
    }

    /// The components as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.elements
    }

    /// Iterates over the components.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.elements.iter().copied()
    }

    /// Replaces the components wholesale.
    pub fn set_elements(&mut self, elements: Vec<f64>) {
        self.elements = elements;
    }

    /// Tolerance equality: same dimension and every component pair within
    /// [`TOLERANCE`].
    #[must_use]
    pub fn eql(&self, other: &Self) -> bool {
        self.dim() == other.dim()
            && self
                .elements
                .iter()
                .zip(&other.elements)
                .all(|(a, b)| approx_eq(*a, *b))
    }

    fn check_dim(&self, other: &Self) -> Result<()> {
        if self.dim() == other.dim() {
            Ok(())
        } else {
            Err(AlgebraError::DimensionMismatch {
                lhs: self.dim(),
                rhs: other.dim(),
            }
            .into())
        }
    }

    /// Component-wise sum.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_dim(other)?;
        Ok(Self::new(
            self.iter().zip(other.iter()).map(|(a, b)| a + b).collect(),
        ))
    }

    /// Component-wise difference.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.check_dim(other)?;
        Ok(Self::new(
            self.iter().zip(other.iter()).map(|(a, b)| a - b).collect(),
        ))
    }

    /// Multiplies every component by `k`.
    #[must_use]
    pub fn scale(&self, k: f64) -> Self {
        Self::new(self.iter().map(|x| x * k).collect())
    }

    /// The negated vector.
    #[must_use]
    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// Dot product.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn dot(&self, other: &Self) -> Result<f64> {
        self.check_dim(other)?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a * b).sum())
    }

    /// Cross product; both operands must be 3-dimensional.
    ///
    /// # Errors
    ///
    /// Returns an error unless both vectors are 3-dimensional.
    pub fn cross(&self, other: &Self) -> Result<Self> {
        let [ax, ay, az] = self.xyz_exact()?;
        let [bx, by, bz] = other.xyz_exact()?;
        Ok(Self::new(vec![
            ay * bz - az * by,
            az * bx - ax * bz,
            ax * by - ay * bx,
        ]))
    }

    /// Euclidean length.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// The unit vector with the same orientation.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector's length is below tolerance.
    pub fn to_unit(&self) -> Result<Self> {
        let len = self.norm();
        if len <= TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(self.scale(1.0 / len))
    }

    /// Angle between two vectors, in radians.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ or either vector is
    /// zero-length.
    pub fn angle_from(&self, other: &Self) -> Result<f64> {
        let dot = self.dot(other)?;
        let len = self.norm() * other.norm();
        if len <= TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        // Clamp for acos: rounding can push the cosine a hair outside [-1, 1].
        Ok((dot / len).clamp(-1.0, 1.0).acos())
    }

    /// True when `other` points the same way (angle ≈ 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ or either vector is
    /// zero-length; mismatched dimensions have no angle, not a `false` one.
    pub fn is_parallel_to(&self, other: &Self) -> Result<bool> {
        Ok(approx_zero(self.angle_from(other)?))
    }

    /// True when `other` points the opposite way (angle ≈ π).
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ or either vector is
    /// zero-length.
    pub fn is_antiparallel_to(&self, other: &Self) -> Result<bool> {
        Ok(approx_eq(self.angle_from(other)?, std::f64::consts::PI))
    }

    /// True when the dot product vanishes within tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn is_perpendicular_to(&self, other: &Self) -> Result<bool> {
        Ok(approx_zero(self.dot(other)?))
    }

    /// Euclidean distance to another point.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn distance_from(&self, other: &Self) -> Result<f64> {
        Ok(self.subtract(other)?.norm())
    }

    /// The component of largest magnitude (sign preserved).
    #[must_use]
    pub fn max(&self) -> f64 {
        self.iter()
            .fold(0.0, |acc, x| if x.abs() > acc.abs() { x } else { acc })
    }

    /// Rounds every component to the nearest integer.
    #[must_use]
    pub fn round(&self) -> Self {
        Self::new(self.iter().map(f64::round).collect())
    }

    /// The square diagonal matrix carrying this vector on its diagonal.
    #[must_use]
    pub fn to_diagonal_matrix(&self) -> Matrix {
        Matrix::diagonal(&self.elements)
    }

    /// Pads a 1- or 2-dimensional vector with zeros up to 3 dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error for vectors of more than 3 dimensions.
    pub fn to_3d(&self) -> Result<Self> {
        if self.dim() > 3 {
            return Err(AlgebraError::DimensionMismatch {
                lhs: self.dim(),
                rhs: 3,
            }
            .into());
        }
        let mut elements = self.elements.clone();
        elements.resize(3, 0.0);
        Ok(Self::new(elements))
    }

    /// The padded 3-D components as an array.
    pub(crate) fn xyz(&self) -> Result<[f64; 3]> {
        let v = self.to_3d()?;
        Ok([v.elements[0], v.elements[1], v.elements[2]])
    }

    fn xyz_exact(&self) -> Result<[f64; 3]> {
        if self.dim() != 3 {
            return Err(AlgebraError::DimensionMismatch {
                lhs: self.dim(),
                rhs: 3,
            }
            .into());
        }
        Ok([self.elements[0], self.elements[1], self.elements[2]])
    }

    // ── geometric conveniences: a bare point against the primitives ──

    /// Perpendicular distance to an infinite line.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn distance_from_line(&self, line: &Line) -> Result<f64> {
        line.distance_from_point(self)
    }

    /// Distance to a bounded segment.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn distance_from_segment(&self, segment: &LineSegment) -> Result<f64> {
        segment.distance_from_point(self)
    }

    /// Perpendicular distance to a plane.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn distance_from_plane(&self, plane: &Plane) -> Result<f64> {
        plane.distance_from_point(self)
    }

    /// True when the point lies on the line within tolerance.
    #[must_use]
    pub fn lies_on_line(&self, line: &Line) -> bool {
        line.contains(self)
    }

    /// True when the point lies on the bounded segment within tolerance.
    #[must_use]
    pub fn lies_on_segment(&self, segment: &LineSegment) -> bool {
        segment.contains(self)
    }

    /// True when the point lies in the plane within tolerance.
    #[must_use]
    pub fn lies_in_plane(&self, plane: &Plane) -> bool {
        plane.contains(self)
    }

    /// Point reflection: `2·mirror − self`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ.
    pub fn reflect_in_point(&self, mirror: &Self) -> Result<Self> {
        mirror.scale(2.0).subtract(self)
    }

    /// Reflection across a line: the perpendicular offset is doubled.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn reflect_in_line(&self, mirror: &Line) -> Result<Self> {
        let p = self.to_3d()?;
        let foot = mirror.point_closest_to_point(&p)?;
        foot.scale(2.0).subtract(&p)
    }

    /// Reflection across a plane: the signed normal offset is doubled.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn reflect_in_plane(&self, mirror: &Plane) -> Result<Self> {
        let p = self.to_3d()?;
        let foot = mirror.point_closest_to(&p)?;
        foot.scale(2.0).subtract(&p)
    }

    /// Rotates a 2-D point around a 2-D pivot.
    ///
    /// # Errors
    ///
    /// Returns an error for inputs of more than 2 dimensions.
    pub fn rotate_2d(&self, theta: f64, pivot: &Self) -> Result<Self> {
        if self.dim() > 2 || pivot.dim() > 2 {
            return Err(AlgebraError::DimensionMismatch {
                lhs: self.dim().max(pivot.dim()),
                rhs: 2,
            }
            .into());
        }
        let mut p = self.elements.clone();
        p.resize(2, 0.0);
        let mut c = pivot.elements.clone();
        c.resize(2, 0.0);
        let offset = Self::new(vec![p[0] - c[0], p[1] - c[1]]);
        let rotated = Matrix::rotation_2d(theta).mul_vector(&offset)?;
        rotated.add(&Self::new(c))
    }

    /// Rotates a point around an axis line in 3-D.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn rotate_3d(&self, theta: f64, axis: &Line) -> Result<Self> {
        let p = self.to_3d()?;
        let pivot = axis.point_closest_to_point(&p)?;
        let offset = p.subtract(&pivot)?;
        let rotated = Matrix::rotation_about_axis(theta, axis.direction())?.mul_vector(&offset)?;
        rotated.add(&pivot)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(elements: Vec<f64>) -> Self {
        Self::new(elements)
    }
}

impl From<&[f64]> for Vector {
    fn from(elements: &[f64]) -> Self {
        Self::new(elements.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(elements: [f64; N]) -> Self {
        Self::new(elements.to_vec())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn v(elements: &[f64]) -> Vector {
        Vector::from(elements)
    }

    // ── value semantics ──

    #[test]
    fn display_matches_bracket_form() {
        assert_eq!("[0, 1, 7, 5]", v(&[0.0, 1.0, 7.0, 5.0]).to_string());
        assert_eq!("[4]", v(&[4.0]).to_string());
    }

    #[test]
    fn get_is_zero_based_and_bounded() {
        let u = v(&[0.0, 3.0, 4.0, 5.0]);
        assert_eq!(Some(0.0), u.get(0));
        assert_eq!(Some(5.0), u.get(3));
        assert_eq!(None, u.get(4));
    }

    #[test]
    fn zero_vectors_have_zero_norm() {
        for n in 1..8 {
            assert_eq!(0.0, Vector::zero(n).norm());
            assert_eq!(n, Vector::zero(n).dim());
        }
    }

    #[test]
    fn eql_is_tolerance_equality() {
        assert!(v(&[3.0, 6.0, 9.0]).eql(&v(&[3.0, 6.0, 9.0])));
        assert!(!v(&[3.01, 6.0, 9.0]).eql(&v(&[3.0, 6.0, 9.0])));
        assert!(!v(&[3.0, 6.0, 9.0]).eql(&v(&[3.0, 6.0])));
        assert!(Vector::zero(3).eql(&v(&[0.0, 0.0, 0.0])));
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let original = v(&[3.0, 4.0, 5.0]);
        let mut copy = original.clone();
        copy.set_elements(vec![24.0, 4.0, 5.0]);
        assert!(original.eql(&v(&[3.0, 4.0, 5.0])));
        assert!(copy.eql(&v(&[24.0, 4.0, 5.0])));
    }

    // ── arithmetic ──

    #[test]
    fn add_and_subtract() {
        let a = v(&[2.0, 9.0, 4.0]);
        let b = v(&[5.0, 13.0, 7.0]);
        assert!(a.add(&b).unwrap().eql(&v(&[7.0, 22.0, 11.0])));
        assert!(a.subtract(&b).unwrap().eql(&v(&[-3.0, -4.0, -3.0])));
        assert!(a.add(&v(&[2.0, 8.0])).is_err());
        assert!(a.subtract(&v(&[9.0, 3.0, 6.0, 1.0, 7.0])).is_err());
        assert!(a.scale(4.0).eql(&v(&[8.0, 36.0, 16.0])));
    }

    #[test]
    fn add_then_subtract_round_trips() {
        let u = v(&[1.5, -2.25, 8.0, 0.125]);
        let w = v(&[-3.0, 4.5, 0.25, 9.0]);
        assert!(u.add(&w).unwrap().subtract(&w).unwrap().eql(&u));
    }

    #[test]
    fn dot_and_cross_products() {
        let a = v(&[2.0, 9.0, 4.0]);
        let b = v(&[5.0, 13.0, 7.0]);
        assert_abs_diff_eq!(2.0 * 5.0 + 9.0 * 13.0 + 4.0 * 7.0, a.dot(&b).unwrap());
        assert!(a.cross(&b).unwrap().eql(&v(&[
            9.0 * 7.0 - 4.0 * 13.0,
            4.0 * 5.0 - 2.0 * 7.0,
            2.0 * 13.0 - 9.0 * 5.0,
        ])));
        assert!(a.dot(&v(&[7.0, 9.0])).is_err());
        assert!(b.cross(&v(&[9.0, 1.0, 4.0, 3.0])).is_err());
    }

    #[test]
    fn norm_and_distance() {
        assert_abs_diff_eq!(50.0_f64.sqrt(), v(&[0.0, 3.0, 4.0, 5.0]).norm());
        assert_abs_diff_eq!(1.0, Vector::i().norm());
        assert_abs_diff_eq!(
            v(&[1.0, 9.0, 0.0, 13.0]).norm(),
            v(&[3.0, 9.0, 4.0, 6.0])
                .distance_from(&v(&[2.0, 0.0, 4.0, -7.0]))
                .unwrap()
        );
    }

    #[test]
    fn to_unit_normalizes() {
        let u = v(&[8.0, 2.0, 9.0, 4.0]);
        let unit = u.to_unit().unwrap();
        assert_abs_diff_eq!(1.0, unit.norm(), epsilon = TOLERANCE);
        assert!(unit.scale(165.0_f64.sqrt()).eql(&u));
        assert!(unit.is_parallel_to(&u).unwrap());
        assert!(Vector::zero(3).to_unit().is_err());
    }

    #[test]
    fn angles_and_angle_classes() {
        assert_abs_diff_eq!(PI / 2.0, Vector::i().angle_from(&Vector::j()).unwrap());
        assert_abs_diff_eq!(
            PI / 4.0,
            v(&[1.0, 0.0]).angle_from(&v(&[1.0, 1.0])).unwrap(),
            epsilon = TOLERANCE
        );
        assert!(Vector::i().angle_from(&v(&[1.0, 6.0, 3.0, 5.0])).is_err());

        assert!(Vector::i()
            .is_parallel_to(&Vector::i().scale(235_457.0))
            .unwrap());
        assert!(Vector::i()
            .is_antiparallel_to(&Vector::i().scale(-235_457.0))
            .unwrap());
        assert!(Vector::i().is_perpendicular_to(&Vector::k()).unwrap());
        assert!(Vector::i().is_parallel_to(&v(&[8.0, 9.0])).is_err());
        assert!(Vector::i()
            .is_perpendicular_to(&v(&[8.0, 9.0, 0.0, 3.0]))
            .is_err());
    }

    #[test]
    fn max_keeps_the_sign() {
        assert_abs_diff_eq!(12.0, v(&[2.0, 8.0, 5.0, 9.0, 3.0, 7.0, 12.0]).max());
        assert_abs_diff_eq!(-17.0, v(&[-17.0, 8.0, 5.0, 9.0, 3.0, 7.0, 12.0]).max());
    }

    #[test]
    fn round_and_diagonal_matrix() {
        assert!(v(&[2.56, 3.5, 3.49]).round().eql(&v(&[3.0, 4.0, 3.0])));
        let m = v(&[2.0, 6.0, 4.0, 3.0]).to_diagonal_matrix();
        assert_eq!((4, 4), (m.rows(), m.cols()));
        assert_eq!(Some(6.0), m.get(1, 1));
        assert_eq!(Some(0.0), m.get(2, 0));
    }

    #[test]
    fn to_3d_pads_but_never_truncates() {
        assert!(v(&[5.0]).to_3d().unwrap().eql(&v(&[5.0, 0.0, 0.0])));
        assert!(v(&[5.0, 1.0]).to_3d().unwrap().eql(&v(&[5.0, 1.0, 0.0])));
        assert!(v(&[1.0, 2.0, 3.0, 4.0]).to_3d().is_err());
    }

    #[test]
    fn dimension_zero_vector_is_degenerate_but_valid() {
        let empty = Vector::zero(0);
        assert_eq!(0, empty.dim());
        assert_eq!(0.0, empty.norm());
        // Dimension checks still apply against non-empty vectors.
        assert!(empty.add(&v(&[1.0])).is_err());
        assert!(empty.dot(&Vector::i()).is_err());
        // Padding promotes it to the origin, like any shorter input.
        assert!(empty.to_3d().unwrap().eql(&Vector::zero(3)));
    }

    // ── point against primitive ──

    #[test]
    fn distances_to_primitives() {
        assert_abs_diff_eq!(
            (64.0_f64 + 49.0).sqrt(),
            v(&[2.0, 8.0, 7.0]).distance_from_line(&Line::x_axis()).unwrap()
        );
        assert_abs_diff_eq!(
            78.0,
            v(&[28.0, -43.0, 78.0]).distance_from_plane(&Plane::xy()).unwrap()
        );
        let seg = LineSegment::new(&Vector::zero(3), &v(&[4.0, 0.0, 0.0])).unwrap();
        assert_abs_diff_eq!(
            5.0,
            v(&[7.0, 4.0, 0.0]).distance_from_segment(&seg).unwrap()
        );
    }

    #[test]
    fn containment_predicates() {
        assert!(v(&[12.0, 0.0, 0.0]).lies_on_line(&Line::x_axis()));
        assert!(!v(&[12.0, 1.0, 0.0]).lies_on_line(&Line::x_axis()));
        assert!(!v(&[12.0, 0.0, 3.0]).lies_on_line(&Line::x_axis()));
        let seg = LineSegment::new(&v(&[2.0, 9.0, 4.0]), &v(&[14.0, 21.0, 4.0])).unwrap();
        assert!(v(&[9.0, 16.0, 4.0]).lies_on_segment(&seg));
        assert!(!v(&[9.0, 17.0, 4.0]).lies_on_segment(&seg));
        assert!(v(&[0.0, -3.0, 6.0]).lies_in_plane(&Plane::yz()));
        assert!(!v(&[4.0, -3.0, 6.0]).lies_in_plane(&Plane::yz()));
    }

    #[test]
    fn reflections() {
        assert!(v(&[3.0, 0.0, 0.0])
            .reflect_in_point(&v(&[0.0, 3.0, 0.0]))
            .unwrap()
            .eql(&v(&[-3.0, 6.0, 0.0])));
        let diag = Line::new(&Vector::zero(3), &v(&[1.0, 0.0, 1.0])).unwrap();
        assert!(v(&[3.0, 0.0, 0.0])
            .reflect_in_line(&diag)
            .unwrap()
            .eql(&v(&[0.0, 0.0, 3.0])));
        assert!(v(&[25.0, -48.0, 77.0])
            .reflect_in_plane(&Plane::xy())
            .unwrap()
            .eql(&v(&[25.0, -48.0, -77.0])));
    }

    #[test]
    fn rotations() {
        assert!(v(&[12.0, 1.0])
            .rotate_2d(PI / 2.0, &v(&[5.0, 1.0]))
            .unwrap()
            .eql(&v(&[5.0, 8.0])));
        let axis = Line::new(&v(&[10.0, 0.0, 100.0]), &Vector::k()).unwrap();
        assert!(Vector::i()
            .rotate_3d(-PI / 2.0, &axis)
            .unwrap()
            .eql(&v(&[10.0, 9.0, 0.0])));
    }
}
