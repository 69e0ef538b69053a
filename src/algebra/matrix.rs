use std::fmt;

use crate::error::{AlgebraError, Result};

use super::{approx_eq, Vector, TOLERANCE};

/// A rectangular grid of reals, stored row-major.
///
/// Any shape `r × c` with `r, c ≥ 0` is a valid value; the 0×0 empty matrix
/// is well-defined (its determinant is 1). Every row holds exactly `c`
/// entries by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Builds a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows are not all the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(AlgebraError::ShapeMismatch(format!(
                    "row {i} has {} entries, expected {ncols}",
                    row.len()
                ))
                .into());
            }
            data.extend(row);
        }
        Ok(Self {
            rows: nrows,
            cols: ncols,
            data,
        })
    }

    /// The `rows × cols` matrix of zeros.
    #[must_use]
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// The `n × n` identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// The square matrix carrying `entries` on its diagonal.
    #[must_use]
    pub fn diagonal(entries: &[f64]) -> Self {
        let n = entries.len();
        let mut m = Self::zero(n, n);
        for (i, &x) in entries.iter().enumerate() {
            m.data[i * n + i] = x;
        }
        m
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at (`row`, `col`), 0-based, or `None` when out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Replaces the entry at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns an error when the index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row < self.rows && col < self.cols {
            self.data[row * self.cols + col] = value;
            Ok(())
        } else {
            Err(AlgebraError::ShapeMismatch(format!(
                "index ({row}, {col}) out of range for {}x{}",
                self.rows, self.cols
            ))
            .into())
        }
    }

    /// Row `row` as a vector, or `None` when out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<Vector> {
        if row < self.rows {
            let start = row * self.cols;
            Some(Vector::from(&self.data[start..start + self.cols]))
        } else {
            None
        }
    }

    /// Column `col` as a vector, or `None` when out of range.
    #[must_use]
    pub fn col(&self, col: usize) -> Option<Vector> {
        if col < self.cols && self.rows > 0 {
            Some(Vector::new(
                (0..self.rows).map(|r| self.data[r * self.cols + col]).collect(),
            ))
        } else {
            None
        }
    }

    /// True for `n × n` matrices, including the empty one.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// True when both matrices have the same shape.
    #[must_use]
    pub fn is_same_size_as(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Tolerance equality: same shape and every entry pair within
    /// [`TOLERANCE`].
    #[must_use]
    pub fn eql(&self, other: &Self) -> bool {
        self.is_same_size_as(other)
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| approx_eq(*a, *b))
    }

    /// The transposed matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::zero(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }
        out
    }

    fn check_same_size(&self, other: &Self, op: &str) -> Result<()> {
        if self.is_same_size_as(other) {
            Ok(())
        } else {
            Err(AlgebraError::ShapeMismatch(format!(
                "cannot {op} {}x{} and {}x{}",
                self.rows, self.cols, other.rows, other.cols
            ))
            .into())
        }
    }

    /// Entry-wise sum.
    ///
    /// # Errors
    ///
    /// Returns an error unless both matrices have identical shape.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_same_size(other, "add")?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(&other.data).map(|(a, b)| a + b).collect(),
        })
    }

    /// Entry-wise difference.
    ///
    /// # Errors
    ///
    /// Returns an error unless both matrices have identical shape.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.check_same_size(other, "subtract")?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(&other.data).map(|(a, b)| a - b).collect(),
        })
    }

    /// Multiplies every entry by `k`.
    #[must_use]
    pub fn scale(&self, k: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|x| x * k).collect(),
        }
    }

    /// Matrix product; valid iff `self.cols == other.rows`.
    ///
    /// # Errors
    ///
    /// Returns an error on incompatible shapes.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(AlgebraError::ShapeMismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            ))
            .into());
        }
        let mut out = Self::zero(self.rows, other.cols);
        for r in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[r * self.cols + k];
                if a == 0.0 {
                    continue;
                }
                for c in 0..other.cols {
                    out.data[r * other.cols + c] += a * other.data[k * other.cols + c];
                }
            }
        }
        Ok(out)
    }

    /// Matrix–column-vector product.
    ///
    /// # Errors
    ///
    /// Returns an error unless the vector's dimension equals the column
    /// count.
    pub fn mul_vector(&self, v: &Vector) -> Result<Vector> {
        if v.dim() != self.cols {
            return Err(AlgebraError::ShapeMismatch(format!(
                "cannot multiply {}x{} by a {}-dimensional vector",
                self.rows,
                self.cols,
                v.dim()
            ))
            .into());
        }
        Ok(Vector::new(
            (0..self.rows)
                .map(|r| {
                    (0..self.cols)
                        .map(|c| self.data[r * self.cols + c] * v.as_slice()[c])
                        .sum()
                })
                .collect(),
        ))
    }

    /// Extracts an `nrows × ncols` submatrix starting at (`row`, `col`),
    /// wrapping indices cyclically past the source bounds.
    #[must_use]
    pub fn minor(&self, row: usize, col: usize, nrows: usize, ncols: usize) -> Self {
        if self.rows == 0 || self.cols == 0 {
            return Self::zero(0, 0);
        }
        let mut out = Self::zero(nrows, ncols);
        for r in 0..nrows {
            for c in 0..ncols {
                let sr = (row + r) % self.rows;
                let sc = (col + c) % self.cols;
                out.data[r * ncols + c] = self.data[sr * self.cols + sc];
            }
        }
        out
    }

    /// Glues `other` onto the right edge.
    ///
    /// # Errors
    ///
    /// Returns an error unless the row counts match.
    pub fn augment(&self, other: &Self) -> Result<Self> {
        if self.rows != other.rows {
            return Err(AlgebraError::ShapeMismatch(format!(
                "cannot augment {}x{} with {}x{}",
                self.rows, self.cols, other.rows, other.cols
            ))
            .into());
        }
        let cols = self.cols + other.cols;
        let mut out = Self::zero(self.rows, cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.data[r * cols + c] = self.data[r * self.cols + c];
            }
            for c in 0..other.cols {
                out.data[r * cols + self.cols + c] = other.data[r * other.cols + c];
            }
        }
        Ok(out)
    }

    /// Gaussian elimination with epsilon-threshold partial pivoting.
    ///
    /// Returns the echelon form and the sign accumulated by row swaps. At
    /// each step the first remaining row whose pivot magnitude exceeds
    /// [`TOLERANCE`] is selected; sub-tolerance entries in the pivot column
    /// are flushed to exact zero so repeated runs yield identical output.
    fn eliminate(&self) -> (Self, f64) {
        let mut m = self.clone();
        let mut sign = 1.0;
        let mut pivot_row = 0;
        for col in 0..m.cols {
            if pivot_row >= m.rows {
                break;
            }
            let found = (pivot_row..m.rows).find(|&r| m.data[r * m.cols + col].abs() > TOLERANCE);
            let Some(src) = found else {
                for r in pivot_row..m.rows {
                    m.data[r * m.cols + col] = 0.0;
                }
                continue;
            };
            if src != pivot_row {
                for c in 0..m.cols {
                    m.data.swap(src * m.cols + c, pivot_row * m.cols + c);
                }
                sign = -sign;
            }
            let pivot = m.data[pivot_row * m.cols + col];
            for r in pivot_row + 1..m.rows {
                let factor = m.data[r * m.cols + col] / pivot;
                m.data[r * m.cols + col] = 0.0;
                if factor != 0.0 {
                    for c in col + 1..m.cols {
                        m.data[r * m.cols + c] -= factor * m.data[pivot_row * m.cols + c];
                    }
                }
            }
            pivot_row += 1;
        }
        (m, sign)
    }

    /// The upper-triangular row-echelon form of the matrix.
    #[must_use]
    pub fn to_right_triangular(&self) -> Self {
        self.eliminate().0
    }

    /// The determinant of a square matrix.
    ///
    /// The 0×0 empty matrix has determinant 1.
    ///
    /// # Errors
    ///
    /// Returns an error for non-square matrices.
    pub fn determinant(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(AlgebraError::ShapeMismatch(format!(
                "determinant of a non-square {}x{} matrix",
                self.rows, self.cols
            ))
            .into());
        }
        let (tri, sign) = self.eliminate();
        let mut det = sign;
        for i in 0..self.rows {
            det *= tri.data[i * self.cols + i];
        }
        Ok(det)
    }

    /// Sum of the diagonal of a square matrix.
    ///
    /// # Errors
    ///
    /// Returns an error for non-square matrices.
    pub fn trace(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(AlgebraError::ShapeMismatch(format!(
                "trace of a non-square {}x{} matrix",
                self.rows, self.cols
            ))
            .into());
        }
        Ok((0..self.rows).map(|i| self.data[i * self.cols + i]).sum())
    }

    /// The diagonal of a square matrix, as a vector.
    ///
    /// # Errors
    ///
    /// Returns an error for non-square matrices.
    pub fn diagonal_vector(&self) -> Result<Vector> {
        if !self.is_square() {
            return Err(AlgebraError::ShapeMismatch(format!(
                "diagonal of a non-square {}x{} matrix",
                self.rows, self.cols
            ))
            .into());
        }
        Ok(Vector::new(
            (0..self.rows).map(|i| self.data[i * self.cols + i]).collect(),
        ))
    }

    /// Number of linearly independent rows: rows of the echelon form whose
    /// leading entry exceeds the tolerance.
    #[must_use]
    pub fn rank(&self) -> usize {
        let tri = self.to_right_triangular();
        (0..tri.rows)
            .filter(|&r| (0..tri.cols).any(|c| tri.data[r * tri.cols + c].abs() > TOLERANCE))
            .count()
    }

    /// True iff square with a sub-tolerance determinant.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        self.determinant().is_ok_and(|det| det.abs() <= TOLERANCE)
    }

    /// The inverse of a non-singular square matrix, by Gauss-Jordan
    /// elimination of the identity-augmented matrix.
    ///
    /// Singularity is decided by the same criterion as
    /// [`is_singular`](Self::is_singular): a sub-tolerance determinant.
    ///
    /// # Errors
    ///
    /// Returns an error for non-square matrices, or [`AlgebraError::Singular`]
    /// for a singular one.
    pub fn inverse(&self) -> Result<Self> {
        if !self.is_square() {
            return Err(AlgebraError::ShapeMismatch(format!(
                "inverse of a non-square {}x{} matrix",
                self.rows, self.cols
            ))
            .into());
        }
        if self.is_singular() {
            return Err(AlgebraError::Singular.into());
        }
        let n = self.rows;
        let mut aug = self.augment(&Self::identity(n))?;
        let w = aug.cols;
        for col in 0..n {
            let src = (col..n)
                .find(|&r| aug.data[r * w + col].abs() > TOLERANCE)
                .ok_or(AlgebraError::Singular)?;
            if src != col {
                for c in 0..w {
                    aug.data.swap(src * w + c, col * w + c);
                }
            }
            let pivot = aug.data[col * w + col];
            for c in 0..w {
                aug.data[col * w + c] /= pivot;
            }
            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = aug.data[r * w + col];
                if factor != 0.0 {
                    for c in 0..w {
                        aug.data[r * w + c] -= factor * aug.data[col * w + c];
                    }
                }
            }
        }
        Ok(aug.minor(0, n, n, n))
    }

    /// The 2×2 rotation matrix for a counter-clockwise angle `theta`.
    #[must_use]
    pub fn rotation_2d(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self {
            rows: 2,
            cols: 2,
            data: vec![c, -s, s, c],
        }
    }

    /// The 3×3 rotation matrix for angle `theta` about `axis` (Rodrigues
    /// form). The axis need not be unit length.
    ///
    /// # Errors
    ///
    /// Returns an error when the axis is zero-length or not (at most)
    /// 3-dimensional.
    pub fn rotation_about_axis(theta: f64, axis: &Vector) -> Result<Self> {
        let [x, y, z] = axis.to_3d()?.to_unit()?.xyz()?;
        let (s, c) = theta.sin_cos();
        let t = 1.0 - c;
        Ok(Self {
            rows: 3,
            cols: 3,
            data: vec![
                t * x * x + c,
                t * x * y - s * z,
                t * x * z + s * y,
                t * x * y + s * z,
                t * y * y + c,
                t * y * z - s * x,
                t * x * z - s * y,
                t * y * z + s * x,
                t * z * z + c,
            ],
        })
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows == 0 {
            return write!(f, "[]");
        }
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[r * self.cols + c])?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    // ── construction & access ──

    #[test]
    fn display_prints_one_row_per_line() {
        let a = m(&[&[0.0, 3.0, 4.0, 8.0], &[3.0, 9.0, 7.0, 3.0]]);
        assert_eq!("[0, 3, 4, 8]\n[3, 9, 7, 3]", a.to_string());
        assert_eq!("[128]", m(&[&[128.0]]).to_string());
        assert_eq!("[]", Matrix::zero(0, 0).to_string());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn identity_of_every_size() {
        assert!(Matrix::identity(3).eql(&m(&[
            &[1.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0]
        ])));
        assert!(Matrix::identity(1).eql(&m(&[&[1.0]])));
        assert!(Matrix::identity(0).eql(&Matrix::zero(0, 0)));
    }

    #[test]
    fn get_row_col_are_bounded() {
        let a = m(&[&[0.0, 3.0, 4.0, 8.0], &[3.0, 9.0, 7.0, 3.0]]);
        assert_eq!(Some(0.0), a.get(0, 0));
        assert_eq!(Some(8.0), a.get(0, 3));
        assert_eq!(None, a.get(1, 5));
        assert!(a.row(1).unwrap().eql(&Vector::from([3.0, 9.0, 7.0, 3.0])));
        assert_eq!(None, a.row(2));
        assert!(a.col(1).unwrap().eql(&Vector::from([3.0, 9.0])));
        assert_eq!(None, a.col(5));
        assert_eq!(None, Matrix::zero(0, 0).row(0));
        assert_eq!(None, Matrix::zero(0, 0).col(0));
    }

    #[test]
    fn empty_matrix_dimensions() {
        assert_eq!((0, 0), (Matrix::zero(0, 0).rows(), Matrix::zero(0, 0).cols()));
        assert!(Matrix::zero(0, 0).is_square());
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let original = m(&[&[2.0, 3.0, 8.0], &[7.0, 0.0, 2.0], &[6.0, 3.0, 0.0]]);
        let mut copy = original.clone();
        copy.set(1, 1, 99.0).unwrap();
        assert!(!original.eql(&copy));
        assert_eq!(Some(0.0), original.get(1, 1));
        assert!(copy.set(5, 5, 1.0).is_err());
    }

    #[test]
    fn size_comparison() {
        assert!(Matrix::zero(2, 5).is_same_size_as(&Matrix::zero(2, 5)));
        assert!(!Matrix::zero(2, 6).is_same_size_as(&Matrix::zero(2, 5)));
        assert!(!Matrix::zero(1, 5).is_same_size_as(&Matrix::zero(2, 5)));
    }

    // ── arithmetic ──

    #[test]
    fn add_and_subtract() {
        let a = m(&[&[2.0, 5.0, 9.0, 3.0], &[9.0, 2.0, 8.0, 5.0]]);
        let b = m(&[&[7.0, 1.0, 0.0, 8.0], &[0.0, 4.0, 3.0, 8.0]]);
        let sum = m(&[&[9.0, 6.0, 9.0, 11.0], &[9.0, 6.0, 11.0, 13.0]]);
        assert!(a.add(&b).unwrap().eql(&sum));
        assert!(b.add(&a).unwrap().eql(&sum));
        assert!(a.add(&Matrix::zero(2, 5)).is_err());

        let diff = m(&[&[-5.0, 4.0, 9.0, -5.0], &[9.0, -2.0, 5.0, -3.0]]);
        assert!(a.subtract(&b).unwrap().eql(&diff));
        assert!(b.subtract(&a).unwrap().eql(&diff.scale(-1.0)));
        assert!(a.subtract(&Matrix::zero(2, 7)).is_err());

        assert!(b
            .scale(3.0)
            .eql(&m(&[&[21.0, 3.0, 0.0, 24.0], &[0.0, 12.0, 9.0, 24.0]])));
    }

    #[test]
    fn multiplication_requires_compatible_shapes() {
        let a = m(&[&[2.0, 5.0, 9.0, 3.0], &[9.0, 2.0, 8.0, 5.0]]);
        let b = m(&[&[2.0, 9.0], &[0.0, 2.0], &[8.0, 1.0], &[0.0, 6.0]]);
        let product = a.multiply(&b).unwrap();
        assert_eq!((2, 2), (product.rows(), product.cols()));
        assert!(product.eql(&m(&[&[76.0, 55.0], &[82.0, 123.0]])));

        let reversed = b.multiply(&a).unwrap();
        assert_eq!((4, 4), (reversed.rows(), reversed.cols()));
        // 2x4 times 2x2 is incompatible.
        assert!(a.multiply(&product).is_err());
        assert!(a.multiply(&b.multiply(&a).unwrap()).is_ok());
    }

    #[test]
    fn vector_product() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert!(a
            .mul_vector(&Vector::from([5.0, 6.0]))
            .unwrap()
            .eql(&Vector::from([17.0, 39.0])));
        assert!(a.mul_vector(&Vector::from([1.0, 2.0, 3.0])).is_err());
    }

    #[test]
    fn minor_wraps_cyclically() {
        let b = m(&[&[2.0, 9.0], &[0.0, 2.0], &[8.0, 1.0], &[0.0, 6.0]]);
        assert!(b.minor(0, 1, 3, 3).eql(&m(&[
            &[9.0, 2.0, 9.0],
            &[2.0, 0.0, 2.0],
            &[1.0, 8.0, 1.0]
        ])));
    }

    #[test]
    fn transpose_round_trips() {
        let a = m(&[&[3.0, 9.0, 8.0, 4.0], &[2.0, 0.0, 1.0, 5.0]]);
        let t = m(&[&[3.0, 2.0], &[9.0, 0.0], &[8.0, 1.0], &[4.0, 5.0]]);
        assert!(a.transpose().eql(&t));
        assert!(t.transpose().eql(&a));
    }

    #[test]
    fn diagonal_accessors() {
        let a = m(&[&[9.0, 2.0, 9.0], &[2.0, 0.0, 2.0], &[1.0, 8.0, 1.0]]);
        assert!(a
            .diagonal_vector()
            .unwrap()
            .eql(&Vector::from([9.0, 0.0, 1.0])));
        assert!(Matrix::zero(2, 3).diagonal_vector().is_err());
        assert!(Matrix::diagonal(&[3.0, 9.0, 5.0, 7.0]).eql(&m(&[
            &[3.0, 0.0, 0.0, 0.0],
            &[0.0, 9.0, 0.0, 0.0],
            &[0.0, 0.0, 5.0, 0.0],
            &[0.0, 0.0, 0.0, 7.0]
        ])));
    }

    #[test]
    fn augment_glues_columns() {
        let a = m(&[&[7.0, 2.0, 9.0, 4.0], &[4.0, 8.0, 2.0, 6.0], &[9.0, 2.0, 5.0, 6.0]]);
        let b = m(&[&[4.0, 6.0], &[5.0, 2.0], &[8.0, 2.0]]);
        assert!(a.augment(&b).unwrap().eql(&m(&[
            &[7.0, 2.0, 9.0, 4.0, 4.0, 6.0],
            &[4.0, 8.0, 2.0, 6.0, 5.0, 2.0],
            &[9.0, 2.0, 5.0, 6.0, 8.0, 2.0]
        ])));
        assert!(a.augment(&Matrix::identity(2)).is_err());
    }

    // ── elimination kernel ──

    #[test]
    fn triangular_form_zeroes_below_the_diagonal() {
        let a = m(&[&[2.0, 1.0, 1.0], &[4.0, -6.0, 0.0], &[-2.0, 7.0, 2.0]]);
        let tri = a.to_right_triangular();
        for r in 0..3 {
            for c in 0..r {
                assert_abs_diff_eq!(0.0, tri.get(r, c).unwrap());
            }
        }
    }

    #[test]
    fn triangular_form_is_deterministic() {
        let a = m(&[&[0.0, 2.0, 1.0], &[3.0, 1.0, 4.0], &[6.0, 2.0, 9.0]]);
        assert!(a.to_right_triangular().eql(&a.to_right_triangular()));
    }

    #[test]
    fn determinant_matches_cofactor_expansion() {
        let e = [[3.0, 1.0, 8.0], [2.0, -5.0, 4.0], [-1.0, 6.0, -2.0]];
        let expected = e[0][0] * (e[1][1] * e[2][2] - e[1][2] * e[2][1])
            + e[0][1] * (e[1][2] * e[2][0] - e[1][0] * e[2][2])
            + e[0][2] * (e[1][0] * e[2][1] - e[1][1] * e[2][0]);
        let a = m(&[&e[0], &e[1], &e[2]]);
        assert_abs_diff_eq!(expected, a.determinant().unwrap(), epsilon = TOLERANCE);
    }

    #[test]
    fn determinant_needs_a_square_matrix() {
        assert!(Matrix::zero(3, 4).determinant().is_err());
        assert_abs_diff_eq!(1.0, Matrix::zero(0, 0).determinant().unwrap());
    }

    #[test]
    fn determinant_with_a_leading_zero_pivot() {
        // Forces a row swap; the swap must flip the sign exactly once.
        let a = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        assert_abs_diff_eq!(-1.0, a.determinant().unwrap(), epsilon = TOLERANCE);
    }

    #[test]
    fn singularity() {
        let a = m(&[&[0.0, 3.0, 5.0], &[0.0, 1.0, 2.0], &[0.0, 8.0, 7.0]]);
        assert!(a.is_singular());
        assert!(!Matrix::zero(4, 3).is_singular());
        assert!(!Matrix::identity(3).is_singular());
    }

    #[test]
    fn trace_sums_the_diagonal() {
        let a = m(&[&[8.0, 1.0, 6.0], &[0.0, 1.0, 7.0], &[0.0, 1.0, 5.0]]);
        assert_abs_diff_eq!(14.0, a.trace().unwrap());
        assert!(Matrix::zero(4, 5).trace().is_err());
    }

    #[test]
    fn rank_counts_independent_rows() {
        // Third row is twice the first: rank 2.
        let a = m(&[
            &[1.0, 9.0, 4.0, 6.0],
            &[9.0, 2.0, 7.0, 4.0],
            &[18.0, 4.0, 14.0, 8.0],
        ]);
        assert_eq!(2, a.rank());
        assert_eq!(3, Matrix::identity(3).rank());
        assert_eq!(0, Matrix::zero(3, 3).rank());
    }

    #[test]
    fn inverse_multiplies_to_identity() {
        let a = m(&[
            &[2.0, 1.0, 0.0, 4.0],
            &[3.0, -1.0, 2.0, 1.0],
            &[1.0, 0.0, 5.0, -2.0],
            &[0.0, 2.0, 1.0, 3.0],
        ]);
        let inv = a.inverse().unwrap();
        assert!(a.multiply(&inv).unwrap().eql(&Matrix::identity(4)));
        assert!(inv.multiply(&a).unwrap().eql(&Matrix::identity(4)));
        assert!(m(&[&[4.0]]).inverse().unwrap().eql(&m(&[&[0.25]])));
    }

    #[test]
    fn inverse_failure_modes() {
        assert!(matches!(
            m(&[&[1.0, 2.0], &[2.0, 4.0]]).inverse(),
            Err(crate::Error::Algebra(AlgebraError::Singular))
        ));
        assert!(Matrix::zero(2, 3).inverse().is_err());
    }

    #[test]
    fn inverse_agrees_with_is_singular() {
        // Every pivot clears the tolerance, but the determinant does not.
        let tiny = Matrix::diagonal(&[1e-3, 1e-3]);
        assert!(tiny.is_singular());
        assert!(matches!(
            tiny.inverse(),
            Err(crate::Error::Algebra(AlgebraError::Singular))
        ));
    }

    // ── rotation factories ──

    #[test]
    fn planar_rotation() {
        assert!(Matrix::rotation_2d(PI / 2.0).eql(&m(&[&[0.0, -1.0], &[1.0, 0.0]])));
    }

    #[test]
    fn axis_rotation_matches_rodrigues_pin() {
        let r = Matrix::rotation_about_axis(PI / 2.0, &Vector::j()).unwrap();
        assert!(r.eql(&m(&[
            &[0.0, 0.0, 1.0],
            &[0.0, 1.0, 0.0],
            &[-1.0, 0.0, 0.0]
        ])));
        assert!(Matrix::rotation_about_axis(1.0, &Vector::zero(3)).is_err());
    }
}
