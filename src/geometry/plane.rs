use crate::algebra::{approx_zero, Matrix, Vector, TOLERANCE};
use crate::error::Result;

use super::{add3, cross3, dot3, sub3, Line, LineSegment};

/// An infinite plane defined by an anchor point and a unit normal.
///
/// The normal is normalized at construction and is never the zero vector.
/// A plane's identity is its point set: [`eql`](Self::eql) treats any
/// coplanar anchor and either normal sign as the same plane.
#[derive(Debug, Clone)]
pub struct Plane {
    anchor: Vector,
    normal: Vector,
}

impl Plane {
    /// Creates a plane from an anchor point and a normal.
    ///
    /// Inputs of fewer than 3 dimensions are padded with zeros.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length or either vector has
    /// more than 3 dimensions.
    pub fn new(anchor: &Vector, normal: &Vector) -> Result<Self> {
        Ok(Self {
            anchor: anchor.to_3d()?,
            normal: normal.to_3d()?.to_unit()?,
        })
    }

    /// Creates the plane through three points.
    ///
    /// # Errors
    ///
    /// Returns an error when the points are collinear (degenerate plane).
    pub fn from_points(a: &Vector, b: &Vector, c: &Vector) -> Result<Self> {
        let a = a.to_3d()?;
        let normal = cross3(&sub3(&b.to_3d()?, &a), &sub3(&c.to_3d()?, &a));
        Self::new(&a, &normal)
    }

    /// The XY coordinate plane (z = 0).
    #[must_use]
    pub fn xy() -> Self {
        Self {
            anchor: Vector::zero(3),
            normal: Vector::k(),
        }
    }

    /// The YZ coordinate plane (x = 0).
    #[must_use]
    pub fn yz() -> Self {
        Self {
            anchor: Vector::zero(3),
            normal: Vector::i(),
        }
    }

    /// The ZX coordinate plane (y = 0).
    #[must_use]
    pub fn zx() -> Self {
        Self {
            anchor: Vector::zero(3),
            normal: Vector::j(),
        }
    }

    /// The anchor point.
    #[must_use]
    pub fn anchor(&self) -> &Vector {
        &self.anchor
    }

    /// The unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector {
        &self.normal
    }

    /// Replaces the anchor, keeping the normal.
    ///
    /// # Errors
    ///
    /// Returns an error for anchors of more than 3 dimensions.
    pub fn set_anchor(&mut self, anchor: &Vector) -> Result<()> {
        self.anchor = anchor.to_3d()?;
        Ok(())
    }

    /// Replaces the normal, re-normalizing so the unit-length invariant
    /// always holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the new normal is zero-length.
    pub fn set_normal(&mut self, normal: &Vector) -> Result<()> {
        self.normal = normal.to_3d()?.to_unit()?;
        Ok(())
    }

    /// Tolerance equality as point sets: the other anchor lies in this
    /// plane and the normals are collinear (either sign).
    #[must_use]
    pub fn eql(&self, other: &Self) -> bool {
        self.contains(&other.anchor) && approx_zero(cross3(&self.normal, &other.normal).norm())
    }

    /// Returns the plane shifted by `offset`; the normal is unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error for offsets of more than 3 dimensions.
    pub fn translate(&self, offset: &Vector) -> Result<Self> {
        Ok(Self {
            anchor: add3(&self.anchor, &offset.to_3d()?),
            normal: self.normal.clone(),
        })
    }

    // ── containment & parallelism ──

    /// Signed offset of a (3-D) point along the normal.
    pub(crate) fn signed_dist(&self, point: &Vector) -> f64 {
        dot3(&sub3(point, &self.anchor), &self.normal)
    }

    /// Perpendicular distance from a (3-D) point.
    pub(crate) fn dist_to(&self, point: &Vector) -> f64 {
        self.signed_dist(point).abs()
    }

    /// Perpendicular foot of a (3-D) point on the plane.
    pub(crate) fn project(&self, point: &Vector) -> Vector {
        sub3(point, &self.normal.scale(self.signed_dist(point)))
    }

    /// Mirror image of a (3-D) point: the signed offset is doubled.
    pub(crate) fn reflect_point(&self, point: &Vector) -> Vector {
        sub3(point, &self.normal.scale(2.0 * self.signed_dist(point)))
    }

    /// True when `point` lies in the plane within tolerance.
    #[must_use]
    pub fn contains(&self, point: &Vector) -> bool {
        point.to_3d().is_ok_and(|p| approx_zero(self.dist_to(&p)))
    }

    /// True when the line lies entirely in the plane.
    #[must_use]
    pub fn contains_line(&self, line: &Line) -> bool {
        self.contains(line.anchor()) && self.is_parallel_to_line(line)
    }

    /// True when both of the segment's endpoints lie in the plane.
    #[must_use]
    pub fn contains_segment(&self, segment: &LineSegment) -> bool {
        self.contains(segment.start()) && self.contains(segment.end())
    }

    /// True when the normals are collinear.
    #[must_use]
    pub fn is_parallel_to_plane(&self, other: &Self) -> bool {
        approx_zero(cross3(&self.normal, &other.normal).norm())
    }

    /// True when the line's direction is perpendicular to the normal.
    #[must_use]
    pub fn is_parallel_to_line(&self, line: &Line) -> bool {
        approx_zero(dot3(&self.normal, line.direction()))
    }

    /// True when the segment's carrier is parallel to the plane.
    #[must_use]
    pub fn is_parallel_to_segment(&self, segment: &LineSegment) -> bool {
        self.is_parallel_to_line(segment.line())
    }

    // ── distances ──

    /// Perpendicular distance from a point.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn distance_from_point(&self, point: &Vector) -> Result<f64> {
        Ok(self.dist_to(&point.to_3d()?))
    }

    /// Distance to a line: zero unless parallel.
    #[must_use]
    pub fn distance_from_line(&self, line: &Line) -> f64 {
        if self.is_parallel_to_line(line) {
            self.dist_to(line.anchor())
        } else {
            0.0
        }
    }

    /// Distance to another plane: zero unless parallel.
    #[must_use]
    pub fn distance_from_plane(&self, other: &Self) -> f64 {
        if self.is_parallel_to_plane(other) {
            self.dist_to(&other.anchor)
        } else {
            0.0
        }
    }

    /// Distance to a bounded segment: zero when it crosses the plane, else
    /// the nearer endpoint's offset.
    #[must_use]
    pub fn distance_from_segment(&self, segment: &LineSegment) -> f64 {
        if self.intersects_segment(segment) {
            return 0.0;
        }
        self.dist_to(segment.start()).min(self.dist_to(segment.end()))
    }

    // ── intersection ──

    /// True when the planes share at least one point: not parallel, or
    /// coincident (which share every point but have no unique line).
    #[must_use]
    pub fn intersects_plane(&self, other: &Self) -> bool {
        !self.is_parallel_to_plane(other) || self.eql(other)
    }

    /// True when the line meets the plane, including lying inside it.
    #[must_use]
    pub fn intersects_line(&self, line: &Line) -> bool {
        line.intersects_plane(self)
    }

    /// True when the segment crosses the plane.
    #[must_use]
    pub fn intersects_segment(&self, segment: &LineSegment) -> bool {
        segment.intersects_plane(self)
    }

    /// The point where a line crosses the plane. `None` when parallel.
    #[must_use]
    pub fn intersection_with_line(&self, line: &Line) -> Option<Vector> {
        line.intersection_with_plane(self)
    }

    /// The point where a segment crosses the plane. `None` when parallel or
    /// out of bounds.
    #[must_use]
    pub fn intersection_with_segment(&self, segment: &LineSegment) -> Option<Vector> {
        segment.intersection_with_plane(self)
    }

    /// The line where two planes cross. `None` when parallel (coincident
    /// planes have no unique line).
    ///
    /// The direction is the cross product of the normals; the anchor is
    /// solved from the two plane constraints through the matrix kernel,
    /// restricted to the coordinate plane the direction points out of most
    /// strongly.
    #[must_use]
    pub fn intersection_with_plane(&self, other: &Self) -> Option<Line> {
        let direction = cross3(&self.normal, &other.normal);
        if direction.norm() <= TOLERANCE {
            return None;
        }
        // Index of the dominant direction component; its coordinate is
        // pinned to zero while the remaining two are solved.
        let dominant = direction
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
            .map(|(i, _)| i)?;
        let (i1, i2) = match dominant {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };
        let n1 = self.normal.as_slice();
        let n2 = other.normal.as_slice();
        let system =
            Matrix::from_rows(vec![vec![n1[i1], n1[i2]], vec![n2[i1], n2[i2]]]).ok()?;
        let rhs = Vector::new(vec![
            dot3(&self.normal, &self.anchor),
            dot3(&other.normal, &other.anchor),
        ]);
        let solution = system.inverse().ok()?.mul_vector(&rhs).ok()?;
        let mut anchor = [0.0; 3];
        anchor[i1] = solution.get(0)?;
        anchor[i2] = solution.get(1)?;
        Line::new(&Vector::from(anchor), &direction).ok()
    }

    // ── closest points ──

    /// Perpendicular foot of a point on the plane.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn point_closest_to(&self, point: &Vector) -> Result<Vector> {
        Ok(self.project(&point.to_3d()?))
    }

    // ── transforms ──

    /// Rotation about an axis line: the anchor swings around the axis's
    /// closest point and the normal rotates as a free vector.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed plane and axis.
    pub fn rotate(&self, theta: f64, axis: &Line) -> Result<Self> {
        let rotation = Matrix::rotation_about_axis(theta, axis.direction())?;
        let pivot = axis.foot_of(&self.anchor);
        let offset = rotation.mul_vector(&sub3(&self.anchor, &pivot))?;
        Ok(Self {
            anchor: add3(&pivot, &offset),
            normal: rotation.mul_vector(&self.normal)?,
        })
    }

    /// Reflection through a point: both defining points are reflected and
    /// the plane rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error for mirrors of more than 3 dimensions.
    pub fn reflect_in_point(&self, mirror: &Vector) -> Result<Self> {
        let m = mirror.to_3d()?;
        let anchor = sub3(&m.scale(2.0), &self.anchor);
        let tip = sub3(&m.scale(2.0), &add3(&self.anchor, &self.normal));
        Ok(Self {
            normal: sub3(&tip, &anchor),
            anchor,
        })
    }

    /// Reflection across a mirror line.
    #[must_use]
    pub fn reflect_in_line(&self, mirror: &Line) -> Self {
        let reflect = |p: &Vector| sub3(&mirror.foot_of(p).scale(2.0), p);
        let anchor = reflect(&self.anchor);
        let tip = reflect(&add3(&self.anchor, &self.normal));
        Self {
            normal: sub3(&tip, &anchor),
            anchor,
        }
    }

    /// Reflection across another plane.
    #[must_use]
    pub fn reflect_in_plane(&self, mirror: &Self) -> Self {
        let anchor = mirror.reflect_point(&self.anchor);
        let tip = mirror.reflect_point(&add3(&self.anchor, &self.normal));
        Self {
            normal: sub3(&tip, &anchor),
            anchor,
        }
    }
}
