use crate::algebra::{approx_zero, Matrix, Vector, TOLERANCE};
use crate::error::Result;

use super::{add3, closest_params, cross3, dot3, sub3, LineSegment, Plane};

/// An infinite line defined by an anchor point and a unit direction.
///
/// The direction is normalized at construction and sign-canonicalized (its
/// first above-tolerance component is made positive), so two lines built
/// from collinear but antiparallel directions are the same value. The
/// direction is never the zero vector.
#[derive(Debug, Clone)]
pub struct Line {
    anchor: Vector,
    direction: Vector,
}

impl Line {
    /// Creates a line from an anchor point and a direction.
    ///
    /// Inputs of fewer than 3 dimensions are padded with zeros.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is zero-length or either vector has
    /// more than 3 dimensions.
    pub fn new(anchor: &Vector, direction: &Vector) -> Result<Self> {
        let anchor = anchor.to_3d()?;
        let direction = canonicalize(&direction.to_3d()?.to_unit()?);
        Ok(Self { anchor, direction })
    }

    /// The X coordinate axis.
    #[must_use]
    pub fn x_axis() -> Self {
        Self {
            anchor: Vector::zero(3),
            direction: Vector::i(),
        }
    }

    /// The Y coordinate axis.
    #[must_use]
    pub fn y_axis() -> Self {
        Self {
            anchor: Vector::zero(3),
            direction: Vector::j(),
        }
    }

    /// The Z coordinate axis.
    #[must_use]
    pub fn z_axis() -> Self {
        Self {
            anchor: Vector::zero(3),
            direction: Vector::k(),
        }
    }

    /// The anchor point.
    #[must_use]
    pub fn anchor(&self) -> &Vector {
        &self.anchor
    }

    /// The unit direction.
    #[must_use]
    pub fn direction(&self) -> &Vector {
        &self.direction
    }

    /// Replaces the anchor, keeping the direction.
    ///
    /// # Errors
    ///
    /// Returns an error for anchors of more than 3 dimensions.
    pub fn set_anchor(&mut self, anchor: &Vector) -> Result<()> {
        self.anchor = anchor.to_3d()?;
        Ok(())
    }

    /// Replaces the direction, re-normalizing and re-canonicalizing so the
    /// unit-length invariant always holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the new direction is zero-length.
    pub fn set_direction(&mut self, direction: &Vector) -> Result<()> {
        self.direction = canonicalize(&direction.to_3d()?.to_unit()?);
        Ok(())
    }

    /// The point `anchor + t · direction`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Vector {
        add3(&self.anchor, &self.direction.scale(t))
    }

    /// Signed parameter of the perpendicular foot of `point`.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn position_of(&self, point: &Vector) -> Result<f64> {
        let p = point.to_3d()?;
        Ok(dot3(&sub3(&p, &self.anchor), &self.direction))
    }

    /// Tolerance equality: parallel directions and a shared anchor.
    #[must_use]
    pub fn eql(&self, other: &Self) -> bool {
        self.is_parallel_to_line(other) && self.contains(&other.anchor)
    }

    /// Returns the line shifted by `offset`; the direction is unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error for offsets of more than 3 dimensions.
    pub fn translate(&self, offset: &Vector) -> Result<Self> {
        Ok(Self {
            anchor: add3(&self.anchor, &offset.to_3d()?),
            direction: self.direction.clone(),
        })
    }

    // ── containment & parallelism ──

    /// True when `point` lies on the line within tolerance.
    #[must_use]
    pub fn contains(&self, point: &Vector) -> bool {
        point.to_3d().is_ok_and(|p| approx_zero(self.dist_to(&p)))
    }

    /// True when both of the segment's endpoints lie on the line.
    #[must_use]
    pub fn contains_segment(&self, segment: &LineSegment) -> bool {
        self.contains(segment.start()) && self.contains(segment.end())
    }

    /// True when the directions are collinear (cross product below
    /// tolerance).
    #[must_use]
    pub fn is_parallel_to_line(&self, other: &Self) -> bool {
        approx_zero(cross3(&self.direction, &other.direction).norm())
    }

    /// True when the line is parallel to the segment's carrier.
    #[must_use]
    pub fn is_parallel_to_segment(&self, segment: &LineSegment) -> bool {
        self.is_parallel_to_line(segment.line())
    }

    /// True when the direction is perpendicular to the plane's normal.
    #[must_use]
    pub fn is_parallel_to_plane(&self, plane: &Plane) -> bool {
        approx_zero(dot3(&self.direction, plane.normal()))
    }

    // ── distances ──

    /// Perpendicular foot of a (3-D) point on the line.
    pub(crate) fn foot_of(&self, point: &Vector) -> Vector {
        let t = dot3(&sub3(point, &self.anchor), &self.direction);
        self.point_at(t)
    }

    /// Perpendicular distance from a (3-D) point.
    pub(crate) fn dist_to(&self, point: &Vector) -> f64 {
        sub3(point, &self.foot_of(point)).norm()
    }

    /// Perpendicular distance from a point.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn distance_from_point(&self, point: &Vector) -> Result<f64> {
        Ok(self.dist_to(&point.to_3d()?))
    }

    /// Distance to another line: the perpendicular offset when parallel,
    /// otherwise the length of the common perpendicular.
    #[must_use]
    pub fn distance_from_line(&self, other: &Self) -> f64 {
        let normal = cross3(&self.direction, &other.direction);
        let len = normal.norm();
        if len <= TOLERANCE {
            return self.dist_to(&other.anchor);
        }
        dot3(&sub3(&other.anchor, &self.anchor), &normal.scale(1.0 / len)).abs()
    }

    /// Distance to a bounded segment: the carrier's closest point is clamped
    /// into the segment before measuring.
    #[must_use]
    pub fn distance_from_segment(&self, segment: &LineSegment) -> f64 {
        match closest_params(self, segment.line()) {
            // Parallel carrier: every segment point is equidistant.
            None => self.dist_to(segment.start()),
            Some((_, t)) => {
                let on_segment = segment.clamp_point(&segment.line().point_at(t));
                self.dist_to(&on_segment)
            }
        }
    }

    /// Distance to a plane: zero unless parallel, else the normal-projected
    /// anchor offset.
    #[must_use]
    pub fn distance_from_plane(&self, plane: &Plane) -> f64 {
        if self.is_parallel_to_plane(plane) {
            plane.dist_to(&self.anchor)
        } else {
            0.0
        }
    }

    // ── intersection ──

    /// The common point of two lines, when one exists within tolerance.
    ///
    /// The parameters of the mutually closest points are solved through the
    /// matrix kernel; the candidate is accepted only when it lies on both
    /// lines, so skew pairs yield `None` symmetrically.
    #[must_use]
    pub fn intersection_with_line(&self, other: &Self) -> Option<Vector> {
        let (s, t) = closest_params(self, other)?;
        let on_self = self.point_at(s);
        let on_other = other.point_at(t);
        if approx_zero(sub3(&on_self, &on_other).norm()) {
            Some(add3(&on_self, &on_other).scale(0.5))
        } else {
            None
        }
    }

    /// The point where the line crosses a plane. `None` when parallel,
    /// including a line contained in the plane (no unique point).
    #[must_use]
    pub fn intersection_with_plane(&self, plane: &Plane) -> Option<Vector> {
        let denom = dot3(&self.direction, plane.normal());
        if denom.abs() <= TOLERANCE {
            return None;
        }
        let t = dot3(&sub3(plane.anchor(), &self.anchor), plane.normal()) / denom;
        Some(self.point_at(t))
    }

    /// The common point with a bounded segment: the carrier solution must
    /// fall inside the segment (endpoints inclusive).
    #[must_use]
    pub fn intersection_with_segment(&self, segment: &LineSegment) -> Option<Vector> {
        let p = self.intersection_with_line(segment.line())?;
        segment.contains(&p).then_some(p)
    }

    /// True when the two lines share a point within tolerance, including
    /// coincident lines (which share every point but have no unique one).
    #[must_use]
    pub fn intersects_line(&self, other: &Self) -> bool {
        self.intersection_with_line(other).is_some() || self.eql(other)
    }

    /// True when the line meets the plane, including lying inside it.
    #[must_use]
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        !self.is_parallel_to_plane(plane) || plane.contains_line(self)
    }

    /// True when the line shares at least one point with the bounded
    /// segment, including a segment lying along the line.
    #[must_use]
    pub fn intersects_segment(&self, segment: &LineSegment) -> bool {
        self.intersection_with_segment(segment).is_some() || self.contains_segment(segment)
    }

    // ── closest points ──

    /// Perpendicular foot of a point on the line.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn point_closest_to_point(&self, point: &Vector) -> Result<Vector> {
        Ok(self.foot_of(&point.to_3d()?))
    }

    /// Foot of the common perpendicular on `self`. `None` for parallel lines
    /// (no unique closest point).
    #[must_use]
    pub fn point_closest_to_line(&self, other: &Self) -> Option<Vector> {
        let (s, _) = closest_params(self, other)?;
        Some(self.point_at(s))
    }

    /// The point of `self` closest to a bounded segment. `None` when the
    /// carrier is parallel to this line.
    #[must_use]
    pub fn point_closest_to_segment(&self, segment: &LineSegment) -> Option<Vector> {
        let (_, t) = closest_params(self, segment.line())?;
        let on_segment = segment.clamp_point(&segment.line().point_at(t));
        Some(self.foot_of(&on_segment))
    }

    /// The point where the line meets the plane. `None` when parallel.
    #[must_use]
    pub fn point_closest_to_plane(&self, plane: &Plane) -> Option<Vector> {
        self.intersection_with_plane(plane)
    }

    // ── transforms ──

    /// Reflection through a point: both defining points are reflected.
    ///
    /// # Errors
    ///
    /// Returns an error for mirrors of more than 3 dimensions.
    pub fn reflect_in_point(&self, mirror: &Vector) -> Result<Self> {
        let m = mirror.to_3d()?;
        let anchor = sub3(&m.scale(2.0), &self.anchor);
        Ok(Self {
            anchor,
            // Point reflection flips the direction; canonical form keeps the
            // stored value sign-stable.
            direction: canonicalize(&self.direction.negate()),
        })
    }

    /// Reflection across a mirror line: the perpendicular offset of each
    /// defining point is doubled; the direction reflects as a free vector.
    #[must_use]
    pub fn reflect_in_line(&self, mirror: &Self) -> Self {
        let anchor = reflect_point_in_line(&self.anchor, mirror);
        let tip = reflect_point_in_line(&self.point_at(1.0), mirror);
        Self {
            direction: canonicalize(&sub3(&tip, &anchor)),
            anchor,
        }
    }

    /// Reflection across a plane: the signed normal offset of each defining
    /// point is doubled.
    #[must_use]
    pub fn reflect_in_plane(&self, mirror: &Plane) -> Self {
        let anchor = mirror.reflect_point(&self.anchor);
        let tip = mirror.reflect_point(&self.point_at(1.0));
        Self {
            direction: canonicalize(&sub3(&tip, &anchor)),
            anchor,
        }
    }

    /// Rotation about an axis line: the anchor swings around the axis's
    /// closest point and the direction rotates as a free vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the rotation matrix cannot be applied (never for
    /// well-formed primitives).
    pub fn rotate(&self, theta: f64, axis: &Self) -> Result<Self> {
        let rotation = Matrix::rotation_about_axis(theta, axis.direction())?;
        let pivot = axis.foot_of(&self.anchor);
        let offset = rotation.mul_vector(&sub3(&self.anchor, &pivot))?;
        Ok(Self {
            anchor: add3(&pivot, &offset),
            direction: canonicalize(&rotation.mul_vector(&self.direction)?),
        })
    }

    /// Planar rotation about a pivot point, using the 2×2 rotation matrix on
    /// the XY components.
    ///
    /// # Errors
    ///
    /// Returns an error for pivots of more than 3 dimensions.
    pub fn rotate_2d(&self, theta: f64, pivot: &Vector) -> Result<Self> {
        let rotation = Matrix::rotation_2d(theta);
        let pivot = pivot.to_3d()?;
        let anchor = rotate_xy(&rotation, &self.anchor, &pivot)?;
        let tip = rotate_xy(&rotation, &self.point_at(1.0), &pivot)?;
        Self::new(&anchor, &sub3(&tip, &anchor))
    }
}

/// Flips a unit vector so its first above-tolerance component is positive.
fn canonicalize(direction: &Vector) -> Vector {
    for x in direction.iter() {
        if x.abs() > TOLERANCE {
            return if x < 0.0 {
                direction.negate()
            } else {
                direction.clone()
            };
        }
    }
    direction.clone()
}

fn reflect_point_in_line(point: &Vector, mirror: &Line) -> Vector {
    sub3(&mirror.foot_of(point).scale(2.0), point)
}

fn rotate_xy(rotation: &Matrix, point: &Vector, pivot: &Vector) -> Result<Vector> {
    let offset = Vector::new(vec![
        point.as_slice()[0] - pivot.as_slice()[0],
        point.as_slice()[1] - pivot.as_slice()[1],
    ]);
    let turned = rotation.mul_vector(&offset)?;
    Ok(Vector::new(vec![
        turned.as_slice()[0] + pivot.as_slice()[0],
        turned.as_slice()[1] + pivot.as_slice()[1],
        point.as_slice()[2],
    ]))
}
