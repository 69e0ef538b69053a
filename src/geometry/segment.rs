use crate::algebra::{approx_zero, Vector};
use crate::error::Result;

use super::{add3, closest_params, dot3, sub3, Line, Plane};

/// A bounded line segment between two endpoints.
///
/// Unlike [`Line`] it has finite extent; equality ignores orientation (a
/// segment equals its reverse) while [`to_vector`](Self::to_vector) keeps
/// the start→end displacement. The carrier line is rebuilt whenever an
/// endpoint changes, so the endpoints are never coincident.
#[derive(Debug, Clone)]
pub struct LineSegment {
    start: Vector,
    end: Vector,
    line: Line,
}

impl LineSegment {
    /// Creates a segment between two points.
    ///
    /// Inputs of fewer than 3 dimensions are padded with zeros.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoints coincide within tolerance, or
    /// either has more than 3 dimensions.
    pub fn new(start: &Vector, end: &Vector) -> Result<Self> {
        let start = start.to_3d()?;
        let end = end.to_3d()?;
        let line = Line::new(&start, &sub3(&end, &start))?;
        Ok(Self { start, end, line })
    }

    /// The start point.
    #[must_use]
    pub fn start(&self) -> &Vector {
        &self.start
    }

    /// The end point.
    #[must_use]
    pub fn end(&self) -> &Vector {
        &self.end
    }

    /// The infinite carrier line through both endpoints.
    #[must_use]
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Replaces the start point, rebuilding the carrier line.
    ///
    /// # Errors
    ///
    /// Returns an error when the segment would degenerate.
    pub fn set_start(&mut self, start: &Vector) -> Result<()> {
        *self = Self::new(start, &self.end)?;
        Ok(())
    }

    /// Replaces the end point, rebuilding the carrier line.
    ///
    /// # Errors
    ///
    /// Returns an error when the segment would degenerate.
    pub fn set_end(&mut self, end: &Vector) -> Result<()> {
        *self = Self::new(&self.start, end)?;
        Ok(())
    }

    /// The start→end displacement (orientation-sensitive).
    #[must_use]
    pub fn to_vector(&self) -> Vector {
        sub3(&self.end, &self.start)
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.to_vector().norm()
    }

    /// The point halfway between the endpoints.
    #[must_use]
    pub fn midpoint(&self) -> Vector {
        add3(&self.start, &self.end).scale(0.5)
    }

    /// The plane through the midpoint, perpendicular to the segment.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed segment; the signature follows the
    /// plane constructor.
    pub fn bisecting_plane(&self) -> Result<Plane> {
        Plane::new(&self.midpoint(), &self.to_vector())
    }

    /// Tolerance equality, in either orientation.
    #[must_use]
    pub fn eql(&self, other: &Self) -> bool {
        (self.start.eql(&other.start) && self.end.eql(&other.end))
            || (self.start.eql(&other.end) && self.end.eql(&other.start))
    }

    /// Returns the segment shifted by `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error for offsets of more than 3 dimensions.
    pub fn translate(&self, offset: &Vector) -> Result<Self> {
        let offset = offset.to_3d()?;
        Self::new(&add3(&self.start, &offset), &add3(&self.end, &offset))
    }

    // ── containment & parallelism ──

    /// True when `point` lies on the segment (endpoints inclusive).
    #[must_use]
    pub fn contains(&self, point: &Vector) -> bool {
        point.to_3d().is_ok_and(|p| approx_zero(self.dist_to(&p)))
    }

    /// True when both of the other segment's endpoints lie on this one.
    #[must_use]
    pub fn contains_segment(&self, other: &Self) -> bool {
        self.contains(&other.start) && self.contains(&other.end)
    }

    /// True when the carriers are parallel.
    #[must_use]
    pub fn is_parallel_to_segment(&self, other: &Self) -> bool {
        self.line.is_parallel_to_line(&other.line)
    }

    /// True when the carrier is parallel to the line.
    #[must_use]
    pub fn is_parallel_to_line(&self, line: &Line) -> bool {
        self.line.is_parallel_to_line(line)
    }

    /// True when the carrier is parallel to the plane.
    #[must_use]
    pub fn is_parallel_to_plane(&self, plane: &Plane) -> bool {
        self.line.is_parallel_to_plane(plane)
    }

    // ── distances ──

    /// Projects a (3-D) point on the carrier and clamps the parameter into
    /// the closed interval [0, 1].
    pub(crate) fn clamp_point(&self, point: &Vector) -> Vector {
        let span = self.to_vector();
        let len_sq = dot3(&span, &span);
        let t = (dot3(&sub3(point, &self.start), &span) / len_sq).clamp(0.0, 1.0);
        add3(&self.start, &span.scale(t))
    }

    /// Distance from a (3-D) point: perpendicular when the projection falls
    /// inside the segment, else the nearer endpoint.
    pub(crate) fn dist_to(&self, point: &Vector) -> f64 {
        sub3(point, &self.clamp_point(point)).norm()
    }

    /// Distance from a point.
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn distance_from_point(&self, point: &Vector) -> Result<f64> {
        Ok(self.dist_to(&point.to_3d()?))
    }

    /// Distance from an infinite line.
    #[must_use]
    pub fn distance_from_line(&self, line: &Line) -> f64 {
        line.distance_from_segment(self)
    }

    /// Distance from a plane: zero when the segment crosses it, else the
    /// nearer endpoint's offset.
    #[must_use]
    pub fn distance_from_plane(&self, plane: &Plane) -> f64 {
        plane.distance_from_segment(self)
    }

    /// Minimum distance between two bounded segments (zero when they
    /// cross): the minimum over the clamped endpoint candidates and, for
    /// skew carriers, the clamped feet of the common perpendicular.
    #[must_use]
    pub fn distance_from_segment(&self, other: &Self) -> f64 {
        if self.intersects_segment(other) {
            return 0.0;
        }
        let mut candidates = vec![
            self.dist_to(&other.start),
            self.dist_to(&other.end),
            other.dist_to(&self.start),
            other.dist_to(&self.end),
        ];
        if let Some((s, t)) = closest_params(&self.line, &other.line) {
            candidates.push(other.dist_to(&self.clamp_point(&self.line.point_at(s))));
            candidates.push(self.dist_to(&other.clamp_point(&other.line.point_at(t))));
        }
        candidates.into_iter().fold(f64::INFINITY, f64::min)
    }

    // ── intersection ──

    /// The common point with an infinite line, when the carrier solution
    /// lands inside the segment.
    #[must_use]
    pub fn intersection_with_line(&self, line: &Line) -> Option<Vector> {
        let p = self.line.intersection_with_line(line)?;
        self.contains(&p).then_some(p)
    }

    /// The point where the segment crosses a plane, when the carrier
    /// solution lands inside the segment.
    #[must_use]
    pub fn intersection_with_plane(&self, plane: &Plane) -> Option<Vector> {
        let p = self.line.intersection_with_plane(plane)?;
        self.contains(&p).then_some(p)
    }

    /// The common point of two bounded segments: the carrier solution must
    /// land inside both (endpoints inclusive).
    #[must_use]
    pub fn intersection_with_segment(&self, other: &Self) -> Option<Vector> {
        let p = self.line.intersection_with_line(&other.line)?;
        (self.contains(&p) && other.contains(&p)).then_some(p)
    }

    /// True when the segment shares at least one point with the line,
    /// including lying along it (where no unique crossing point exists).
    #[must_use]
    pub fn intersects_line(&self, line: &Line) -> bool {
        self.intersection_with_line(line).is_some() || line.contains_segment(self)
    }

    /// True when the segment shares at least one point with the plane,
    /// including lying inside it.
    #[must_use]
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        self.intersection_with_plane(plane).is_some() || plane.contains_segment(self)
    }

    /// True when the two segments share at least one point. Collinear
    /// overlapping segments intersect even though the carrier solve has no
    /// unique answer for them.
    #[must_use]
    pub fn intersects_segment(&self, other: &Self) -> bool {
        self.intersection_with_segment(other).is_some()
            || self.contains(&other.start)
            || self.contains(&other.end)
            || other.contains(&self.start)
            || other.contains(&self.end)
    }

    // ── closest points ──

    /// The point of the segment closest to `point` (the carrier's foot,
    /// clamped).
    ///
    /// # Errors
    ///
    /// Returns an error for points of more than 3 dimensions.
    pub fn point_closest_to_point(&self, point: &Vector) -> Result<Vector> {
        Ok(self.clamp_point(&point.to_3d()?))
    }

    /// The point of the segment closest to a line. `None` when the carrier
    /// is parallel to it (no unique closest point).
    #[must_use]
    pub fn point_closest_to_line(&self, line: &Line) -> Option<Vector> {
        let (s, _) = closest_params(&self.line, line)?;
        Some(self.clamp_point(&self.line.point_at(s)))
    }

    /// The point of the segment closest to a plane: the crossing point when
    /// the segment intersects it, else the nearer endpoint. `None` when the
    /// carrier is parallel to the plane.
    #[must_use]
    pub fn point_closest_to_plane(&self, plane: &Plane) -> Option<Vector> {
        if self.is_parallel_to_plane(plane) {
            return None;
        }
        if let Some(p) = self.intersection_with_plane(plane) {
            return Some(p);
        }
        if plane.dist_to(&self.start) <= plane.dist_to(&self.end) {
            Some(self.start.clone())
        } else {
            Some(self.end.clone())
        }
    }

    /// The point of this segment closest to another segment.
    #[must_use]
    pub fn point_closest_to_segment(&self, other: &Self) -> Option<Vector> {
        if let Some(p) = self.intersection_with_segment(other) {
            return Some(p);
        }
        // Candidates: clamped feet of the other's endpoints, plus the
        // clamped common-perpendicular foot when the carriers are not
        // parallel. Pick the one nearest to the other segment.
        let mut candidates = vec![
            self.clamp_point(&other.start),
            self.clamp_point(&other.end),
        ];
        if let Some((s, _)) = closest_params(&self.line, &other.line) {
            candidates.push(self.clamp_point(&self.line.point_at(s)));
        }
        candidates
            .into_iter()
            .min_by(|a, b| other.dist_to(a).total_cmp(&other.dist_to(b)))
    }

    // ── transforms ──

    /// Reflection through a point.
    ///
    /// # Errors
    ///
    /// Returns an error for mirrors of more than 3 dimensions.
    pub fn reflect_in_point(&self, mirror: &Vector) -> Result<Self> {
        let m = mirror.to_3d()?;
        Self::new(
            &sub3(&m.scale(2.0), &self.start),
            &sub3(&m.scale(2.0), &self.end),
        )
    }

    /// Reflection across a mirror line.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed segment.
    pub fn reflect_in_line(&self, mirror: &Line) -> Result<Self> {
        let reflect = |p: &Vector| sub3(&mirror.foot_of(p).scale(2.0), p);
        Self::new(&reflect(&self.start), &reflect(&self.end))
    }

    /// Reflection across a plane.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed segment.
    pub fn reflect_in_plane(&self, mirror: &Plane) -> Result<Self> {
        Self::new(
            &mirror.reflect_point(&self.start),
            &mirror.reflect_point(&self.end),
        )
    }

    /// Rotation about an axis line.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed segment and axis.
    pub fn rotate(&self, theta: f64, axis: &Line) -> Result<Self> {
        let start = self.start.rotate_3d(theta, axis)?;
        let end = self.end.rotate_3d(theta, axis)?;
        Self::new(&start, &end)
    }
}
