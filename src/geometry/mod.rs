pub mod line;
pub mod plane;
pub mod segment;

pub use line::Line;
pub use plane::Plane;
pub use segment::LineSegment;

use crate::algebra::{Matrix, Vector};
use crate::error::Result;

// Internal 3-D vector arithmetic. The primitives guarantee their defining
// vectors are exactly 3-dimensional, so these skip the public dimension
// checks.

pub(crate) fn dot3(a: &Vector, b: &Vector) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub(crate) fn add3(a: &Vector, b: &Vector) -> Vector {
    Vector::new(a.iter().zip(b.iter()).map(|(x, y)| x + y).collect())
}

pub(crate) fn sub3(a: &Vector, b: &Vector) -> Vector {
    Vector::new(a.iter().zip(b.iter()).map(|(x, y)| x - y).collect())
}

pub(crate) fn cross3(a: &Vector, b: &Vector) -> Vector {
    let (a, b) = (a.as_slice(), b.as_slice());
    Vector::new(vec![
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ])
}

/// Parameters `(s, t)` of the mutually closest points of two lines, solved
/// through the matrix kernel as a 2×2 normal-equations system. `None` when
/// the lines are parallel (the system is singular).
pub(crate) fn closest_params(a: &Line, b: &Line) -> Option<(f64, f64)> {
    let d1 = a.direction();
    let d2 = b.direction();
    let gap = sub3(b.anchor(), a.anchor());
    let dd = dot3(d1, d2);
    let system = Matrix::from_rows(vec![vec![dot3(d1, d1), -dd], vec![dd, -dot3(d2, d2)]]).ok()?;
    let rhs = Vector::new(vec![dot3(&gap, d1), dot3(&gap, d2)]);
    let solution = system.inverse().ok()?.mul_vector(&rhs).ok()?;
    Some((solution.get(0)?, solution.get(1)?))
}

/// A geometric object of any of the four kinds the pairwise engine relates.
///
/// This is the polymorphic dispatch surface: every operation matches on the
/// pair of concrete kinds and forwards to the explicit typed implementation,
/// so each combination has a single well-defined meaning.
#[derive(Debug, Clone)]
pub enum GeomObject {
    /// A point in space.
    Point(Vector),
    /// An infinite line.
    Line(Line),
    /// A bounded segment.
    Segment(LineSegment),
    /// An infinite plane.
    Plane(Plane),
}

impl GeomObject {
    /// Wraps a point, padding it to 3-D.
    ///
    /// # Errors
    ///
    /// Returns an error for vectors of more than 3 dimensions.
    pub fn point(v: &Vector) -> Result<Self> {
        Ok(Self::Point(v.to_3d()?))
    }

    /// Minimum distance between the two objects.
    #[must_use]
    pub fn distance_from(&self, other: &Self) -> f64 {
        use GeomObject::{Line, Plane, Point, Segment};
        match (self, other) {
            (Point(a), Point(b)) => sub3(a, b).norm(),
            (Point(p), Line(l)) | (Line(l), Point(p)) => l.dist_to(p),
            (Point(p), Segment(s)) | (Segment(s), Point(p)) => s.dist_to(p),
            (Point(p), Plane(pl)) | (Plane(pl), Point(p)) => pl.dist_to(p),
            (Line(a), Line(b)) => a.distance_from_line(b),
            (Line(l), Segment(s)) | (Segment(s), Line(l)) => l.distance_from_segment(s),
            (Line(l), Plane(p)) | (Plane(p), Line(l)) => p.distance_from_line(l),
            (Segment(a), Segment(b)) => a.distance_from_segment(b),
            (Segment(s), Plane(p)) | (Plane(p), Segment(s)) => p.distance_from_segment(s),
            (Plane(a), Plane(b)) => a.distance_from_plane(b),
        }
    }

    /// True when the two objects share at least one point within tolerance.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        use GeomObject::{Line, Plane, Point, Segment};
        match (self, other) {
            (Point(a), Point(b)) => a.eql(b),
            (Point(p), Line(l)) | (Line(l), Point(p)) => l.contains(p),
            (Point(p), Segment(s)) | (Segment(s), Point(p)) => s.contains(p),
            (Point(p), Plane(pl)) | (Plane(pl), Point(p)) => pl.contains(p),
            (Line(a), Line(b)) => a.intersects_line(b),
            (Line(l), Segment(s)) | (Segment(s), Line(l)) => l.intersects_segment(s),
            (Line(l), Plane(p)) | (Plane(p), Line(l)) => l.intersects_plane(p),
            (Segment(a), Segment(b)) => a.intersects_segment(b),
            (Segment(s), Plane(p)) | (Plane(p), Segment(s)) => s.intersects_plane(p),
            (Plane(a), Plane(b)) => a.intersects_plane(b),
        }
    }

    /// The unique common point (or line, for two planes), when one exists.
    #[must_use]
    pub fn intersection_with(&self, other: &Self) -> Option<Self> {
        use GeomObject::{Line, Plane, Point, Segment};
        let point = |v: Vector| Some(Self::Point(v));
        match (self, other) {
            (Point(a), Point(b)) => a.eql(b).then(|| Self::Point(a.clone())),
            (Point(p), Line(l)) | (Line(l), Point(p)) => {
                l.contains(p).then(|| Self::Point(p.clone()))
            }
            (Point(p), Segment(s)) | (Segment(s), Point(p)) => {
                s.contains(p).then(|| Self::Point(p.clone()))
            }
            (Point(p), Plane(pl)) | (Plane(pl), Point(p)) => {
                pl.contains(p).then(|| Self::Point(p.clone()))
            }
            (Line(a), Line(b)) => a.intersection_with_line(b).and_then(point),
            (Line(l), Segment(s)) | (Segment(s), Line(l)) => {
                l.intersection_with_segment(s).and_then(point)
            }
            (Line(l), Plane(p)) | (Plane(p), Line(l)) => {
                l.intersection_with_plane(p).and_then(point)
            }
            (Segment(a), Segment(b)) => a.intersection_with_segment(b).and_then(point),
            (Segment(s), Plane(p)) | (Plane(p), Segment(s)) => {
                s.intersection_with_plane(p).and_then(point)
            }
            (Plane(a), Plane(b)) => a.intersection_with_plane(b).map(Self::Line),
        }
    }

    /// The point of `self` closest to `other`, when uniquely defined.
    #[must_use]
    pub fn point_closest_to(&self, other: &Self) -> Option<Vector> {
        use GeomObject::{Line, Plane, Point, Segment};
        match (self, other) {
            // A point's only candidate is itself.
            (Point(a), _) => Some(a.clone()),
            (Line(l), Point(p)) => Some(l.foot_of(p)),
            (Line(a), Line(b)) => a.point_closest_to_line(b),
            (Line(l), Segment(s)) => l.point_closest_to_segment(s),
            (Line(l), Plane(p)) => l.point_closest_to_plane(p),
            (Segment(s), Point(p)) => Some(s.clamp_point(&s.line().foot_of(p))),
            (Segment(s), Line(l)) => s.point_closest_to_line(l),
            (Segment(a), Segment(b)) => a.point_closest_to_segment(b),
            (Segment(s), Plane(p)) => s.point_closest_to_plane(p),
            (Plane(p), Point(v)) => Some(p.project(v)),
            (Plane(p), Line(l)) => l.intersection_with_plane(p),
            (Plane(p), Segment(s)) => s
                .point_closest_to_plane(p)
                .map(|on_segment| p.project(&on_segment)),
            (Plane(_), Plane(_)) => None,
        }
    }

    /// True when `self` geometrically contains `other`.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        use GeomObject::{Line, Plane, Point, Segment};
        match (self, other) {
            (Point(a), Point(b)) => a.eql(b),
            (Line(l), Point(p)) => l.contains(p),
            (Line(a), Line(b)) => a.eql(b),
            (Line(l), Segment(s)) => l.contains_segment(s),
            (Segment(s), Point(p)) => s.contains(p),
            (Segment(a), Segment(b)) => a.contains_segment(b),
            (Plane(pl), Point(p)) => pl.contains(p),
            (Plane(p), Line(l)) => p.contains_line(l),
            (Plane(p), Segment(s)) => p.contains_segment(s),
            (Plane(a), Plane(b)) => a.eql(b),
            // A lower-dimensional object never contains a higher-dimensional
            // one.
            _ => false,
        }
    }

    /// True when the two objects' orientations are parallel within
    /// tolerance. Points carry no orientation, so any pair involving a
    /// point answers `false`.
    #[must_use]
    pub fn is_parallel_to(&self, other: &Self) -> bool {
        use GeomObject::{Line, Plane, Point, Segment};
        match (self, other) {
            (Point(_), _) | (_, Point(_)) => false,
            (Line(a), Line(b)) => a.is_parallel_to_line(b),
            (Line(l), Segment(s)) | (Segment(s), Line(l)) => l.is_parallel_to_segment(s),
            (Line(l), Plane(p)) | (Plane(p), Line(l)) => l.is_parallel_to_plane(p),
            (Segment(a), Segment(b)) => a.is_parallel_to_segment(b),
            (Segment(s), Plane(p)) | (Plane(p), Segment(s)) => s.is_parallel_to_plane(p),
            (Plane(a), Plane(b)) => a.is_parallel_to_plane(b),
        }
    }
}
