//! Points, lines, triangles: the primitives every reducer builds on.
use nalgebra::Point2;

use crate::Precision;

/// A point in the plane. Equality is exact on both components.
pub type Coord = Point2<Precision>;

/// The axis-aligned bounding box type shared with [`crate::segindex`].
pub type Aabb = rstar::AABB<[Precision; 2]>;

fn to_array(c: &Coord) -> [Precision; 2] {
    [c.x, c.y]
}

/// The 2D cross product `u.x*v.y - u.y*v.x`.
pub fn cross2(u: Coord, v: Coord) -> Precision {
    u.x * v.y - u.y * v.x
}

/// Twice the signed area of the triangle `(a, b, c)`.
///
/// Positive for CCW triples, negative for CW, zero for collinear.
pub fn signed_area(a: Coord, b: Coord, c: Coord) -> Precision {
    0.5 * cross2(b - a, c - b)
}

/// `+1`, `-1` or `0` depending on the turn direction of `(a, b, c)`.
///
/// Agrees in sign with [`signed_area`]: `+1` for CCW, `-1` for CW.
pub fn orientation(a: Coord, b: Coord, c: Coord) -> i32 {
    let cross = cross2(b - a, c - a);
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

/// An ordered pair of distinct points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p: Coord,
    pub q: Coord,
}

impl Line {
    pub fn new(p: Coord, q: Coord) -> Self {
        Self { p, q }
    }

    pub fn bbox(&self) -> Aabb {
        Aabb::from_corners(to_array(&self.p), to_array(&self.q))
    }

    pub fn length(&self) -> Precision {
        (self.q - self.p).norm()
    }

    /// Whether `self` shares an endpoint with `other`, by exact coordinate equality.
    pub fn shares_endpoint(&self, other: &Line) -> bool {
        self.p == other.p || self.p == other.q || self.q == other.p || self.q == other.q
    }
}

/// Test whether two segments cross at a unique interior-or-boundary point.
///
/// Parallel or collinear segments (`det == 0`) are reported as *not*
/// intersecting: adjacent segments of a polyline always share an endpoint
/// and must never trip this check, per the reducers' self-intersection
/// guard.
pub fn segments_intersect(s: &Line, t: &Line) -> bool {
    let r = s.q - s.p;
    let u = t.q - t.p;
    let d = t.p - s.p;
    let det = cross2(r, u);
    if det == 0.0 {
        return false;
    }
    let lambda = cross2(d, u) / det;
    let mu = cross2(d, r) / det;
    (0.0..=1.0).contains(&lambda) && (0.0..=1.0).contains(&mu)
}

/// An ordered triple of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Coord,
    pub b: Coord,
    pub c: Coord,
}

impl Triangle {
    pub fn new(a: Coord, b: Coord, c: Coord) -> Self {
        Self { a, b, c }
    }

    pub fn signed_area(&self) -> Precision {
        signed_area(self.a, self.b, self.c)
    }

    pub fn unsigned_area(&self) -> Precision {
        self.signed_area().abs()
    }

    pub fn bbox(&self) -> Aabb {
        let xs = [self.a.x, self.b.x, self.c.x];
        let ys = [self.a.y, self.b.y, self.c.y];
        let min = [
            xs.iter().cloned().fold(Precision::INFINITY, Precision::min),
            ys.iter().cloned().fold(Precision::INFINITY, Precision::min),
        ];
        let max = [
            xs.iter()
                .cloned()
                .fold(Precision::NEG_INFINITY, Precision::max),
            ys.iter()
                .cloned()
                .fold(Precision::NEG_INFINITY, Precision::max),
        ];
        Aabb::from_corners(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn signed_area_ccw_positive() {
        let area = signed_area(pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0));
        assert!(area > 0.0);
    }

    #[test]
    fn signed_area_cw_negative() {
        let area = signed_area(pt(0.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0));
        assert!(area < 0.0);
    }

    #[test]
    fn orientation_agrees_with_signed_area_sign() {
        assert_eq!(orientation(pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0)), 1);
        assert_eq!(orientation(pt(0.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0)), -1);
        assert_eq!(orientation(pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)), 0);
    }

    #[test]
    fn collinear_segments_do_not_intersect() {
        let s = Line::new(pt(0.0, 0.0), pt(1.0, 0.0));
        let t = Line::new(pt(1.0, 0.0), pt(2.0, 0.0));
        assert!(!segments_intersect(&s, &t));
    }

    #[test]
    fn crossing_segments_intersect() {
        let s = Line::new(pt(0.0, 0.0), pt(1.0, 1.0));
        let t = Line::new(pt(0.0, 1.0), pt(1.0, 0.0));
        assert!(segments_intersect(&s, &t));
    }

    #[test]
    fn non_crossing_segments_do_not_intersect() {
        let s = Line::new(pt(0.0, 0.0), pt(1.0, 0.0));
        let t = Line::new(pt(0.0, 1.0), pt(1.0, 1.0));
        assert!(!segments_intersect(&s, &t));
    }

    #[test]
    fn shares_endpoint_detects_shared_coordinate() {
        let s = Line::new(pt(0.0, 0.0), pt(1.0, 0.0));
        let t = Line::new(pt(1.0, 0.0), pt(1.0, 1.0));
        assert!(s.shares_endpoint(&t));
    }
}
