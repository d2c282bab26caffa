//! Melkman's linear-time convex hull of a simple polygon.
use std::collections::VecDeque;

use crate::geometry::{orientation, Coord};
use crate::polyline::Polygon;

/// The convex hull of `polygon`, as a closed CCW sequence of points.
///
/// For `n < 3` the input is returned unchanged, per spec.md §4.E.
pub fn melkman(polygon: &Polygon) -> Vec<Coord> {
    let pts = polygon.points();
    let indices = melkman_indices(polygon);
    indices.into_iter().map(|i| pts[i]).collect()
}

/// The indices (into `polygon`'s vertices) forming the convex hull in CCW
/// order, closed by repeating the first index at the end.
pub fn melkman_indices(polygon: &Polygon) -> Vec<usize> {
    // Distinct vertices only; the closing repeat is not iterated.
    let n = polygon.n_distinct();
    let pts = polygon.points();
    if n < 3 {
        return (0..n).collect();
    }

    let (x, y, z) = (0usize, 1usize, 2usize);
    let mut hull: VecDeque<usize> = if orientation(pts[x], pts[y], pts[z]) > 0 {
        VecDeque::from([z, x, y, z])
    } else {
        VecDeque::from([z, y, x, z])
    };

    for i in 3..n {
        let v = pts[i];
        let front0 = pts[hull[0]];
        let front1 = pts[hull[1]];
        let back0 = pts[hull[hull.len() - 2]];
        let back1 = pts[hull[hull.len() - 1]];
        if orientation(front0, front1, v) > 0 && orientation(back0, back1, v) > 0 {
            // v is left of both the front and back hull edges: already inside.
            continue;
        }

        while orientation(pts[hull[hull.len() - 2]], pts[hull[hull.len() - 1]], v) <= 0 {
            hull.pop_back();
        }
        hull.push_back(i);

        while orientation(v, pts[hull[0]], pts[hull[1]]) <= 0 {
            hull.pop_front();
        }
        hull.push_front(i);
    }

    hull.into_iter().collect()
}
