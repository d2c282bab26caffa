//! Reduce a simple polygon to fewer vertices while guaranteeing the original
//! is strictly contained within the result and the result stays simple.
//!
//! Three reducers are available, dispatched through [`reduce::reduce`]:
//! Visvalingam-Whyatt ([`reduce::vw`]), Ramer-Douglas-Peucker
//! ([`reduce::rdp`]), and a Delaunay-based characteristic shape
//! ([`reduce::charshape`]). All three split the boundary at its convex-hull
//! vertices ([`hull::melkman_indices`]) and reduce each leg independently, so
//! the output can never cross back inside the input.
//!
//! Only non-negative-area vertices are ever dropped (see [`reduce::vw`] and
//! [`reduce::rdp`]), and dropping one always removes exactly that vertex's
//! triangle from the enclosed area — never adds to it. The output is
//! therefore always inscribed in the input: every point of the reduced
//! polygon's boundary lies in the closed region of the original.
pub use nalgebra;
pub use nalgebra::Point2;

pub mod error;
pub mod geometry;
pub mod hull;
pub mod ipq;
pub mod polyline;
pub mod reduce;
pub mod segindex;

pub type Precision = f64;

pub use error::Error;
pub use hull::{melkman, melkman_indices};
pub use polyline::{LineString, Polygon};
pub use reduce::{reduce, Method, Mode, Params};

#[cfg(test)]
mod test_utils {
    use crate::geometry::Coord;

    pub fn make_ring(arrs: Vec<[f64; 2]>) -> Vec<Coord> {
        let mut points: Vec<Coord> = arrs.into_iter().map(Coord::from).collect();
        if points.first() != points.last() {
            let first = points[0];
            points.push(first);
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::{Method, Mode, Params};
    use test_utils::make_ring;

    #[test]
    fn already_minimal_square_is_unchanged_by_any_method() {
        let square = Polygon::new(make_ring(vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
        ]))
        .unwrap();

        for method in [Method::Vw, Method::Rdp, Method::CharShape] {
            let reduced = reduce(&square, method, Mode::Epsilon, Params::Epsilon(0.01)).unwrap();
            assert_eq!(reduced.n_distinct(), 4);
        }
    }

    #[test]
    fn mid_edge_point_is_removed() {
        // a square with one extra, nearly-collinear point bulging outward
        // (away from the interior) on an edge; a point bulging inward would
        // be a reflex vertex and never eligible for removal.
        let poly = Polygon::new(make_ring(vec![
            [0.0, 0.0],
            [0.5, -0.001],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
        ]))
        .unwrap();

        let reduced = reduce(&poly, Method::Vw, Mode::Epsilon, Params::Epsilon(0.01)).unwrap();
        assert_eq!(reduced.n_distinct(), 4);
    }

    #[test]
    fn a_reflex_vertex_is_never_removed() {
        // a square with a deep notch cut into one edge
        let poly = Polygon::new(make_ring(vec![
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 2.0],
            [1.0, 2.0],
            [1.0, 0.5], // reflex vertex of the notch
            [0.0, 2.0],
        ]))
        .unwrap();

        let reduced = reduce(&poly, Method::Vw, Mode::Epsilon, Params::Epsilon(1000.0)).unwrap();
        assert!(reduced
            .points()
            .iter()
            .any(|p| *p == nalgebra::Point2::new(1.0, 0.5)));
    }

    #[test]
    fn output_never_self_intersects() {
        // an interlocking "teeth" boundary where a naive reduction would cross itself
        let poly = Polygon::new(make_ring(vec![
            [0.0, 0.0],
            [1.0, 1.0],
            [2.0, 0.0],
            [3.0, 1.0],
            [4.0, 0.0],
            [4.0, 5.0],
            [0.0, 5.0],
        ]))
        .unwrap();

        for method in [Method::Vw, Method::Rdp] {
            let reduced = reduce(&poly, method, Mode::Epsilon, Params::Epsilon(1000.0)).unwrap();
            let lines: Vec<_> = reduced.lines().collect();
            for (i, a) in lines.iter().enumerate() {
                for (j, b) in lines.iter().enumerate() {
                    let wraps = (i == 0 && j == lines.len() - 1) || (j == 0 && i == lines.len() - 1);
                    if i.abs_diff(j) <= 1 || wraps {
                        continue;
                    }
                    assert!(!geometry::segments_intersect(a, b));
                }
            }
        }
    }

    #[test]
    fn circle_reduces_monotonically_as_epsilon_grows() {
        let n = 200;
        let points = make_ring(
            (0..n)
                .map(|i| {
                    let theta = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
                    [theta.cos(), theta.sin()]
                })
                .collect(),
        );
        let circle = Polygon::new(points).unwrap();

        let mut prev_len = circle.n_distinct();
        for epsilon in [0.0001, 0.001, 0.01, 0.05, 0.1] {
            let reduced = reduce(&circle, Method::Vw, Mode::Epsilon, Params::Epsilon(epsilon)).unwrap();
            assert!(reduced.n_distinct() <= prev_len);
            prev_len = reduced.n_distinct();
        }
    }

    #[test]
    fn reduce_to_length_hits_the_target() {
        let n = 100;
        let points = make_ring(
            (0..n)
                .map(|i| {
                    let theta = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
                    [theta.cos(), theta.sin()]
                })
                .collect(),
        );
        let circle = Polygon::new(points).unwrap();

        let reduced = reduce(&circle, Method::Vw, Mode::Length, Params::Length(10)).unwrap();
        assert_eq!(reduced.n_distinct(), 10);
    }
}
