//! Characteristic-shape polygon reduction via Delaunay boundary growth.
//!
//! Ported from `examples/original_source/src/polyshell/reducer/charshape/charshape.py`'s
//! `char_shape`: starting from the polygon's full Delaunay triangulation, the
//! convex-hull edges seed a max-priority queue of boundary edges by length.
//! Popping the longest edge absorbs its triangle into the boundary region
//! (growing inward), provided the triangle's apex isn't already a boundary
//! node and the edge isn't already an original polygon edge (the regularity
//! check) — this keeps the region's boundary simple. `examples/original_source/src/polyshell/Edges.py`
//! was read to cross-check the "reveal two new edges" step
//! (`recompute_boundary`). Triangulation API grounded on
//! `examples/georust-geo/geo/src/algorithm/triangulate_spade.rs`'s
//! `DelaunayTriangulation::<Point2<T>>::new()` / `.insert()` / `.inner_faces()`.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::trace;
use spade::handles::FixedFaceHandle;
use spade::{DelaunayTriangulation, FixedVertexHandle, InsertionError, Point2 as SpadePoint, Triangulation};

use crate::error::Error;
use crate::polyline::Polygon;
use crate::Precision;

type Triangulation2 = DelaunayTriangulation<SpadePoint<Precision>>;
type InnerFace = FixedFaceHandle<spade::handles::InnerTag>;

struct EdgeScore {
    length: Precision,
    face: InnerFace,
    /// Vertex of `face` opposite the scored boundary edge.
    apex: FixedVertexHandle,
}

impl PartialEq for EdgeScore {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
    }
}
impl Eq for EdgeScore {}

impl PartialOrd for EdgeScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeScore {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order: `BinaryHeap` is a max-heap and we want the longest
        // boundary edge first.
        self.length.partial_cmp(&other.length).unwrap_or(Ordering::Equal)
    }
}

/// Reduce `polygon` to its characteristic shape: the boundary is grown
/// inward from the convex hull, absorbing the longest boundary edge at each
/// step, until the boundary edges are all shorter than `epsilon` or no more
/// vertices can be removed without violating the regularity invariant.
pub fn charshape_reduce(polygon: &Polygon, epsilon: Precision) -> Result<Polygon, Error> {
    charshape_reduce_bounded(polygon, epsilon, Precision::INFINITY, None)
}

/// Reduce `polygon` to at most `max_len` boundary vertices, growing inward
/// from the convex hull exactly as [`charshape_reduce`] does but stopping on
/// vertex count rather than edge length (`epsilon = 0`, per spec.md §4.I).
pub fn charshape_reduce_to_length(polygon: &Polygon, max_len: usize) -> Result<Polygon, Error> {
    charshape_reduce_bounded(polygon, 0.0, Precision::INFINITY, Some(max_len))
}

fn charshape_reduce_bounded(
    polygon: &Polygon,
    epsilon: Precision,
    max_loss: Precision,
    max_len: Option<usize>,
) -> Result<Polygon, Error> {
    let points = polygon.as_open().points().to_vec();
    let n = points.len().saturating_sub(1); // exclude the closing repeat
    if n < 3 {
        return Ok(polygon.clone());
    }
    let max_len = max_len.map_or(n, |l| l.clamp(3, n));

    let mut triangulation = Triangulation2::new();
    let mut vertex_to_index: HashMap<FixedVertexHandle, usize> = HashMap::new();
    for (i, p) in points[..n].iter().enumerate() {
        let handle = triangulation
            .insert(SpadePoint::new(p.x, p.y))
            .map_err(|e: InsertionError| {
                Error::ConvergenceFailure(format!("delaunay triangulation failed: {e}"))
            })?;
        vertex_to_index.insert(handle, i);
    }

    let mut boundary_nodes: HashSet<FixedVertexHandle> = HashSet::new();
    let mut pq: BinaryHeap<EdgeScore> = BinaryHeap::new();

    for face in triangulation.inner_faces() {
        for edge in face.adjacent_edges() {
            if edge.rev().is_outer_edge() {
                // Seed with the hull edge's own endpoints; the apex is only
                // added to `boundary_nodes` once its edge is absorbed below.
                boundary_nodes.insert(edge.from().fix());
                boundary_nodes.insert(edge.to().fix());
                let apex = edge.opposite_vertex().expect("inner face has an apex").fix();
                pq.push(EdgeScore {
                    length: edge_length(&triangulation, edge.from().fix(), edge.to().fix()),
                    face: face.fix(),
                    apex,
                });
            }
        }
    }

    let mut loss = 0.0;
    while !pq.is_empty() && boundary_nodes.len() < max_len {
        let largest = pq.pop().unwrap();
        if largest.length < epsilon {
            break;
        }
        loss += largest.length;
        if loss > max_loss {
            break;
        }

        if boundary_nodes.contains(&largest.apex) {
            continue;
        }

        let face = triangulation.face(largest.face);
        let apex_index = vertex_to_index[&largest.apex];

        // An edge that is already an original polygon edge is never the one
        // to absorb through: it would just retrace the existing boundary.
        let mut is_original_edge = false;
        for edge in face.adjacent_edges() {
            if edge.opposite_vertex().map(|v| v.fix()) == Some(largest.apex) {
                let a = vertex_to_index[&edge.from().fix()];
                let b = vertex_to_index[&edge.to().fix()];
                is_original_edge = a.abs_diff(b) == 1;
            }
        }
        if is_original_edge {
            continue;
        }

        boundary_nodes.insert(largest.apex);
        trace!(
            "charshape: absorbed vertex {apex_index} (edge length {})",
            largest.length
        );

        for edge in face.adjacent_edges() {
            if edge.opposite_vertex().map(|v| v.fix()) == Some(largest.apex) {
                continue; // this is the edge just absorbed
            }
            let neighbor_edge = edge.rev();
            if neighbor_edge.is_outer_edge() {
                continue;
            }
            let neighbor_face = neighbor_edge.face().as_inner().expect("checked non-outer above");
            let new_apex = neighbor_edge
                .opposite_vertex()
                .expect("inner face has an apex")
                .fix();
            pq.push(EdgeScore {
                length: edge_length(&triangulation, edge.from().fix(), edge.to().fix()),
                face: neighbor_face.fix(),
                apex: new_apex,
            });
        }
    }

    let mut sorted_nodes: Vec<usize> = boundary_nodes
        .iter()
        .map(|handle| vertex_to_index[handle])
        .collect();
    sorted_nodes.sort_unstable();

    let mut boundary_points: Vec<_> = sorted_nodes.iter().map(|&i| points[i]).collect();
    if let Some(&first) = boundary_points.first() {
        boundary_points.push(first);
    }
    Polygon::new(boundary_points)
}

fn edge_length(
    triangulation: &Triangulation2,
    from: FixedVertexHandle,
    to: FixedVertexHandle,
) -> Precision {
    let a = triangulation.vertex(from).position();
    let b = triangulation.vertex(to).position();
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;

    fn pt(x: f64, y: f64) -> Coord {
        Coord::new(x, y)
    }

    fn square() -> Polygon {
        Polygon::new(vec![
            pt(0.0, 0.0),
            pt(4.0, 0.0),
            pt(4.0, 4.0),
            pt(0.0, 4.0),
            pt(0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn square_is_already_minimal() {
        let reduced = charshape_reduce(&square(), 0.0).unwrap();
        assert_eq!(reduced.n_distinct(), 4);
    }

    #[test]
    fn large_epsilon_keeps_convex_hull_only() {
        // a square with an extra near-midpoint vertex bulging slightly out
        let poly = Polygon::new(vec![
            pt(0.0, 0.0),
            pt(2.0, 0.1),
            pt(4.0, 0.0),
            pt(4.0, 4.0),
            pt(0.0, 4.0),
            pt(0.0, 0.0),
        ])
        .unwrap();
        let reduced = charshape_reduce(&poly, 1000.0).unwrap();
        assert!(reduced.n_distinct() <= poly.n_distinct());
    }
}
