//! Crossing-safe Ramer-Douglas-Peucker line reduction.
//!
//! Ported from `examples/original_source/src/polyshell/reducer/rdp/rdp.py`'s
//! `RDPLineString.reduce`: within a `[start, end]` window, points are
//! partitioned into `keep` (non-negative signed loss) and `drop` (negative)
//! by the sign of their triangle area against the window's chord. If the
//! farthest point is within `epsilon`, every `drop` point in the window is
//! spliced out — unless doing so would self-intersect or there is more than
//! one `keep` point, in which case the window is instead split at the
//! highest-scoring `keep` point (`index_keep`) and both halves recurse.
//! Recursion/slicing idiom follows
//! `examples/clbarnes-simples/src/simplify/rdp.rs`'s `rdp_keep_inner`, but
//! operates over shared adjacency-array state rather than owned slices,
//! since accepted drops must update one shared [`SegIndex`].
use log::trace;

use crate::geometry::{Line, Triangle};
use crate::polyline::LineString;
use crate::segindex::SegIndex;
use crate::Precision;

const NONE: i64 = -1;
const DELETED: (i64, i64) = (0, 0);

struct RdpState<'a> {
    points: &'a [crate::geometry::Coord],
    adjacent: Vec<(i64, i64)>,
    tree: SegIndex,
    epsilon: Precision,
}

/// Reduce `line` by Ramer-Douglas-Peucker, never removing a vertex whose
/// removal would make the boundary self-intersect. As with [`crate::reduce::vw`],
/// the first and last points of `line` are never dropped.
pub fn rdp_preserve(line: &LineString, epsilon: Precision) -> LineString {
    let points = line.points();
    let n = points.len();
    if n < 3 || epsilon <= 0.0 {
        return line.clone();
    }

    let adjacent = (0..n as i64)
        .map(|i| {
            (
                if i == 0 { NONE } else { i - 1 },
                if i == n as i64 - 1 { n as i64 } else { i + 1 },
            )
        })
        .collect();

    let mut state = RdpState {
        points,
        adjacent,
        tree: SegIndex::bulk_load(line.lines().collect()),
        epsilon,
    };
    state.reduce(0, n - 1);

    let reduced: Vec<_> = points
        .iter()
        .zip(state.adjacent.iter())
        .filter_map(|(p, adj)| (*adj != DELETED).then_some(*p))
        .collect();
    LineString::new(reduced)
}

impl RdpState<'_> {
    fn reduce(&mut self, start: usize, end: usize) {
        if end - start < 2 {
            return;
        }

        let chord = (self.points[start], self.points[end]);
        let mut keep = Vec::new();
        let mut drop = Vec::new();
        let mut max_score = Precision::NEG_INFINITY;
        let mut index = start + 1;
        let mut max_score_keep = Precision::NEG_INFINITY;
        let mut index_keep = start + 1;

        for i in (start + 1)..end {
            let score = Triangle::new(chord.0, self.points[i], chord.1).signed_area();
            if score >= 0.0 {
                keep.push(i);
            } else {
                drop.push(i);
            }
            if score > max_score_keep {
                max_score_keep = score;
                index_keep = i;
            }
            if score.abs() > max_score {
                max_score = score.abs();
                index = i;
            }
        }

        if max_score <= self.epsilon {
            let mut candidates = vec![start];
            candidates.extend_from_slice(&keep);
            candidates.push(end);

            if keep.len() > 1 || self.crosses_existing(&candidates) {
                self.reduce(start, index_keep + 1);
                self.reduce(index_keep, end);
                return;
            }

            for d in drop {
                let (left, right) = self.adjacent[d];
                let (ll, _) = self.adjacent[left as usize];
                let (_, rr) = self.adjacent[right as usize];
                self.adjacent[left as usize] = (ll, right);
                self.adjacent[right as usize] = (left, rr);
                self.adjacent[d] = DELETED;

                let left_point = self.points[left as usize];
                let right_point = self.points[right as usize];
                self.tree.insert(left_point, right_point);
                trace!("rdp: dropped vertex {d}");
            }
            return;
        }

        self.reduce(start, index + 1);
        self.reduce(index, end);
    }

    /// Whether the chord implied by `candidates` would cross any indexed
    /// segment not already adjacent to it.
    fn crosses_existing(&self, candidates: &[usize]) -> bool {
        candidates.windows(2).any(|w| {
            let p1 = self.points[w[0]];
            let p2 = self.points[w[1]];
            let seg = Line::new(p1, p2);
            let bbox = seg.bbox();
            self.tree.query_bbox(bbox).any(|candidate| {
                let candidate_line = candidate.line();
                !candidate_line.shares_endpoint(&seg)
                    && crate::geometry::segments_intersect(&seg, &candidate_line)
            })
        })
    }
}
