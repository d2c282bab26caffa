//! A dynamic bounding-box index over line segments.
//!
//! Backed by an R-tree, the same way `geo`'s Visvalingam-Whyatt self-
//! intersection guard indexes the working boundary
//! (`examples/georust-geo/geo/src/algorithm/simplify_vw.rs`'s
//! `tree: RTree<CachedEnvelope<Line<T>>>`), generalised here into its own
//! component since spec.md §4.D specifies it as independent of any one
//! reducer.
use rstar::{RTree, RTreeObject};

use crate::geometry::{Aabb, Coord, Line};

/// A segment stored in a [`SegIndex`], identified by its exact endpoints.
///
/// `delete` removes by this identity, not merely by bounding box, so two
/// distinct segments that happen to share a bbox are never confused with
/// each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedSegment {
    pub p: Coord,
    pub q: Coord,
}

impl IndexedSegment {
    pub fn line(&self) -> Line {
        Line::new(self.p, self.q)
    }
}

impl RTreeObject for IndexedSegment {
    type Envelope = Aabb;

    fn envelope(&self) -> Self::Envelope {
        Line::new(self.p, self.q).bbox()
    }
}

/// Multimap from bounding box to segment, per spec.md §4.D.
#[derive(Default)]
pub struct SegIndex {
    tree: RTree<IndexedSegment>,
}

impl SegIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build an index preloaded with `segments`.
    pub fn bulk_load(segments: Vec<Line>) -> Self {
        let items = segments
            .into_iter()
            .map(|l| IndexedSegment { p: l.p, q: l.q })
            .collect();
        Self {
            tree: RTree::bulk_load(items),
        }
    }

    pub fn insert(&mut self, p: Coord, q: Coord) {
        self.tree.insert(IndexedSegment { p, q });
    }

    /// Remove the segment with exactly these endpoints, if present.
    /// Returns whether a segment was removed.
    pub fn delete(&mut self, p: Coord, q: Coord) -> bool {
        self.tree.remove(&IndexedSegment { p, q }).is_some()
    }

    /// A superset of the segments whose bbox overlaps `bbox`; callers
    /// re-test. No ordering guarantee.
    pub fn query_bbox(&self, bbox: Aabb) -> impl Iterator<Item = &IndexedSegment> {
        self.tree.locate_in_envelope_intersecting(&bbox)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn insert_and_query_finds_overlapping_segment() {
        let mut idx = SegIndex::new();
        idx.insert(pt(0.0, 0.0), pt(1.0, 1.0));
        let bbox = Line::new(pt(0.0, 0.0), pt(1.0, 1.0)).bbox();
        assert_eq!(idx.query_bbox(bbox).count(), 1);
    }

    #[test]
    fn delete_removes_only_the_matching_segment() {
        let mut idx = SegIndex::new();
        // two distinct segments sharing the same bbox
        idx.insert(pt(0.0, 0.0), pt(1.0, 1.0));
        idx.insert(pt(0.0, 1.0), pt(1.0, 0.0));
        assert!(idx.delete(pt(0.0, 0.0), pt(1.0, 1.0)));
        assert_eq!(idx.len(), 1);
        let bbox = Line::new(pt(0.0, 0.0), pt(1.0, 1.0)).bbox();
        let remaining: Vec<_> = idx.query_bbox(bbox).collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].p, pt(0.0, 1.0));
    }

    #[test]
    fn delete_nonexistent_segment_is_noop() {
        let mut idx = SegIndex::new();
        idx.insert(pt(0.0, 0.0), pt(1.0, 1.0));
        assert!(!idx.delete(pt(5.0, 5.0), pt(6.0, 6.0)));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn query_bbox_excludes_far_away_segments() {
        let mut idx = SegIndex::new();
        idx.insert(pt(0.0, 0.0), pt(1.0, 1.0));
        idx.insert(pt(100.0, 100.0), pt(101.0, 101.0));
        let bbox = Line::new(pt(0.0, 0.0), pt(1.0, 1.0)).bbox();
        assert_eq!(idx.query_bbox(bbox).count(), 1);
    }
}
