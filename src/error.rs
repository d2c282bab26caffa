//! The crate's error taxonomy, per spec.md §6/§7.
use thiserror::Error;

/// All errors surfaced by `polyshell`.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The input was not closed, or had fewer than 3 distinct vertices.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    /// First and last vertex of a would-be polygon differ.
    #[error("line string is not closed")]
    Closure,

    /// Consecutive polylines being merged do not share an endpoint.
    #[error("polylines do not share a seam endpoint")]
    Seam,

    /// A method/mode pairing that is not supported, e.g. RDP + LENGTH.
    #[error("unsupported combination: {0}")]
    UnsupportedCombination(String),

    /// `reduce_auto` and other reserved-but-unbuilt functionality.
    #[error("not implemented: {0}")]
    Unimplemented(String),

    /// A reducer could not proceed on well-formed input. Should never occur;
    /// if raised, it indicates a bug in the reducer, not bad input.
    #[error("reducer failed to converge: {0}")]
    ConvergenceFailure(String),

    /// [`crate::ipq::IndexedPriorityQueue::pop`] called on an empty queue.
    #[error("pop from an empty priority queue")]
    EmptyQueue,
}

pub type Result<T> = std::result::Result<T, Error>;
