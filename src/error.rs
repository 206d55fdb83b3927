use thiserror::Error;

/// Error value returned by `RingTracker` operations.
///
/// A failed operation never mutates the tracker.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The tracker was constructed with zero capacity.
    #[error("ring capacity must be at least 1")]
    InvalidCapacity,

    /// A range longer than the whole ring was requested.
    #[error("range of {len} slots does not fit in a ring of {capacity}")]
    OutOfBounds { len: usize, capacity: usize },

    /// Adding would exceed capacity and the tracker is `Saturating`.
    #[error("ring buffer overflow: {requested} slots requested, {available} available")]
    Overflow { requested: usize, available: usize },

    /// More slots were requested than the ring holds.
    #[error("ring buffer underflow: {requested} slots requested, {len} present")]
    Underflow { requested: usize, len: usize },
}
