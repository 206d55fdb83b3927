//! Behavior semantics for `RingTracker`.

/// Runtime view of a tracker's overflow behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverflowPolicy {
    /// Adding to a full ring fails with [`Error::Overflow`](crate::Error::Overflow).
    Reject,
    /// Adding to a full ring silently discards elements from the opposite end.
    Evict,
}

/// Tagging trait for providing behaviors to `RingTracker`.
pub trait Behavior {
    #[doc(hidden)]
    const POLICY: OverflowPolicy;
}

/// Behavior for `RingTracker` that specifies wrapping write semantics.
///
/// ### Adding to head:
///
/// Adding slots to the **head** of a tracker that **has already reached its capacity**
/// causes it to **evict** the oldest slots from the **tail**.
///
/// ### Adding to tail:
///
/// Adding slots to the **tail** of a tracker that **has already reached its capacity**
/// causes it to **evict** the newest slots from the **head**.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wrapping;
impl Behavior for Wrapping {
    const POLICY: OverflowPolicy = OverflowPolicy::Evict;
}

/// Behavior for `RingTracker` that specifies saturating write semantics.
///
/// ### Adding to head:
///
/// Adding slots to the **head** of a tracker that **has already reached its capacity**
/// causes it to **fail with `Error::Overflow`, without performing any mutation**.
///
/// ### Adding to tail:
///
/// Adding slots to the **tail** of a tracker that **has already reached its capacity**
/// causes it to **fail with `Error::Overflow`, without performing any mutation**.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Saturating;
impl Behavior for Saturating {
    const POLICY: OverflowPolicy = OverflowPolicy::Reject;
}
