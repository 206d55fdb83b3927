//! Index arithmetic for a fixed-capacity ring buffer.
//!
//! `RingTracker` owns no storage. The caller allocates a flat array of
//! `capacity` slots and the tracker hands out the absolute offsets to read
//! or write, splitting any access that wraps around the end of the array
//! into at most two contiguous segments. Copying elements in and out stays
//! with the caller, so no access ever needs a temporary contiguous buffer.
//!
//! Every slot of the array is usable: `head == tail` is disambiguated
//! between empty and full by an explicit occupied flag instead of keeping
//! one slot in reserve.
//!
//! # Feature Flags
//! The **ringtracker** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd and implement `std::error::Error` for [`Error`]
//!
//! Without `std` the crate is `#![no_std]`:
//!
//! ```toml
//! [dependencies]
//! ringtracker = { version = "0.1", default-features = false }
//! ```
//!
//! # Behaviors
//!
//! What happens when an add would exceed capacity is fixed for the life of
//! the tracker by its behavior type parameter:
//!
//! - [`Saturating`] (the default) fails with [`Error::Overflow`] and leaves
//!   the tracker untouched, making it a strict bounded queue.
//! - [`Wrapping`] silently moves the opposite pointer, discarding the
//!   elements at the far end, making it a lossy ring.
//!
//! # Examples
//! ```
//! use ringtracker::{RingTracker, Wrapping};
//!
//! let mut ring: RingTracker<Wrapping> = RingTracker::new(8).unwrap();
//! let mut buffer = [0u8; 8];
//!
//! buffer[ring.add_to_head().unwrap()] = 1;
//! buffer[ring.add_to_tail().unwrap()] = 0;
//!
//! let src = [2, 3, 4, 5, 6, 7];
//! for seg in ring.add_range_to_head(src.len()).unwrap() {
//!     buffer[seg.absolute()].copy_from_slice(&src[seg.relative()]);
//! }
//! assert_eq!(ring.len(), 8);
//!
//! let mut dst = [0u8; 8];
//! for seg in ring.remove_range_from_tail(8).unwrap() {
//!     dst[seg.relative()].copy_from_slice(&buffer[seg.absolute()]);
//! }
//! assert_eq!(dst, [0, 1, 2, 3, 4, 5, 6, 7]);
//! assert!(ring.is_empty());
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate odds;

use core::fmt;
use core::marker::PhantomData;

use log::{debug, trace};

mod behavior;
pub mod error;
mod range;
mod slots;
mod utils;

pub use behavior::{Behavior, OverflowPolicy, Saturating, Wrapping};
pub use error::Error;
pub use odds::IndexRange as RangeArgument;
pub use range::{Segment, SplitRange};
pub use slots::Slots;

use utils::*;

/// Head/tail bookkeeping for a caller-owned ring of `capacity` slots.
///
/// Slots `[tail, head)` (wrapping) are occupied. `head` is the next slot a
/// head-side add claims; `tail` is the oldest occupied slot.
///
/// The tracker is a plain value with no internal synchronization. Share it
/// across threads only behind the caller's own lock.
pub struct RingTracker<B: Behavior = Saturating> {
    capacity: usize,
    head: usize,
    tail: usize,
    // Sole disambiguator of `head == tail`.
    occupied: bool,
    marker: PhantomData<B>,
}

impl<B: Behavior> RingTracker<B> {
    /// Creates an empty tracker for a backing array of `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringtracker::{Error, RingTracker};
    ///
    /// let ring: RingTracker = RingTracker::new(16).unwrap();
    /// assert_eq!(ring.capacity(), 16);
    ///
    /// assert_eq!(RingTracker::<ringtracker::Wrapping>::new(0).unwrap_err(), Error::InvalidCapacity);
    /// ```
    pub fn new(capacity: usize) -> Result<RingTracker<B>, Error> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        debug!("new ring tracker: capacity {}, policy {:?}", capacity, B::POLICY);
        Ok(RingTracker {
            capacity,
            head: 0,
            tail: 0,
            occupied: false,
            marker: PhantomData,
        })
    }

    /// Number of slots in the backing array.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The overflow policy selected by `B`.
    #[inline]
    pub fn policy(&self) -> OverflowPolicy {
        B::POLICY
    }

    /// Returns the number of occupied slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringtracker::RingTracker;
    ///
    /// let mut ring: RingTracker = RingTracker::new(3).unwrap();
    /// assert_eq!(ring.len(), 0);
    /// ring.add_range_to_head(3).unwrap();
    /// assert_eq!(ring.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        count(self.tail, self.head, self.occupied, self.capacity)
    }

    /// Returns `true` if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.occupied
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied && self.head == self.tail
    }

    /// Number of slots that can be added before the ring is full.
    #[inline]
    pub fn available(&self) -> usize {
        self.capacity - self.len()
    }

    /// The oldest occupied slot. Meaningless while the ring is empty.
    #[inline]
    pub fn tail_index(&self) -> usize {
        self.tail
    }

    /// The first free slot past the newest occupied one.
    #[inline]
    pub fn head_index(&self) -> usize {
        self.head
    }

    /// Absolute slot of the `i`-th element counted back from the newest;
    /// `offset_from_head(0)` is the newest element.
    ///
    /// `i` must be less than [`len`](Self::len). This is only checked in
    /// debug builds; otherwise an out-of-range `i` yields an in-bounds but
    /// meaningless slot.
    #[inline]
    pub fn offset_from_head(&self, i: usize) -> usize {
        debug_assert!(i < self.len(), "offset {} out of ring of length {}", i, self.len());
        wrap_sub(self.head, (i + 1) % self.capacity, self.capacity)
    }

    /// Absolute slot of the `i`-th element counted forward from the oldest.
    ///
    /// Same precondition as [`offset_from_head`](Self::offset_from_head).
    #[inline]
    pub fn offset_from_tail(&self, i: usize) -> usize {
        debug_assert!(i < self.len(), "offset {} out of ring of length {}", i, self.len());
        wrap_add(self.tail, i % self.capacity, self.capacity)
    }

    /// Rotates `start` by `delta` slots, normalized into `[0, capacity)`.
    ///
    /// `start` must be a valid slot and `|delta|` at most `capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringtracker::RingTracker;
    ///
    /// let ring: RingTracker = RingTracker::new(5).unwrap();
    /// assert_eq!(ring.shift(4, 1), 0);
    /// assert_eq!(ring.shift(0, -1), 4);
    /// assert_eq!(ring.shift(2, 5), 2);
    /// ```
    #[inline]
    pub fn shift(&self, start: usize, delta: isize) -> usize {
        let magnitude = delta.unsigned_abs();
        if delta < 0 {
            wrap_sub(start, magnitude, self.capacity)
        } else {
            wrap_add(start, magnitude, self.capacity)
        }
    }

    /// Describes `len` slots starting at absolute slot `start`, split where
    /// they cross the end of the array, and the slot one past their end.
    ///
    /// `start` must be a valid slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `len` exceeds the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringtracker::RingTracker;
    ///
    /// let ring: RingTracker = RingTracker::new(8).unwrap();
    /// let (range, next) = ring.compute_range(6, 5).unwrap();
    /// assert_eq!(range.first().absolute(), 6..8);
    /// assert_eq!(range.second().absolute(), 0..3);
    /// assert_eq!(range.second().relative(), 2..5);
    /// assert_eq!(next, 3);
    /// ```
    pub fn compute_range(&self, start: usize, len: usize) -> Result<(SplitRange, usize), Error> {
        self.check_bounds(len)?;
        Ok(SplitRange::split(start, len, self.capacity))
    }

    /// Range of the newest `n` elements, without removing them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if fewer than `n` elements are present.
    pub fn peek_head(&self, n: usize) -> Result<SplitRange, Error> {
        self.check_len(n)?;
        Ok(SplitRange::split(wrap_sub(self.head, n, self.capacity), n, self.capacity).0)
    }

    /// Range of the oldest `n` elements, without removing them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if fewer than `n` elements are present.
    pub fn peek_tail(&self, n: usize) -> Result<SplitRange, Error> {
        self.check_len(n)?;
        Ok(SplitRange::split(self.tail, n, self.capacity).0)
    }

    /// Range of the elements at logical positions `range`, counted from the
    /// oldest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the range ends past [`len`](Self::len).
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringtracker::RingTracker;
    ///
    /// let mut ring: RingTracker = RingTracker::new(4).unwrap();
    /// ring.add_range_to_head(3).unwrap();
    /// ring.remove_range_from_tail(2).unwrap();
    /// ring.add_range_to_head(3).unwrap();
    ///
    /// // occupied: 2, 3, 0, 1
    /// let range = ring.view(1..3).unwrap();
    /// assert_eq!(range.first().absolute(), 3..4);
    /// assert_eq!(range.second().absolute(), 0..1);
    /// assert_eq!(ring.view(..).unwrap().len(), 4);
    /// ```
    pub fn view<R>(&self, range: R) -> Result<SplitRange, Error>
        where R: RangeArgument<usize>
    {
        let len = self.len();
        let start = range.start().unwrap_or(0);
        let end = range.end().unwrap_or(len);
        assert!(start <= end, "view lower bound was too large");
        if end > len {
            return Err(Error::Underflow { requested: end, len });
        }

        let first = wrap_add(self.tail, start, self.capacity);
        Ok(SplitRange::split(first, end - start, self.capacity).0)
    }

    /// Iterates over the absolute indices of the occupied slots, oldest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringtracker::RingTracker;
    ///
    /// let mut ring: RingTracker = RingTracker::new(4).unwrap();
    /// ring.add_to_head().unwrap();
    /// ring.add_to_tail().unwrap();
    /// assert!(ring.slots().eq([3, 0]));
    /// ```
    #[inline]
    pub fn slots(&self) -> Slots {
        Slots::new(self.tail, self.len(), self.capacity)
    }

    /// Forgets every occupied slot and rewinds both pointers to slot 0.
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.occupied = false;
    }

    /// Claims the slot at the head and returns it.
    ///
    /// # Errors
    ///
    /// On a full `Saturating` tracker returns [`Error::Overflow`]. A full
    /// `Wrapping` tracker instead drops its oldest element and hands out
    /// that slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringtracker::{RingTracker, Wrapping};
    ///
    /// let mut ring: RingTracker<Wrapping> = RingTracker::new(2).unwrap();
    /// assert_eq!(ring.add_to_head(), Ok(0));
    /// assert_eq!(ring.add_to_head(), Ok(1));
    /// assert_eq!(ring.add_to_head(), Ok(0));
    /// assert_eq!(ring.tail_index(), 1);
    /// ```
    pub fn add_to_head(&mut self) -> Result<usize, Error> {
        let slot = self.head;
        if self.is_full() {
            self.overflow(1, "tail")?;
            self.head = wrap_add(self.head, 1, self.capacity);
            self.tail = self.head;
        } else {
            self.head = wrap_add(self.head, 1, self.capacity);
        }
        self.occupied = true;
        Ok(slot)
    }

    /// Claims the slot just before the tail and returns it.
    ///
    /// # Errors
    ///
    /// On a full `Saturating` tracker returns [`Error::Overflow`]. A full
    /// `Wrapping` tracker instead drops its newest element and hands out
    /// that slot.
    pub fn add_to_tail(&mut self) -> Result<usize, Error> {
        if self.is_full() {
            self.overflow(1, "head")?;
            self.tail = wrap_sub(self.tail, 1, self.capacity);
            self.head = self.tail;
        } else {
            self.tail = wrap_sub(self.tail, 1, self.capacity);
        }
        self.occupied = true;
        Ok(self.tail)
    }

    /// Releases the newest element and returns the slot it occupied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the ring is empty.
    pub fn remove_from_head(&mut self) -> Result<usize, Error> {
        self.check_len(1)?;
        self.head = wrap_sub(self.head, 1, self.capacity);
        if self.head == self.tail {
            self.occupied = false;
        }
        Ok(self.head)
    }

    /// Releases the oldest element and returns the slot it occupied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the ring is empty.
    pub fn remove_from_tail(&mut self) -> Result<usize, Error> {
        self.check_len(1)?;
        let slot = self.tail;
        self.tail = wrap_add(self.tail, 1, self.capacity);
        if self.head == self.tail {
            self.occupied = false;
        }
        Ok(slot)
    }

    /// Claims `n` slots at the head and returns where to write them.
    ///
    /// Adding zero slots leaves the tracker unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `n` exceeds the capacity, and
    /// [`Error::Overflow`] if a `Saturating` tracker has fewer than `n` free
    /// slots. A `Wrapping` tracker instead drops as many of its oldest
    /// elements as needed.
    pub fn add_range_to_head(&mut self, n: usize) -> Result<SplitRange, Error> {
        let (range, next) = self.compute_range(self.head, n)?;
        if n == 0 {
            return Ok(range);
        }
        if n > self.available() {
            self.overflow(n, "tail")?;
            self.tail = next;
        }
        self.head = next;
        self.occupied = true;
        Ok(range)
    }

    /// Releases the newest `n` elements and returns where they were.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if fewer than `n` elements are present.
    pub fn remove_range_from_head(&mut self, n: usize) -> Result<SplitRange, Error> {
        let len = self.check_len(n)?;
        let head = wrap_sub(self.head, n, self.capacity);
        let (range, _) = SplitRange::split(head, n, self.capacity);
        if n == 0 {
            return Ok(range);
        }
        self.head = head;
        self.occupied = len > n;
        Ok(range)
    }

    /// Claims `n` slots before the tail and returns where to write them.
    ///
    /// Adding zero slots leaves the tracker unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `n` exceeds the capacity, and
    /// [`Error::Overflow`] if a `Saturating` tracker has fewer than `n` free
    /// slots. A `Wrapping` tracker instead drops as many of its newest
    /// elements as needed.
    pub fn add_range_to_tail(&mut self, n: usize) -> Result<SplitRange, Error> {
        self.check_bounds(n)?;
        let start = wrap_sub(self.tail, n, self.capacity);
        let (range, _) = SplitRange::split(start, n, self.capacity);
        if n == 0 {
            return Ok(range);
        }
        if n > self.available() {
            self.overflow(n, "head")?;
            self.head = start;
        }
        self.tail = start;
        self.occupied = true;
        Ok(range)
    }

    /// Releases the oldest `n` elements and returns where they were.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if fewer than `n` elements are present.
    pub fn remove_range_from_tail(&mut self, n: usize) -> Result<SplitRange, Error> {
        let len = self.check_len(n)?;
        let (range, next) = SplitRange::split(self.tail, n, self.capacity);
        if n == 0 {
            return Ok(range);
        }
        self.tail = next;
        self.occupied = len > n;
        Ok(range)
    }

    #[inline]
    fn check_bounds(&self, len: usize) -> Result<(), Error> {
        if len > self.capacity {
            return Err(Error::OutOfBounds { len, capacity: self.capacity });
        }
        Ok(())
    }

    /// Returns the current length if at least `requested` elements are present.
    #[inline]
    fn check_len(&self, requested: usize) -> Result<usize, Error> {
        let len = self.len();
        if requested > len {
            return Err(Error::Underflow { requested, len });
        }
        Ok(len)
    }

    /// Decides whether an add of `requested` slots that does not fit may
    /// proceed by evicting from `victim`.
    fn overflow(&self, requested: usize, victim: &str) -> Result<(), Error> {
        let available = self.available();
        match B::POLICY {
            OverflowPolicy::Reject => Err(Error::Overflow { requested, available }),
            OverflowPolicy::Evict => {
                trace!("ring full, evicting {} slot(s) from the {}", requested - available, victim);
                Ok(())
            }
        }
    }

    fn into_behavior<C: Behavior>(self) -> RingTracker<C> {
        debug!("ring tracker policy {:?} -> {:?}", B::POLICY, C::POLICY);
        RingTracker {
            capacity: self.capacity,
            head: self.head,
            tail: self.tail,
            occupied: self.occupied,
            marker: PhantomData,
        }
    }
}

impl RingTracker<Saturating> {
    /// Converts into a `Wrapping` tracker over the same slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringtracker::{Error, RingTracker};
    ///
    /// let mut ring: RingTracker = RingTracker::new(2).unwrap();
    /// ring.add_range_to_head(2).unwrap();
    /// assert!(matches!(ring.add_to_head(), Err(Error::Overflow { .. })));
    ///
    /// let mut ring = ring.wrapping();
    /// assert_eq!(ring.add_to_head(), Ok(0));
    /// assert_eq!(ring.len(), 2);
    /// ```
    pub fn wrapping(self) -> RingTracker<Wrapping> {
        self.into_behavior()
    }
}

impl RingTracker<Wrapping> {
    /// Converts into a `Saturating` tracker over the same slots.
    pub fn saturating(self) -> RingTracker<Saturating> {
        self.into_behavior()
    }
}

impl<B: Behavior> Clone for RingTracker<B> {
    fn clone(&self) -> RingTracker<B> {
        RingTracker {
            capacity: self.capacity,
            head: self.head,
            tail: self.tail,
            occupied: self.occupied,
            marker: PhantomData,
        }
    }
}

impl<B: Behavior> PartialEq for RingTracker<B> {
    fn eq(&self, other: &RingTracker<B>) -> bool {
        self.capacity == other.capacity
            && self.head == other.head
            && self.tail == other.tail
            && self.occupied == other.occupied
    }
}

impl<B: Behavior> Eq for RingTracker<B> {}

impl<B: Behavior> fmt::Debug for RingTracker<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RingTracker")
            .field("capacity", &self.capacity)
            .field("policy", &B::POLICY)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("len", &self.len())
            .finish()
    }
}
