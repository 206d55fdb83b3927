//! Wrap-aware range descriptors.

use core::ops;
use core::slice;
use core::array;

/// A contiguous run of slots in the caller's backing array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Offset of the first slot in the backing array.
    pub absolute_start: usize,
    /// Offset of the matching element in the caller's own source or
    /// destination buffer.
    pub relative_start: usize,
    /// Number of slots, possibly zero.
    pub len: usize,
}

impl Segment {
    /// Slots covered by this segment in the backing array.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringtracker::RingTracker;
    ///
    /// let mut ring: RingTracker = RingTracker::new(4).unwrap();
    /// let mut buffer = [0u8; 4];
    ///
    /// let range = ring.add_range_to_head(3).unwrap();
    /// for seg in &range {
    ///     buffer[seg.absolute()].copy_from_slice(&[7, 8, 9][seg.relative()]);
    /// }
    /// assert_eq!(buffer, [7, 8, 9, 0]);
    /// ```
    #[inline]
    pub fn absolute(&self) -> ops::Range<usize> {
        self.absolute_start..self.absolute_start + self.len
    }

    /// Matching elements in the caller's own buffer.
    #[inline]
    pub fn relative(&self) -> ops::Range<usize> {
        self.relative_start..self.relative_start + self.len
    }

    /// Returns `true` if the segment covers no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// An access of up to `capacity` slots, split in two where it crosses the
/// physical end of the backing array.
///
/// The second segment is empty unless the access wraps. Process the
/// segments in order to preserve element order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SplitRange {
    segments: [Segment; 2],
}

impl SplitRange {
    /// Splits `len` slots starting at `start` in a ring of `capacity` slots.
    ///
    /// Returns the range together with the slot one past its end.
    pub(crate) fn split(start: usize, len: usize, capacity: usize) -> (SplitRange, usize) {
        debug_assert!(start < capacity);
        debug_assert!(len <= capacity);

        let mut segments = [Segment { absolute_start: start, relative_start: 0, len }, Segment::default()];
        let mut next = start + len;
        if next >= capacity {
            next -= capacity;
            segments[0].len = capacity - start;
            segments[1].len = len - segments[0].len;
        }
        segments[1].relative_start = segments[0].len;

        (SplitRange { segments }, next)
    }

    /// The segment to process first.
    #[inline]
    pub fn first(&self) -> &Segment {
        &self.segments[0]
    }

    /// The wrapped remainder, starting at slot 0. Empty if no wrap occurred.
    #[inline]
    pub fn second(&self) -> &Segment {
        &self.segments[1]
    }

    /// Both segments, in processing order.
    #[inline]
    pub fn segments(&self) -> &[Segment; 2] {
        &self.segments
    }

    /// Total number of slots covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments[0].len + self.segments[1].len
    }

    /// Returns `true` if the range covers no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the access wrapped around the end of the array.
    #[inline]
    pub fn is_split(&self) -> bool {
        !self.segments[1].is_empty()
    }

    /// Iterates over both segments, in processing order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl IntoIterator for SplitRange {
    type Item = Segment;
    type IntoIter = array::IntoIter<Segment, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a SplitRange {
    type Item = &'a Segment;
    type IntoIter = slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
