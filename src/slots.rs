use core::iter::FusedIterator;

use crate::utils::wrap_add;

/// Iterator over the occupied slots of a `RingTracker`, oldest first.
///
/// Yields absolute indices into the caller's backing array.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct Slots {
    tail: usize,
    remaining: usize,
    capacity: usize,
}

impl Slots {
    pub(crate) fn new(tail: usize, len: usize, capacity: usize) -> Slots {
        Slots { tail, remaining: len, capacity }
    }
}

impl Iterator for Slots {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let tail = self.tail;
        self.tail = wrap_add(self.tail, 1, self.capacity);
        self.remaining -= 1;
        Some(tail)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Slots {
    #[inline]
    fn next_back(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // `remaining < capacity` here, so the offset never needs a second wrap.
        Some(wrap_add(self.tail, self.remaining, self.capacity))
    }
}

impl ExactSizeIterator for Slots {}

impl FusedIterator for Slots {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_wraps() {
        let slots = Slots::new(3, 4, 5);
        assert_eq!(slots.len(), 4);
        assert!(slots.eq([3, 4, 0, 1]));
    }

    #[test]
    fn backward_wraps() {
        assert!(Slots::new(3, 5, 5).rev().eq([2, 1, 0, 4, 3]));
    }

    #[test]
    fn meet_in_the_middle() {
        let mut slots = Slots::new(4, 3, 5);
        assert_eq!(slots.next(), Some(4));
        assert_eq!(slots.next_back(), Some(1));
        assert_eq!(slots.next(), Some(0));
        assert_eq!(slots.next(), None);
        assert_eq!(slots.next_back(), None);
    }
}
