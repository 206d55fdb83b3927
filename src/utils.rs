#[inline]
pub fn wrap_add(index: usize, addend: usize, capacity: usize) -> usize {
    debug_assert!(addend <= capacity);
    (index + addend) % capacity
}

#[inline]
pub fn wrap_sub(index: usize, subtrahend: usize, capacity: usize) -> usize {
    debug_assert!(subtrahend <= capacity);
    (index + capacity - subtrahend) % capacity
}

/// Number of occupied slots between `tail` (inclusive) and `head` (exclusive).
///
/// `head == tail` means full when `occupied`, empty otherwise.
#[inline]
pub fn count(tail: usize, head: usize, occupied: bool, capacity: usize) -> usize {
    debug_assert!(head < capacity);
    debug_assert!(tail < capacity);
    if !occupied {
        0
    } else if head > tail {
        head - tail
    } else {
        capacity + head - tail
    }
}
