use std::collections::VecDeque;

use proptest::prelude::*;
use ringtracker::{Behavior, Error, OverflowPolicy, RingTracker, Saturating, SplitRange, Wrapping};

#[derive(Clone, Debug)]
enum Op {
    AddHead,
    AddTail,
    RemoveHead,
    RemoveTail,
    AddRangeHead(usize),
    AddRangeTail(usize),
    RemoveRangeHead(usize),
    RemoveRangeTail(usize),
    Clear,
}

fn op_strategy(capacity: usize) -> impl Strategy<Value = Op> {
    // one past capacity so the out-of-bounds path gets exercised too
    let n = 0..=capacity + 1;
    prop_oneof![
        3 => Just(Op::AddHead),
        3 => Just(Op::AddTail),
        2 => Just(Op::RemoveHead),
        2 => Just(Op::RemoveTail),
        3 => n.clone().prop_map(Op::AddRangeHead),
        3 => n.clone().prop_map(Op::AddRangeTail),
        2 => n.clone().prop_map(Op::RemoveRangeHead),
        2 => n.prop_map(Op::RemoveRangeTail),
        1 => Just(Op::Clear),
    ]
}

fn scenario() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (1usize..12).prop_flat_map(|capacity| {
        (Just(capacity), prop::collection::vec(op_strategy(capacity), 0..64))
    })
}

fn slots_of(range: &SplitRange) -> Vec<usize> {
    range.iter().flat_map(|seg| seg.absolute()).collect()
}

fn check_invariants<B: Behavior>(ring: &RingTracker<B>, model: &VecDeque<usize>) {
    let capacity = ring.capacity();
    assert!(ring.head_index() < capacity);
    assert!(ring.tail_index() < capacity);
    assert!(ring.len() <= capacity);
    assert_eq!(ring.len(), model.len());
    assert_eq!(ring.is_empty(), ring.len() == 0);
    assert_eq!(ring.is_full(), ring.len() == capacity);
    assert_eq!(ring.available(), capacity - ring.len());
    assert!(ring.slots().eq(model.iter().copied()));
}

/// Runs `ops` against both the tracker and a deque of slot indices.
fn run<B: Behavior>(capacity: usize, ops: Vec<Op>) {
    let mut ring: RingTracker<B> = RingTracker::new(capacity).unwrap();
    let mut model: VecDeque<usize> = VecDeque::new();
    let evict = ring.policy() == OverflowPolicy::Evict;

    for op in ops {
        let before = ring.clone();
        let len = ring.len();
        let available = ring.available();

        let result = match op {
            Op::AddHead => ring.add_to_head().map(|slot| {
                assert_eq!(slot, before.head_index());
                if before.is_full() {
                    model.pop_front();
                }
                model.push_back(slot);
            }),
            Op::AddTail => ring.add_to_tail().map(|slot| {
                assert_eq!(slot, before.shift(before.tail_index(), -1));
                if before.is_full() {
                    model.pop_back();
                }
                model.push_front(slot);
            }),
            Op::RemoveHead => ring.remove_from_head().map(|slot| {
                assert_eq!(model.pop_back(), Some(slot));
            }),
            Op::RemoveTail => ring.remove_from_tail().map(|slot| {
                assert_eq!(model.pop_front(), Some(slot));
            }),
            Op::AddRangeHead(n) => ring.add_range_to_head(n).map(|range| {
                assert_eq!(range.len(), n);
                for _ in 0..n.saturating_sub(available) {
                    model.pop_front();
                }
                model.extend(slots_of(&range));
            }),
            Op::AddRangeTail(n) => ring.add_range_to_tail(n).map(|range| {
                assert_eq!(range.len(), n);
                for _ in 0..n.saturating_sub(available) {
                    model.pop_back();
                }
                for slot in slots_of(&range).into_iter().rev() {
                    model.push_front(slot);
                }
            }),
            Op::RemoveRangeHead(n) => ring.remove_range_from_head(n).map(|range| {
                let removed: Vec<usize> = model.drain(len - n..).collect();
                assert_eq!(slots_of(&range), removed);
            }),
            Op::RemoveRangeTail(n) => ring.remove_range_from_tail(n).map(|range| {
                let removed: Vec<usize> = model.drain(..n).collect();
                assert_eq!(slots_of(&range), removed);
            }),
            Op::Clear => {
                ring.clear();
                model.clear();
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            Err(err) => {
                assert_eq!(ring, before, "{:?} failed with {} but mutated the tracker", op, err);
                match err {
                    Error::OutOfBounds { len: n, .. } => assert!(n > capacity),
                    Error::Overflow { .. } => assert!(!evict),
                    Error::Underflow { requested, len: present } => {
                        assert_eq!(present, len);
                        assert!(requested > len);
                    }
                    other => panic!("unexpected error {:?}", other),
                }
            }
        }

        check_invariants(&ring, &model);
    }
}

proptest! {
    #[test]
    fn saturating_matches_model((capacity, ops) in scenario()) {
        run::<Saturating>(capacity, ops);
    }

    #[test]
    fn wrapping_matches_model((capacity, ops) in scenario()) {
        run::<Wrapping>(capacity, ops);
    }

    #[test]
    fn compute_range_covers_request(
        (capacity, start, n) in (1usize..64).prop_flat_map(|capacity| (Just(capacity), 0..capacity, 0..=capacity))
    ) {
        let ring: RingTracker = RingTracker::new(capacity).unwrap();
        let (range, next) = ring.compute_range(start, n).unwrap();

        prop_assert_eq!(range.first().len + range.second().len, n);
        prop_assert_eq!(range.first().absolute_start, start);
        prop_assert_eq!(range.second().relative_start, range.first().len);
        prop_assert_eq!(next, (start + n) % capacity);
        if start + n <= capacity {
            prop_assert_eq!(range.second().len, 0);
        } else {
            prop_assert_eq!(range.first().len, capacity - start);
            prop_assert_eq!(range.second().absolute_start, 0);
        }

        let expected: Vec<usize> = (0..n).map(|i| (start + i) % capacity).collect();
        prop_assert_eq!(slots_of(&range), expected);
    }

    #[test]
    fn head_round_trip(capacity in 1usize..32, warmup in 0usize..64) {
        let mut ring: RingTracker<Wrapping> = RingTracker::new(capacity).unwrap();
        for _ in 0..warmup {
            ring.add_to_head().unwrap();
        }
        let before = ring.clone();
        let slot = ring.add_to_head().unwrap();
        prop_assert_eq!(ring.remove_from_head(), Ok(slot));
        if !before.is_full() {
            prop_assert_eq!(ring, before);
        }
    }
}
