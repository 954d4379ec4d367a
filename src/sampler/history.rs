//! Bounded rolling history of readings
//!
//! Insertion-ordered ring of the most recent readings. Pushing past capacity
//! evicts the oldest reading.

use std::collections::VecDeque;

use super::types::{Reading, Snapshot};

/// Readings allocated up front; larger windows grow on demand
const PREALLOCATE_LIMIT: usize = 64;

/// Fixed-capacity FIFO buffer of readings
#[derive(Debug, Clone)]
pub struct History {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl History {
    /// Create an empty history. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::with_capacity(capacity.min(PREALLOCATE_LIMIT)),
            capacity,
        }
    }

    /// Append a reading, returning the evicted oldest reading if the
    /// history was already full
    pub fn push(&mut self, reading: Reading) -> Option<Reading> {
        let evicted = if self.readings.len() >= self.capacity {
            self.readings.pop_front()
        } else {
            None
        };
        self.readings.push_back(reading);
        evicted
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent reading
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    /// Readings oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    /// Copy the current contents into an immutable snapshot
    pub fn snapshot(&self, sequence: u64) -> Snapshot {
        Snapshot {
            readings: self.readings.iter().copied().collect(),
            capacity: self.capacity,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    fn reading(n: u32) -> Reading {
        let ts: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + chrono::Duration::seconds(n as i64 * 5);
        Reading::new(-17.0 - n as f64 / 100.0, -16.5, ts)
    }

    #[test]
    fn test_push_within_capacity() {
        let mut history = History::new(3);
        assert!(history.push(reading(1)).is_none());
        assert!(history.push(reading(2)).is_none());
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest(), Some(&reading(2)));
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut history = History::new(3);
        for n in 1..=3 {
            history.push(reading(n));
        }

        let evicted = history.push(reading(4));
        assert_eq!(evicted, Some(reading(1)));
        assert_eq!(history.len(), 3);

        let kept: Vec<_> = history.iter().copied().collect();
        assert_eq!(kept, vec![reading(2), reading(3), reading(4)]);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut history = History::new(0);
        assert_eq!(history.capacity(), 1);
        history.push(reading(1));
        history.push(reading(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some(&reading(2)));
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut history = History::new(usize::MAX);
        assert_eq!(history.capacity(), usize::MAX);
        history.push(reading(1));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let mut history = History::new(5);
        for n in 1..=3 {
            history.push(reading(n));
        }

        let snapshot = history.snapshot(3);
        assert_eq!(snapshot.capacity, 5);
        assert_eq!(snapshot.sequence, 3);
        assert_eq!(snapshot.readings, vec![reading(1), reading(2), reading(3)]);
    }

    proptest! {
        #[test]
        fn prop_len_is_min_of_pushes_and_capacity(capacity in 1usize..40, pushes in 0u32..100) {
            let mut history = History::new(capacity);
            for n in 0..pushes {
                history.push(reading(n));
            }
            prop_assert_eq!(history.len(), (pushes as usize).min(capacity));
            if pushes > 0 {
                let expected = reading(pushes - 1);
                prop_assert_eq!(history.latest(), Some(&expected));
            }
        }
    }
}
