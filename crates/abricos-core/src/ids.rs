//! Millisecond-timestamp identifiers.

use chrono::{DateTime, Utc};

/// Hands out timestamp ids that never repeat within one generator, even when
/// two are requested in the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct TimeIds {
    last: i64,
}

impl TimeIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for the given instant. Strictly greater than every earlier one.
    pub fn next_at(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last + 1);
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_instant_yields_distinct_ids() {
        let now = Utc::now();
        let mut ids = TimeIds::new();
        let a = ids.next_at(now);
        let b = ids.next_at(now);
        assert_eq!(a, now.timestamp_millis());
        assert_eq!(b, a + 1);
    }

    #[test]
    fn test_clock_going_backwards_still_increases() {
        let now = Utc::now();
        let mut ids = TimeIds::new();
        let a = ids.next_at(now);
        let b = ids.next_at(now - chrono::Duration::seconds(5));
        assert!(b > a);
    }
}
