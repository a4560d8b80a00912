//! Ordering keys for sibling folders and tasks.
//!
//! New entities receive a key derived from the creation timestamp so that
//! default listing order is creation order. Reordering assigns arbitrary
//! new key values; listings always sort ascending.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A sortable position among siblings. Epoch milliseconds at creation
/// time, arbitrary after an explicit reorder.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct OrderKey(pub i64);

impl OrderKey {
    /// Build a key from a raw value (used by reorder operations).
    pub fn from_raw(value: i64) -> Self {
        Self(value)
    }

    /// Return the raw key value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Issues strictly increasing ordering keys.
///
/// Keys are wall-clock milliseconds, bumped by one when two entities are
/// created within the same millisecond so creation order is never lost.
#[derive(Debug, Default)]
pub struct OrderKeyGenerator {
    last: AtomicI64,
}

impl OrderKeyGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next key: `max(now_ms, previous + 1)`.
    pub fn next(&self) -> OrderKey {
        let now = Utc::now().timestamp_millis();
        let issued = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .expect("fetch_update closure never returns None");
        OrderKey(now.max(issued + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_strictly_increase() {
        let generator = OrderKeyGenerator::new();
        let mut previous = generator.next();
        for _ in 0..1000 {
            let next = generator.next();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_serde_is_transparent() {
        let key = OrderKey::from_raw(42);
        assert_eq!(serde_json::to_string(&key).unwrap(), "42");
        let parsed: OrderKey = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, key);
    }
}
