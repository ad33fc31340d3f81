//! Identity generation for stored items.
//!
//! Requests and folders carry stable string ids. Production code uses random
//! UUIDs; tests can plug in a deterministic generator instead of relying on
//! randomly generated identity at construction time.

use std::sync::atomic::{AtomicU64, Ordering};

/// A source of unique item ids.
///
/// Implementations must return a fresh id on every call.
pub trait IdGenerator {
    /// Produces the next unique id.
    fn generate(&self) -> String;
}

/// Default generator backed by UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic generator producing `prefix-1`, `prefix-2`, ... in call order.
///
/// Intended for tests that need stable ids.
#[derive(Debug)]
pub struct SequentialGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialGenerator {
    /// Creates a generator with the given id prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialGenerator {
    fn generate(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
