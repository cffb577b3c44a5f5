//! Grow-only counter (G-Counter) CRDT.
//!
//! Each replica increments its own entry only; the observable value is the
//! sum over all entries and merge takes the per-replica maximum, so no
//! increment is ever lost or double-counted.
//!
//! # Examples
//!
//! ```
//! use conflux_crdt::{Convergent, GCounter};
//!
//! let mut a = GCounter::new("A");
//! a.increment(2);
//!
//! let mut b = GCounter::new("B");
//! b.increment(1);
//!
//! a.merge(b.payload());
//! assert_eq!(a.query(), 3);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convergent::Convergent;

/// The state of a grow-only counter: replica name → that replica's count.
///
/// Entries are monotone nondecreasing for the lifetime of the replica that
/// owns them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GCounterPayload {
    counts: HashMap<String, u64>,
}

impl GCounterPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// The count recorded under one replica's name (0 if absent).
    pub fn local_value(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// The observable value: sum of all entries.
    pub fn query(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Add `delta` under `name`.
    pub fn increment(&mut self, name: &str, delta: u64) {
        if delta == 0 {
            return;
        }
        let entry = self.counts.entry(name.to_string()).or_insert(0);
        *entry += delta;
    }

    /// Merge with another payload: pointwise max.
    pub fn merge(&mut self, other: &Self) {
        for (name, &other_count) in &other.counts {
            let entry = self.counts.entry(name.clone()).or_insert(0);
            *entry = (*entry).max(other_count);
        }
    }

    /// Pointwise partial order: every entry of `self` is ≤ the
    /// corresponding entry of `other`.
    ///
    /// Entries present only in `other` compare against an implicit zero and
    /// cannot fail the check; all checks passing means `true`.
    pub fn le(&self, other: &Self) -> bool {
        for (name, &count) in &self.counts {
            if count > other.local_value(name) {
                return false;
            }
        }
        true
    }
}

/// A grow-only counter replica: a name plus the payload it mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GCounter {
    name: String,
    payload: GCounterPayload,
}

impl GCounter {
    /// Create a fresh replica.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: GCounterPayload::new(),
        }
    }

    /// Add `delta` under this replica's own name.
    pub fn increment(&mut self, delta: u64) {
        debug!(replica = %self.name, delta, "incrementing");
        self.payload.increment(&self.name, delta);
    }
}

impl Convergent for GCounter {
    type Payload = GCounterPayload;
    type Value = u64;

    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self) -> u64 {
        self.payload.query()
    }

    fn payload(&self) -> GCounterPayload {
        self.payload.clone()
    }

    fn merge(&mut self, other: GCounterPayload) {
        self.payload.merge(&other);
    }
}
