//! Positive-negative counter (PN-Counter) CRDT.
//!
//! A signed counter built from two grow-only payloads: increments land in
//! the positive half, decrements in the negative half, and the observable
//! value is their difference. Merge is componentwise.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::gcounter::GCounterPayload;
use crate::convergent::Convergent;

/// The state of a PN-Counter: a positive and a negative G-Counter payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PNCounterPayload {
    positive: GCounterPayload,
    negative: GCounterPayload,
}

impl PNCounterPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self {
            positive: GCounterPayload::new(),
            negative: GCounterPayload::new(),
        }
    }

    /// The observable value: positive sum minus negative sum. May be
    /// negative.
    pub fn query(&self) -> i64 {
        self.positive.query() as i64 - self.negative.query() as i64
    }

    /// Route `delta` by sign into the positive or negative half, under
    /// `name`.
    pub fn increment(&mut self, name: &str, delta: i64) {
        if delta >= 0 {
            self.positive.increment(name, delta as u64);
        } else {
            self.negative.increment(name, delta.unsigned_abs());
        }
    }

    /// Merge with another payload, componentwise.
    pub fn merge(&mut self, other: &Self) {
        self.positive.merge(&other.positive);
        self.negative.merge(&other.negative);
    }

    /// Componentwise partial order over the two halves.
    pub fn le(&self, other: &Self) -> bool {
        self.positive.le(&other.positive) && self.negative.le(&other.negative)
    }
}

/// A signed counter replica.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PNCounter {
    name: String,
    payload: PNCounterPayload,
}

impl PNCounter {
    /// Create a fresh replica.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: PNCounterPayload::new(),
        }
    }

    /// Add `delta` (of either sign) under this replica's own name.
    pub fn increment(&mut self, delta: i64) {
        if delta >= 0 {
            debug!(replica = %self.name, delta, "incrementing");
        } else {
            debug!(replica = %self.name, delta = delta.unsigned_abs(), "decrementing");
        }
        self.payload.increment(&self.name, delta);
    }
}

impl Convergent for PNCounter {
    type Payload = PNCounterPayload;
    type Value = i64;

    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self) -> i64 {
        self.payload.query()
    }

    fn payload(&self) -> PNCounterPayload {
        self.payload.clone()
    }

    fn merge(&mut self, other: PNCounterPayload) {
        self.payload.merge(&other);
    }
}
