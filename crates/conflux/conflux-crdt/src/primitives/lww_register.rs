//! Last-writer-wins register (LWW-Register) CRDT.
//!
//! Every write carries a `(logical clock, replica hash)` timestamp. Merge
//! adopts the state with the lexicographically greater timestamp, so all
//! replicas converge on the globally latest write. A cleared register keeps
//! its timestamp: a later clear beats an earlier assign.
//!
//! # Examples
//!
//! ```
//! use conflux_crdt::{Convergent, LWWRegister};
//!
//! let mut a = LWWRegister::new("A");
//! let mut b = LWWRegister::new("B");
//!
//! a.assign("first");
//! b.merge(a.payload());
//! b.assign("second");
//! a.merge(b.payload());
//!
//! assert_eq!(a.query(), Some("second"));
//! ```

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convergent::Convergent;
use conflux_core::hash::stable_name_hash;

/// A write timestamp: logical clock first, replica hash as tie-breaker.
/// Derived `Ord` gives the lexicographic comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Logical clock of the writing replica at the time of the write.
    pub counter: u64,
    /// Stable hash of the writing replica's name.
    pub replica_hash: u64,
}

/// The state of an LWW-Register: the latest known write.
///
/// `value` is `None` for a register that was cleared or never written;
/// the timestamp distinguishes the two histories but compares identically
/// for both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LWWPayload<T> {
    value: Option<T>,
    timestamp: Timestamp,
}

impl<T: Clone> LWWPayload<T> {
    fn initial(replica_hash: u64) -> Self {
        Self {
            value: None,
            timestamp: Timestamp {
                counter: 0,
                replica_hash,
            },
        }
    }

    /// The held value, if any.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The timestamp of the latest write.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Merge with another payload: adopt the other state entirely when its
    /// timestamp is greater or equal.
    ///
    /// Equal timestamps can only come from the same replica at the same
    /// clock value, in which case the states are already identical.
    pub fn merge(&mut self, other: &Self) {
        if self.timestamp <= other.timestamp {
            *self = other.clone();
        }
    }

    /// Timestamp order. This is the register's payload partial order: a
    /// later write supersedes the whole state.
    pub fn le(&self, other: &Self) -> bool {
        self.timestamp <= other.timestamp
    }
}

/// A last-writer-wins register replica.
///
/// The local logical clock advances by one on every `assign` or `clear`,
/// and catches up to any higher clock observed through `merge`, so a local
/// write always supersedes everything this replica has seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LWWRegister<T> {
    name: String,
    replica_hash: u64,
    logical_clock: u64,
    payload: LWWPayload<T>,
}

impl<T: Clone> LWWRegister<T> {
    /// Create a fresh, empty replica.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let replica_hash = stable_name_hash(&name);
        Self {
            name,
            replica_hash,
            logical_clock: 0,
            payload: LWWPayload::initial(replica_hash),
        }
    }

    /// Write a value with a fresh timestamp.
    pub fn assign(&mut self, value: T) {
        self.logical_clock += 1;
        debug!(replica = %self.name, counter = self.logical_clock, "assigning value");
        self.payload = LWWPayload {
            value: Some(value),
            timestamp: self.stamp(),
        };
    }

    /// Clear the register with a fresh timestamp.
    pub fn clear(&mut self) {
        self.logical_clock += 1;
        debug!(replica = %self.name, counter = self.logical_clock, "clearing value");
        self.payload = LWWPayload {
            value: None,
            timestamp: self.stamp(),
        };
    }

    fn stamp(&self) -> Timestamp {
        Timestamp {
            counter: self.logical_clock,
            replica_hash: self.replica_hash,
        }
    }
}

impl<T> Convergent for LWWRegister<T>
where
    T: Clone + Eq + Hash + fmt::Debug,
{
    type Payload = LWWPayload<T>;
    type Value = Option<T>;

    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self) -> Option<T> {
        self.payload.value().cloned()
    }

    fn payload(&self) -> LWWPayload<T> {
        self.payload.clone()
    }

    fn merge(&mut self, other: LWWPayload<T>) {
        self.logical_clock = self.logical_clock.max(other.timestamp().counter);
        self.payload.merge(&other);
    }
}
