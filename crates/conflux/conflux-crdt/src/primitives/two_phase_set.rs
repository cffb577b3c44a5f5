//! Two-phase set (2P-Set) CRDT.
//!
//! Two grow-only sets: added elements and removed elements (tombstones).
//! The observable set is the difference. Both halves only ever grow and
//! merge by union, so a removal observed anywhere eventually wins
//! everywhere — and is permanent: a tombstoned element can never be added
//! back. The tombstone set grows without bound; that is the accepted cost
//! of this design.
//!
//! # Examples
//!
//! ```
//! use conflux_crdt::{Convergent, TwoPhaseSet};
//!
//! let mut a: TwoPhaseSet<String> = TwoPhaseSet::new("A");
//! a.add("pasta".to_string());
//! a.remove(&"pasta".to_string()).unwrap();
//!
//! a.add("pasta".to_string()); // tombstoned: silently ignored
//! assert!(a.query().is_empty());
//! ```

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convergent::Convergent;
use conflux_core::errors::SetError;

/// The state of a 2P-Set: the added set and the tombstone set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoPhasePayload<T: Eq + Hash> {
    added: HashSet<T>,
    removed: HashSet<T>,
}

impl<T: Clone + Eq + Hash + fmt::Debug> TwoPhasePayload<T> {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self {
            added: HashSet::new(),
            removed: HashSet::new(),
        }
    }

    /// Returns true if `value` is currently observable (added and not
    /// tombstoned).
    pub fn contains(&self, value: &T) -> bool {
        self.added.contains(value) && !self.removed.contains(value)
    }

    /// The observable set: added minus removed.
    pub fn query(&self) -> BTreeSet<T>
    where
        T: Ord,
    {
        self.added
            .iter()
            .filter(|value| !self.removed.contains(*value))
            .cloned()
            .collect()
    }

    /// Insert `value` unless it was ever removed (tombstones win).
    pub fn add(&mut self, value: T) {
        if self.removed.contains(&value) {
            return;
        }
        self.added.insert(value);
    }

    /// Tombstone `value`. Fails without mutating when the element is not
    /// currently observable.
    pub fn remove(&mut self, value: &T) -> Result<(), SetError> {
        if !self.contains(value) {
            return Err(SetError::ElementNotPresent(format!("{value:?}")));
        }
        self.removed.insert(value.clone());
        Ok(())
    }

    /// Tombstone a batch atomically: if any element is not observable, the
    /// whole batch fails and the payload is left untouched.
    pub fn remove_many(&mut self, values: impl IntoIterator<Item = T>) -> Result<(), SetError> {
        let values: Vec<T> = values.into_iter().collect();
        if let Some(missing) = values.iter().find(|value| !self.contains(value)) {
            return Err(SetError::ElementNotPresent(format!("{missing:?}")));
        }
        for value in values {
            self.removed.insert(value);
        }
        Ok(())
    }

    /// Merge with another payload: union both halves.
    pub fn merge(&mut self, other: &Self) {
        for value in &other.added {
            self.added.insert(value.clone());
        }
        for value in &other.removed {
            self.removed.insert(value.clone());
        }
    }

    /// Componentwise subset order. The observable set is not monotone, but
    /// both halves are.
    pub fn le(&self, other: &Self) -> bool {
        self.added.is_subset(&other.added) && self.removed.is_subset(&other.removed)
    }
}

impl<T: Clone + Eq + Hash + fmt::Debug> Default for TwoPhasePayload<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A two-phase set replica.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoPhaseSet<T: Eq + Hash> {
    name: String,
    payload: TwoPhasePayload<T>,
}

impl<T: Clone + Eq + Hash + fmt::Debug> TwoPhaseSet<T> {
    /// Create a fresh, empty replica.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: TwoPhasePayload::new(),
        }
    }

    /// Add one element. Silently ignored if the element was ever removed.
    pub fn add(&mut self, value: T) {
        debug!(replica = %self.name, value = ?value, "adding element");
        self.payload.add(value);
    }

    /// Add a batch of elements.
    pub fn add_many(&mut self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.add(value);
        }
    }

    /// Remove one element. Fails when the element is not observable.
    pub fn remove(&mut self, value: &T) -> Result<(), SetError> {
        debug!(replica = %self.name, value = ?value, "removing element");
        self.payload.remove(value)
    }

    /// Remove a batch atomically: on any missing element, nothing is
    /// removed.
    pub fn remove_many(&mut self, values: impl IntoIterator<Item = T>) -> Result<(), SetError> {
        debug!(replica = %self.name, "removing batch");
        self.payload.remove_many(values)
    }
}

impl<T> Convergent for TwoPhaseSet<T>
where
    T: Clone + Eq + Ord + Hash + fmt::Debug,
{
    type Payload = TwoPhasePayload<T>;
    type Value = BTreeSet<T>;

    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self) -> BTreeSet<T> {
        self.payload.query()
    }

    fn payload(&self) -> TwoPhasePayload<T> {
        self.payload.clone()
    }

    fn merge(&mut self, other: TwoPhasePayload<T>) {
        self.payload.merge(&other);
    }
}
