//! Multi-value register (MV-Register) CRDT.
//!
//! Writes are tagged with version vectors. Concurrent writes are all
//! preserved and show up together in `query()`; a write made after
//! observing them supersedes the lot. Clearing is itself a write: an
//! empty-valued node that participates in domination like any other.
//!
//! This is *not* a set CRDT, even though the payload is a set. A value
//! removed locally reappears after merging with a replica that holds a
//! concurrent write containing it — the shopping-cart anomaly noted in the
//! Dynamo paper [Giuseppe DeCandia et al. 2007, §4.4].
//!
//! # Examples
//!
//! ```
//! use conflux_crdt::{Convergent, MVRegister};
//!
//! let mut a = MVRegister::new("A");
//! let mut b = MVRegister::new("B");
//!
//! a.assign(["pasta"]);
//! b.assign(["popcorn"]);
//!
//! a.merge(b.payload());
//! assert_eq!(a.query().len(), 2); // both concurrent writes survive
//! ```

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::VersionVector;
use crate::convergent::Convergent;

/// One write: an optional value (empty = cleared) and the version vector
/// it was written under. Equality and hashing cover both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node<T> {
    value: Option<T>,
    clock: VersionVector,
}

impl<T> Node<T> {
    /// The written value, if the write was not a clear.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The version vector the write was made under.
    pub fn clock(&self) -> &VersionVector {
        &self.clock
    }
}

/// The state of an MV-Register: the set of non-dominated writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MVPayload<T: Eq + Hash> {
    nodes: HashSet<Node<T>>,
}

impl<T: Clone + Eq + Hash> MVPayload<T> {
    /// Create an empty payload (no writes yet).
    pub fn new() -> Self {
        Self {
            nodes: HashSet::new(),
        }
    }

    /// Replace the payload with one write per value, all tagged with a
    /// fresh version vector: the merge of every current node's vector,
    /// advanced by one under `name`.
    ///
    /// An empty `values` produces a single empty-valued node — a clear is
    /// a write like any other.
    pub fn assign(&mut self, name: &str, values: impl IntoIterator<Item = T>) {
        let mut clock = VersionVector::new();
        for node in &self.nodes {
            clock.merge(&node.clock);
        }
        clock.increment(name, 1);

        let nodes: HashSet<Node<T>> = values
            .into_iter()
            .map(|value| Node {
                value: Some(value),
                clock: clock.clone(),
            })
            .collect();

        self.nodes = if nodes.is_empty() {
            HashSet::from([Node { value: None, clock }])
        } else {
            nodes
        };
    }

    /// The deduplicated set of non-empty values across all nodes.
    pub fn query(&self) -> BTreeSet<T>
    where
        T: Ord,
    {
        self.nodes
            .iter()
            .filter_map(|node| node.value.clone())
            .collect()
    }

    /// Iterate the surviving writes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> {
        self.nodes.iter()
    }

    /// Merge with another payload: keep every node not strictly dominated
    /// by a node on the opposite side.
    pub fn merge(&mut self, other: &Self) {
        let mut merged: HashSet<Node<T>> = HashSet::new();
        for node in &self.nodes {
            if !other.nodes.iter().any(|peer| node.clock.lt(&peer.clock)) {
                merged.insert(node.clone());
            }
        }
        for node in &other.nodes {
            if !self.nodes.iter().any(|ours| node.clock.lt(&ours.clock)) {
                merged.insert(node.clone());
            }
        }
        self.nodes = merged;
    }

    /// Join-based partial order: `self ≤ other` iff merging `self` into
    /// `other` leaves `other` unchanged.
    pub fn le(&self, other: &Self) -> bool {
        let mut joined = self.clone();
        joined.merge(other);
        joined == *other
    }
}

impl<T: Clone + Eq + Hash> Default for MVPayload<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A multi-value register replica.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MVRegister<T: Eq + Hash> {
    name: String,
    payload: MVPayload<T>,
}

impl<T: Clone + Eq + Hash> MVRegister<T> {
    /// Create a fresh, empty replica.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: MVPayload::new(),
        }
    }

    /// Write a set of values, superseding every write this replica has
    /// observed.
    pub fn assign(&mut self, values: impl IntoIterator<Item = T>) {
        let values: Vec<T> = values.into_iter().collect();
        debug!(replica = %self.name, values = values.len(), "assigning values");
        self.payload.assign(&self.name, values);
    }

    /// Write the empty set.
    pub fn clear(&mut self) {
        debug!(replica = %self.name, "clearing values");
        self.payload.assign(&self.name, std::iter::empty());
    }
}

impl<T> Convergent for MVRegister<T>
where
    T: Clone + Eq + Ord + Hash + fmt::Debug,
{
    type Payload = MVPayload<T>;
    type Value = BTreeSet<T>;

    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self) -> BTreeSet<T> {
        self.payload.query()
    }

    fn payload(&self) -> MVPayload<T> {
        self.payload.clone()
    }

    fn merge(&mut self, other: MVPayload<T>) {
        self.payload.merge(&other);
    }
}
