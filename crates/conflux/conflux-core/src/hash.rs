//! Stable replica-name hashing.
//!
//! Last-writer-wins timestamps tie-break on a hash of the replica name, so
//! the hash must be deterministic for the lifetime of a simulation. SipHash
//! with fixed keys (the `DefaultHasher` default) is enough for a
//! single-process run; states compared across processes would need a named
//! stable hash instead.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash a replica name to a `u64`, deterministically within a process.
///
/// # Examples
///
/// ```
/// use conflux_core::hash::stable_name_hash;
///
/// assert_eq!(stable_name_hash("A"), stable_name_hash("A"));
/// assert_ne!(stable_name_hash("A"), stable_name_hash("B"));
/// ```
pub fn stable_name_hash(name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}
