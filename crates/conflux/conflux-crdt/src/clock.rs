//! Version vector for causal ordering.
//!
//! Each replica maintains its own logical clock entry. The multi-value
//! register tags every write with a version vector to detect concurrent
//! modifications and discard dominated ones.
//!
//! # Examples
//!
//! ```
//! use conflux_crdt::VersionVector;
//!
//! let mut a = VersionVector::new();
//! a.increment("replica-1", 1);
//! a.increment("replica-1", 1);
//!
//! let mut b = VersionVector::new();
//! b.increment("replica-2", 1);
//!
//! assert!(a.concurrent_with(&b));
//!
//! a.merge(&b);
//! assert_eq!(a.local_version("replica-1"), 2);
//! assert_eq!(a.local_version("replica-2"), 1);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A version vector mapping replica names to logical version numbers.
///
/// Absent entries read as zero, and zero entries are treated as absent:
/// equality and hashing ignore them, so incrementing by zero is observably
/// a no-op. Merge is pointwise max.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionVector {
    /// Replica name → logical version.
    versions: HashMap<String, u64>,
}

impl VersionVector {
    /// Create an empty version vector.
    pub fn new() -> Self {
        Self {
            versions: HashMap::new(),
        }
    }

    /// The version recorded for a replica (0 if absent).
    pub fn local_version(&self, name: &str) -> u64 {
        self.versions.get(name).copied().unwrap_or(0)
    }

    /// Advance a replica's entry by `delta`.
    pub fn increment(&mut self, name: &str, delta: u64) {
        if delta == 0 {
            return;
        }
        let entry = self.versions.entry(name.to_string()).or_insert(0);
        *entry += delta;
    }

    /// Merge with another vector: pointwise max.
    pub fn merge(&mut self, other: &Self) {
        for (name, &other_version) in &other.versions {
            let entry = self.versions.entry(name.clone()).or_insert(0);
            *entry = (*entry).max(other_version);
        }
    }

    /// Returns true if every entry of `self` is ≤ the corresponding entry
    /// of `other`.
    ///
    /// Entries present only in `other` compare against an implicit zero on
    /// our side and cannot fail the check, so only our own entries need
    /// inspecting. All checks passing means `true`.
    pub fn le(&self, other: &Self) -> bool {
        for (name, &version) in &self.versions {
            if version > other.local_version(name) {
                return false;
            }
        }
        true
    }

    /// Strict version of [`le`](Self::le): `self ≤ other` and the two are
    /// not equal.
    pub fn lt(&self, other: &Self) -> bool {
        self.le(other) && !other.le(self)
    }

    /// Returns true if neither vector happens-before the other.
    ///
    /// This is the signature of concurrent writes by different replicas.
    pub fn concurrent_with(&self, other: &Self) -> bool {
        !self.le(other) && !other.le(self)
    }

    /// Returns true if `self` strictly dominates `other`.
    pub fn dominates(&self, other: &Self) -> bool {
        other.lt(self)
    }

    /// Names of the replicas with a non-zero entry.
    pub fn replicas(&self) -> Vec<&str> {
        self.versions
            .iter()
            .filter(|(_, &version)| version > 0)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns true if the vector has no non-zero entries.
    pub fn is_empty(&self) -> bool {
        self.versions.values().all(|&version| version == 0)
    }
}

impl PartialEq for VersionVector {
    fn eq(&self, other: &Self) -> bool {
        self.le(other) && other.le(self)
    }
}

impl Eq for VersionVector {}

impl Hash for VersionVector {
    /// Order-independent combination of the non-zero entries, consistent
    /// with the zero-normalized equality above.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut combined: u64 = 0;
        for (name, &version) in &self.versions {
            if version == 0 {
                continue;
            }
            let mut entry_hasher = DefaultHasher::new();
            name.hash(&mut entry_hasher);
            version.hash(&mut entry_hasher);
            combined ^= entry_hasher.finish();
        }
        state.write_u64(combined);
    }
}
