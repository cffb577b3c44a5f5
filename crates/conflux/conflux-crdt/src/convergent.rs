//! The capability every replica type exposes to the replication substrate.

use std::fmt;
use std::hash::Hash;

/// A replica of a state-based replicated data type.
///
/// The substrate drives replicas exclusively through this surface: it
/// snapshots payloads, feeds them to peers, and compares observable values
/// to count partitions. It never inspects internal state.
pub trait Convergent {
    /// Snapshot of the replica's internal state, safe to hand to any peer
    /// regardless of subsequent local mutation on the source.
    type Payload: Clone;

    /// The externally observable value of the replica.
    type Value: Eq + Hash + fmt::Debug;

    /// The replica's globally unique name.
    fn name(&self) -> &str;

    /// Read the observable value.
    fn query(&self) -> Self::Value;

    /// Snapshot the payload.
    fn payload(&self) -> Self::Payload;

    /// Absorb a peer's payload. Must be commutative, associative and
    /// idempotent with respect to the payload's join.
    fn merge(&mut self, other: Self::Payload);
}
