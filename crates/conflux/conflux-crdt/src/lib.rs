//! # conflux-crdt
//!
//! State-based (convergent) replicated data types. Each replica mutates its
//! own payload locally and absorbs peer payloads through `merge`; because
//! every merge is a join-semilattice operation, replicas that have seen the
//! same set of updates converge regardless of delivery order or duplication.
//!
//! ## Primitives
//!
//! - [`VersionVector`] — per-replica logical clock map (happens-before,
//!   concurrency detection, pointwise-max merge)
//! - [`GCounter`] — grow-only counter (per-replica counts, merge = pointwise max)
//! - [`PNCounter`] — signed counter (a positive/negative pair of G-Counters)
//! - [`LWWRegister`] — last-writer-wins register (logical clock + replica-hash
//!   tie-breaking)
//! - [`MVRegister`] — multi-value register (concurrent writes preserved as
//!   version-vector-tagged nodes)
//! - [`TwoPhaseSet`] — add/remove set with permanent tombstones
//!
//! ## Guarantees
//!
//! All merge operations satisfy:
//! 1. **Commutativity**: `merge(A, B) == merge(B, A)`
//! 2. **Associativity**: `merge(A, merge(B, C)) == merge(merge(A, B), C)`
//! 3. **Idempotency**: `merge(A, A) == A`
//!
//! Local updates are monotone: a payload never moves backwards in its own
//! partial order.

pub mod clock;
pub mod convergent;
pub mod primitives;

// Re-export the public API.
pub use clock::VersionVector;
pub use convergent::Convergent;
pub use primitives::{
    GCounter, GCounterPayload, LWWPayload, LWWRegister, MVPayload, MVRegister, PNCounter,
    PNCounterPayload, TwoPhasePayload, TwoPhaseSet,
};
