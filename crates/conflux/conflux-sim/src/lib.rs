//! # conflux-sim
//!
//! A simulated replication substrate for the `conflux-crdt` types. Two
//! topologies are provided: peer-to-peer broadcast and a star with a
//! central server. Both support partitioning replicas away from the
//! network and reconnecting them later; local updates keep working while
//! partitioned, and convergence is re-established by merging — never by
//! coordination.
//!
//! Propagation is explicit: nothing moves between replicas except when a
//! `broadcast` or `sync` is driven, which is what makes partition
//! scenarios deterministic enough to assert on.

pub mod network;

pub use network::{P2PNetwork, SlotId, StarNetwork};
