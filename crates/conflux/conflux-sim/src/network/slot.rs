//! The per-slot state machine and the bookkeeping shared by both
//! topologies.
//!
//! A slot moves `Unbound → Online ⇄ Offline`. Only online replicas
//! participate in broadcasts and syncs, but offline replicas stay bound:
//! they keep accepting local updates and count toward partition detection.

use std::collections::HashSet;
use std::mem;

use tracing::info;

use conflux_crdt::Convergent;

/// An opaque index into a network's slot table, returned by `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// The raw index, mostly useful in diagnostics.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One slot of a network's replica table.
#[derive(Debug)]
pub(crate) enum Slot<C> {
    /// Reserved but not bound to a replica (the star server before
    /// `set_server`).
    Unbound,
    /// Bound and participating in propagation.
    Online(C),
    /// Bound but partitioned away from the network.
    Offline(C),
}

impl<C> Slot<C> {
    pub(crate) fn online(&self) -> Option<&C> {
        match self {
            Slot::Online(replica) => Some(replica),
            _ => None,
        }
    }

    pub(crate) fn online_mut(&mut self) -> Option<&mut C> {
        match self {
            Slot::Online(replica) => Some(replica),
            _ => None,
        }
    }

    /// The bound replica, online or offline.
    pub(crate) fn bound(&self) -> Option<&C> {
        match self {
            Slot::Online(replica) | Slot::Offline(replica) => Some(replica),
            Slot::Unbound => None,
        }
    }

    pub(crate) fn bound_mut(&mut self) -> Option<&mut C> {
        match self {
            Slot::Online(replica) | Slot::Offline(replica) => Some(replica),
            Slot::Unbound => None,
        }
    }

    /// Online → Offline. Returns false (and leaves the slot alone) for
    /// offline or unbound slots, making disconnects idempotent.
    pub(crate) fn take_offline(&mut self) -> bool {
        if matches!(self, Slot::Online(_)) {
            let taken = mem::replace(self, Slot::Unbound);
            if let Slot::Online(replica) = taken {
                *self = Slot::Offline(replica);
                return true;
            }
        }
        false
    }

    /// Offline → Online. Returns false for online or unbound slots.
    pub(crate) fn bring_online(&mut self) -> bool {
        if matches!(self, Slot::Offline(_)) {
            let taken = mem::replace(self, Slot::Unbound);
            if let Slot::Offline(replica) = taken {
                *self = Slot::Online(replica);
                return true;
            }
        }
        false
    }
}

/// The number of distinct observable values across all bound replicas,
/// online and offline. One distinct value means every replica has
/// converged at the query level.
pub(crate) fn count_partitions<C: Convergent>(slots: &[Slot<C>]) -> usize {
    let mut distinct_values: HashSet<C::Value> = HashSet::new();
    for slot in slots {
        if let Some(replica) = slot.bound() {
            distinct_values.insert(replica.query());
        }
    }
    distinct_values.len()
}

/// Log every replica's observable state, online replicas first.
pub(crate) fn dump_slots<C: Convergent>(slots: &[Slot<C>]) {
    for slot in slots {
        if let Slot::Online(replica) = slot {
            info!(replica = replica.name(), value = ?replica.query(), "online");
        }
    }
    for slot in slots {
        if let Slot::Offline(replica) = slot {
            info!(replica = replica.name(), value = ?replica.query(), "offline");
        }
    }
    if count_partitions(slots) == 1 {
        info!("all converged");
    }
}
