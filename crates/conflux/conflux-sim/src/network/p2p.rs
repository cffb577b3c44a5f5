//! Peer-to-peer topology: every online replica broadcasts its payload to
//! every other online replica.
//!
//! # Examples
//!
//! ```
//! use conflux_crdt::{Convergent, GCounter};
//! use conflux_sim::P2PNetwork;
//!
//! let mut network = P2PNetwork::new();
//! let a = network.add(GCounter::new("A"));
//! let b = network.add(GCounter::new("B"));
//!
//! network.replica_mut(a).increment(1);
//! network.replica_mut(b).increment(2);
//!
//! network.broadcast_all();
//! assert_eq!(network.replica(a).query(), 3);
//! assert_eq!(network.count_partitions(), 1);
//! ```

use tracing::{debug, info};

use conflux_crdt::Convergent;

use super::slot::{self, Slot, SlotId};

/// A peer-to-peer network of replicas of a single CRDT type.
///
/// The network owns its replicas; local updates go through
/// [`replica_mut`](Self::replica_mut), which reaches offline replicas too —
/// partition only stops propagation, never local progress.
#[derive(Debug)]
pub struct P2PNetwork<C> {
    slots: Vec<Slot<C>>,
}

impl<C: Convergent> P2PNetwork<C> {
    /// Create an empty network.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Register a replica, online. Returns its slot.
    pub fn add(&mut self, replica: C) -> SlotId {
        debug!(replica = replica.name(), "registering replica");
        self.slots.push(Slot::Online(replica));
        SlotId(self.slots.len() - 1)
    }

    /// Partition a replica away from the network. Idempotent for slots
    /// already offline.
    pub fn disconnect(&mut self, slot: SlotId) {
        let entry = &mut self.slots[slot.0];
        if let Some(replica) = entry.online() {
            info!(replica = replica.name(), "disconnecting from the network");
        }
        entry.take_offline();
    }

    /// Bring a partitioned replica back online.
    pub fn reconnect(&mut self, slot: SlotId) {
        let entry = &mut self.slots[slot.0];
        if entry.bring_online() {
            if let Some(replica) = entry.online() {
                info!(replica = replica.name(), "reconnecting to the network");
            }
        }
    }

    /// Merge the payload of the replica at `slot` into every other online
    /// replica. No-op when the origin is offline.
    pub fn broadcast(&mut self, slot: SlotId) {
        let Some(origin) = self.slots[slot.0].online() else {
            return;
        };
        info!(
            origin = origin.name(),
            "broadcasting to all connected replicas"
        );
        let payload = origin.payload();
        for (index, entry) in self.slots.iter_mut().enumerate() {
            if index == slot.0 {
                continue;
            }
            if let Some(peer) = entry.online_mut() {
                peer.merge(payload.clone());
            }
        }
    }

    /// Broadcast from every slot, in ascending slot order.
    pub fn broadcast_all(&mut self) {
        for index in 0..self.slots.len() {
            self.broadcast(SlotId(index));
        }
    }

    /// The number of distinct observable values across all replicas,
    /// online and offline.
    pub fn count_partitions(&self) -> usize {
        slot::count_partitions(&self.slots)
    }

    /// Read access to a replica, online or offline.
    ///
    /// Panics on an unbound slot: slot ids come from `add`, so that is a
    /// caller bug.
    pub fn replica(&self, slot: SlotId) -> &C {
        self.slots[slot.0].bound().expect("slot is unbound")
    }

    /// Write access to a replica, online or offline — local updates keep
    /// working under partition.
    pub fn replica_mut(&mut self, slot: SlotId) -> &mut C {
        self.slots[slot.0].bound_mut().expect("slot is unbound")
    }

    /// The number of slots ever added.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no replica was ever added.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Log the network state, every replica's value, and whether the
    /// network has converged.
    pub fn dump(&self) {
        info!("p2p network state");
        slot::dump_slots(&self.slots);
    }
}

impl<C: Convergent> Default for P2PNetwork<C> {
    fn default() -> Self {
        Self::new()
    }
}
