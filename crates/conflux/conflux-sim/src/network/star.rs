//! Star topology: clients sync pairwise with a central server at slot 0.
//!
//! A sync models one request/response exchange: the server replies with
//! its current payload and merges the client's afterwards. Because merge
//! is commutative, client and server reach the same state no matter which
//! side merges first — the client's read is already accurate after the
//! response, the server converges right after. One full round of syncs is
//! not transitive (early clients miss later clients' updates), so full
//! convergence takes two rounds.

use tracing::{debug, info, warn};

use conflux_crdt::Convergent;

use super::slot::{self, Slot, SlotId};

const SERVER_SLOT: usize = 0;

/// A star network: one server replica at slot 0, clients at slots 1..N.
#[derive(Debug)]
pub struct StarNetwork<C> {
    slots: Vec<Slot<C>>,
}

impl<C: Convergent> StarNetwork<C> {
    /// Create an empty network with the server slot reserved.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::Unbound],
        }
    }

    /// Bind (or replace) the server replica at slot 0.
    pub fn set_server(&mut self, replica: C) -> SlotId {
        debug!(replica = replica.name(), "registering server replica");
        self.slots[SERVER_SLOT] = Slot::Online(replica);
        SlotId(SERVER_SLOT)
    }

    /// Register a client replica, online. Returns its slot (always ≥ 1).
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
            if slot.0 == SERVER_SLOT {
                info!("server is down");
            } else {
                info!(replica = replica.name(), "disconnecting from the network");
            }
        }
        entry.take_offline();
    }

    /// Bring a partitioned replica back online.
    pub fn reconnect(&mut self, slot: SlotId) {
        let entry = &mut self.slots[slot.0];
        if entry.bring_online() {
            if slot.0 == SERVER_SLOT {
                info!("server is back up");
            } else if let Some(replica) = entry.online() {
                info!(replica = replica.name(), "reconnecting to the network");
            }
        }
    }

    /// Sync the client at `slot` with the server: the client merges the
    /// server's payload, then the server merges the client's.
    ///
    /// No-op when `slot` is the server itself, when the client is offline,
    /// or when the server is unreachable (down or never bound) — the
    /// latter is reported but is not an error.
    pub fn sync_with_server(&mut self, slot: SlotId) {
        if slot.0 == SERVER_SLOT {
            return;
        }
        let (server_slots, client_slots) = self.slots.split_at_mut(1);
        let Some(client) = client_slots[slot.0 - 1].online_mut() else {
            return;
        };
        let Some(server) = server_slots[SERVER_SLOT].online_mut() else {
            warn!(replica = client.name(), "server is not reachable");
            return;
        };
        info!(
            replica = client.name(),
            server = server.name(),
            "syncing with server"
        );
        let client_payload = client.payload();
        let server_payload = server.payload();
        client.merge(server_payload);
        server.merge(client_payload);
        debug_assert!(
            client.query() == server.query(),
            "client and server must agree after a pairwise sync"
        );
    }

    /// Sync every client slot with the server, in ascending slot order.
    pub fn sync_all_replicas_to_server(&mut self) {
        for index in 1..self.slots.len() {
            self.sync_with_server(SlotId(index));
        }
    }

    /// The number of distinct observable values across all replicas,
    /// online and offline.
    pub fn count_partitions(&self) -> usize {
        slot::count_partitions(&self.slots)
    }

    /// Read access to a replica, online or offline.
    ///
    /// Panics on an unbound slot: slot ids come from `add`/`set_server`,
    /// so that is a caller bug.
    pub fn replica(&self, slot: SlotId) -> &C {
        self.slots[slot.0].bound().expect("slot is unbound")
    }

    /// Write access to a replica, online or offline — local updates keep
    /// working under partition.
    pub fn replica_mut(&mut self, slot: SlotId) -> &mut C {
        self.slots[slot.0].bound_mut().expect("slot is unbound")
    }

    /// The number of slots, server slot included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if only the reserved server slot exists.
    pub fn is_empty(&self) -> bool {
        self.slots.len() == 1
    }

    /// Log the network state, every replica's value, and whether the
    /// network has converged.
    pub fn dump(&self) {
        info!("star network state");
        slot::dump_slots(&self.slots);
    }
}

impl<C: Convergent> Default for StarNetwork<C> {
    fn default() -> Self {
        Self::new()
    }
}
