//! Network topologies and the slot state machine they share.

pub mod p2p;
pub mod slot;
pub mod star;

pub use p2p::P2PNetwork;
pub use slot::SlotId;
pub use star::StarNetwork;
