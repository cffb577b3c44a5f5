//! CRDT primitive types.

pub mod gcounter;
pub mod lww_register;
pub mod mv_register;
pub mod pncounter;
pub mod two_phase_set;

pub use gcounter::{GCounter, GCounterPayload};
pub use lww_register::{LWWPayload, LWWRegister, Timestamp};
pub use mv_register::{MVPayload, MVRegister, Node};
pub use pncounter::{PNCounter, PNCounterPayload};
pub use two_phase_set::{TwoPhasePayload, TwoPhaseSet};
