//! # conflux-core
//!
//! Foundation crate for the Conflux workspace.
//! Defines the error types, the stable replica-name hash, and the tracing
//! subscriber setup shared by the other crates.

pub mod errors;
pub mod hash;
pub mod tracing_setup;

// Re-export the most commonly used items at the crate root.
pub use errors::SetError;
pub use hash::stable_name_hash;
