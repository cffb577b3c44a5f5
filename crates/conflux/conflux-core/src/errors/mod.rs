//! Error types for replicated data type operations.
//!
//! Almost everything in this workspace is infallible by contract: merges,
//! local counter increments and register assignments always succeed, and an
//! unreachable server downgrades a sync to a logged no-op. The one
//! recoverable error is removing an element a two-phase set cannot observe.

mod set_error;

pub use set_error::SetError;
