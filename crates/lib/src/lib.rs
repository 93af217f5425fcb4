//!
//! Fieldstates: immutable collections of field state records keyed by their shape.
//! This library provides the building blocks for keeping at most one record per
//! attribute shape and for producing new collection values on every change.
//!
//! ## Core Concepts
//!
//! * **Records (`record::Record`)**: An insertion-ordered mapping from attribute names to
//!   arbitrary JSON values. The reserved `id` attribute is stored like any other attribute
//!   but never takes part in matching.
//! * **Fingerprints (`states::fingerprint`)**: The sorted, comma-joined list of a record's
//!   attribute names (excluding `id`). Two records with the same fingerprint are considered
//!   to describe the same field state.
//! * **Sequences (`states::Records`)**: Plain, shareable, read-only sequences of records,
//!   transformed by the pure functions in [`states`] (`find_state`, `remove_state`,
//!   `replace_state`, `replace_states`). A transformation that changes nothing hands back
//!   the very same sequence, which can be checked with [`states::Records::ptr_eq`].
//! * **Collections (`field_states::FieldStates`)**: The immutable wrapper that keeps
//!   fingerprints unique, copies everything it ingests and returns the same instance
//!   whenever an `add` or `remove` is a no-op.

pub mod constants;
pub mod field_states;
pub mod record;
pub mod states;

/// Re-export the collection and record types for easier access.
pub use field_states::{FieldStates, StateSelector};
pub use record::Record;
pub use states::{Records, StatesError};

/// Result type used throughout the Fieldstates library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Fieldstates library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured errors from the states module
    #[error(transparent)]
    States(states::StatesError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::States(_) => "states",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error was caused by an argument of the wrong shape.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::States(states_err) => states_err.is_invalid_argument(),
            _ => false,
        }
    }

    /// Check if this error is serialization-related.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }

    /// Check if this error is states-related.
    pub fn is_states_error(&self) -> bool {
        matches!(self, Error::States(_))
    }
}
