//! Layered error types
//!
//! Core errors are deterministic and local; engine errors add the failures
//! that come from talking to the rhyme-lookup collaborator and from running
//! out of retries.

use thiserror::Error;
use versewalk_core::{CoreError, GroupKey};

/// Failures reported by a [`RhymeLookup`](crate::lookup::RhymeLookup)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Service could not be reached or answered with a transport error
    #[error("rhyme service unreachable: {0}")]
    Transport(String),

    /// Service answered with something that is not a rhyme list
    #[error("rhyme service returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Engine-level errors (Application Layer)
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core algorithm error
    #[error("core algorithm error: {0}")]
    Core(#[from] CoreError),

    /// Lookup answered, but none of the rhymes occur in the corpus
    #[error("no corpus-attested rhyme for '{word}'")]
    NoRhymeAvailable {
        /// The word whose rhymes were requested
        word: String,
    },

    /// Every anchor attempt for a rhyme group failed
    #[error("rhyme group {group} could not be satisfied after {attempts} anchor attempts: {reason}")]
    RhymeGroupUnsatisfiable {
        /// The failing group
        group: GroupKey,
        /// Anchors tried before giving up
        attempts: usize,
        /// Last failure observed
        reason: String,
    },

    /// Lookup still failing after the configured retries
    #[error("rhyme lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
