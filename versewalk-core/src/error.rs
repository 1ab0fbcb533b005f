//! Core error types (deterministic only)

use thiserror::Error;

/// Core algorithm errors (no I/O, no external failures)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Word never observed in the corpus
    #[error("word '{word}' does not appear in the corpus")]
    UnknownWord {
        /// The lowercased word that was looked up
        word: String,
    },

    /// Source text produced no words
    #[error("corpus contains no words")]
    EmptyCorpus,

    /// Rhyme scheme could not be parsed
    #[error("invalid rhyme scheme: {reason}")]
    InvalidScheme {
        /// Why the scheme was rejected
        reason: String,
    },

    /// Line length or stanza size setting is unusable
    #[error("invalid length setting: {reason}")]
    InvalidLength {
        /// Why the setting was rejected
        reason: String,
    },

    /// Explicit per-line length list does not cover the poem
    #[error("length list has {found} entries but the poem has {expected} lines")]
    LengthMismatch {
        /// Number of lines implied by the scheme
        expected: usize,
        /// Number of lengths supplied
        found: usize,
    },
}

impl CoreError {
    /// Shorthand for [`CoreError::UnknownWord`]
    pub fn unknown_word(word: impl Into<String>) -> Self {
        CoreError::UnknownWord { word: word.into() }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
