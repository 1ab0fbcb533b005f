//! Orchestration for constrained line synthesis
//!
//! This crate connects the deterministic pieces of `versewalk-core` to an
//! unreliable rhyme-lookup collaborator: it resolves rhyme families with
//! caching and bounded retries, renders lines backward from their endings and
//! assembles them into stanzas.

#![warn(missing_docs)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod lookup;
pub mod poem;
pub mod resolver;
pub mod synthesizer;

// Re-export key types
pub use assembler::{GenerationStats, PoemAssembler};
pub use config::{
    AnchorSource, EngineConfig, DEFAULT_LOOKUP_RETRIES, DEFAULT_MAX_ANCHOR_ATTEMPTS,
    DEFAULT_RETRY_BACKOFF,
};
pub use error::{EngineError, LookupError, Result};
pub use lookup::{RhymeLookup, StaticRhymeTable};
pub use poem::{Line, Poem, Stanza};
pub use resolver::{normalize_for_lookup, RhymeFamily, RhymeResolver};
pub use synthesizer::LineSynthesizer;

// Re-export from core for convenience
pub use versewalk_core::{
    BoundaryPolicy, CorpusModel, GroupKey, LengthPolicy, PlanOptions, TokenizerConfig,
};
