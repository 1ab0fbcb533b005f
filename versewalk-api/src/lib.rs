//! Public API for versewalk poem generation
//!
//! This crate provides a stable interface for generating rhyme-constrained
//! poems from a corpus, hiding the engine's internal types behind
//! serializable DTOs.

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use error::Result;
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Instant;
use versewalk_engine::PoemAssembler;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{Input, LineDTO, Metadata, Output, PoemDTO, StanzaDTO};
pub use error::ApiError;
pub use versewalk_engine::{
    AnchorSource, BoundaryPolicy, CorpusModel, LengthPolicy, LookupError, RhymeLookup,
    StaticRhymeTable, DEFAULT_LOOKUP_RETRIES, DEFAULT_MAX_ANCHOR_ATTEMPTS, DEFAULT_RETRY_BACKOFF,
};

/// Main entry point for poem generation
pub struct PoemGenerator {
    assembler: PoemAssembler,
    config: Config,
}

impl PoemGenerator {
    /// Create a generator with default configuration
    pub fn new(lookup: Arc<dyn RhymeLookup>) -> Result<Self> {
        Self::with_config(Config::default(), lookup)
    }

    /// Create a generator over an in-memory rhyme table
    pub fn offline(table: StaticRhymeTable) -> Result<Self> {
        Self::with_config(Config::offline(), Arc::new(table))
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: Config, lookup: Arc<dyn RhymeLookup>) -> Result<Self> {
        let assembler = PoemAssembler::new(config.inner.clone(), lookup)
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self { assembler, config })
    }

    /// Read a corpus and build its model
    ///
    /// The model can be reused with [`generate_from_model`](Self::generate_from_model).
    pub fn load_corpus(&self, input: Input) -> Result<CorpusModel> {
        let text = input.read_text()?;
        Ok(self.assembler.load_corpus(&text)?)
    }

    /// Generate a poem following `scheme` from a corpus
    pub fn generate(&self, scheme: &str, input: Input) -> Result<Output> {
        let model = self.load_corpus(input)?;
        self.generate_from_model(scheme, &model)
    }

    /// Generate a poem from text directly (convenience method)
    pub fn generate_text(&self, scheme: &str, corpus: &str) -> Result<Output> {
        self.generate(scheme, Input::from_text(corpus))
    }

    /// Generate a poem from a prebuilt model
    ///
    /// Uses the configured seed, or a fresh one that is reported in the
    /// output metadata.
    pub fn generate_from_model(&self, scheme: &str, model: &CorpusModel) -> Result<Output> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        debug!("generating '{scheme}' with seed {seed}");

        let start = Instant::now();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (poem, stats) = self
            .assembler
            .generate_with_stats(scheme, model, &mut rng)?;
        let elapsed = start.elapsed();

        let metadata = Metadata {
            seed,
            line_count: poem.line_count(),
            stanza_count: poem.stanza_count(),
            rhyme_groups: stats.groups,
            lookup_calls: stats.lookup_calls,
            rhyme_source: self.assembler.lookup_name().to_string(),
            boundary_policy: self.config.inner.boundary_policy,
            corpus_words: model.word_count(),
            corpus_tokens: model.token_count(),
            processing_time_ms: elapsed.as_millis() as u64,
        };

        Ok(Output {
            poem: PoemDTO::from_poem(scheme, poem),
            metadata,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// Convenience functions

/// Generate a poem from text with an in-memory rhyme table
pub fn generate_poem(scheme: &str, corpus: &str, rhymes: StaticRhymeTable) -> Result<Output> {
    PoemGenerator::offline(rhymes)?.generate_text(scheme, corpus)
}

/// Generate a poem from a corpus file with an in-memory rhyme table
pub fn generate_from_file<P: AsRef<std::path::Path>>(
    scheme: &str,
    path: P,
    rhymes: StaticRhymeTable,
) -> Result<Output> {
    PoemGenerator::offline(rhymes)?.generate(scheme, Input::from_file(path.as_ref()))
}
