//! High-level configuration API

use crate::error::{ApiError, Result};
use std::time::Duration;
use versewalk_engine::{
    AnchorSource, BoundaryPolicy, EngineConfig, LengthPolicy, PlanOptions, TokenizerConfig,
};

/// High-level configuration for poem generation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub(crate) inner: EngineConfig,
    pub(crate) seed: Option<u64>,
}

impl Config {
    /// Configuration for in-memory rhyme tables: no retries, no backoff
    pub fn offline() -> Self {
        Self {
            inner: EngineConfig::offline(),
            seed: None,
        }
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Fixed seed, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Engine settings
    pub fn engine(&self) -> &EngineConfig {
        &self.inner
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Disable lookup retries and backoff, as for in-memory rhyme tables
    pub fn offline(mut self) -> Self {
        let offline = EngineConfig::offline();
        self.config.inner.lookup_retries = offline.lookup_retries;
        self.config.inner.retry_backoff = offline.retry_backoff;
        self
    }

    /// Same token budget for every line
    pub fn length(mut self, length: usize) -> Self {
        self.config.inner.length = LengthPolicy::Fixed(length);
        self
    }

    /// Explicit token budget per line
    pub fn lengths(mut self, lengths: Vec<usize>) -> Self {
        self.config.inner.length = LengthPolicy::List(lengths);
        self
    }

    /// Random token budget in `min..=max` per line
    pub fn length_range(mut self, min: usize, max: usize) -> Self {
        self.config.inner.length = LengthPolicy::Range { min, max };
        self
    }

    /// Fixed number of lines per stanza
    pub fn stanza_size(mut self, size: Option<usize>) -> Self {
        self.config.inner.plan.stanza_size = size;
        self
    }

    /// Repeat the scheme with fresh rhymes
    pub fn repeat(mut self, repeat: usize) -> Self {
        self.config.inner.plan.repeat = repeat;
        self
    }

    /// Fix the random seed
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// What a walk does on an early boundary
    pub fn boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.config.inner.boundary_policy = policy;
        self
    }

    /// Where rhyme anchors come from
    pub fn anchor_source(mut self, source: AnchorSource) -> Self {
        self.config.inner.anchor_source = source;
        self
    }

    /// Anchor draws per rhyme group
    pub fn max_anchor_attempts(mut self, attempts: usize) -> Self {
        self.config.inner.max_anchor_attempts = attempts;
        self
    }

    /// Retries after a lookup transport failure
    pub fn lookup_retries(mut self, retries: usize) -> Self {
        self.config.inner.lookup_retries = retries;
        self
    }

    /// Base delay between lookup retries
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.config.inner.retry_backoff = backoff;
        self
    }

    /// Treat every corpus line break as a walk boundary
    pub fn line_breaks_are_boundaries(mut self, enabled: bool) -> Self {
        self.config.inner.tokenizer = TokenizerConfig {
            line_breaks_are_boundaries: enabled,
        };
        self
    }

    /// End each stanza with a period
    pub fn punctuate(mut self, enabled: bool) -> Self {
        self.config.inner.punctuate = enabled;
        self
    }

    /// Layout options in one call
    pub fn plan(mut self, plan: PlanOptions) -> Self {
        self.config.inner.plan = plan;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<Config> {
        self.config
            .inner
            .validate()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(self.config)
    }
}
