//! Configuration types for the engine

use crate::error::{EngineError, Result};
use std::time::Duration;
use versewalk_core::{BoundaryPolicy, LengthPolicy, PlanOptions, TokenizerConfig};

/// Anchor draws allowed per rhyme group before giving up
pub const DEFAULT_MAX_ANCHOR_ATTEMPTS: usize = 20;

/// Extra lookup attempts after a transport failure
pub const DEFAULT_LOOKUP_RETRIES: usize = 2;

/// Base delay between lookup retries; grows linearly per attempt
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Pool that rhyme anchors are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AnchorSource {
    /// Words that end corpus lines, weighted by how often they do
    #[default]
    LineEndings,
    /// Any corpus word, uniformly
    Vocabulary,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Per-line target lengths
    pub length: LengthPolicy,
    /// Scheme repetition and stanza layout
    pub plan: PlanOptions,
    /// How corpus breaks become walk boundaries
    pub tokenizer: TokenizerConfig,
    /// What a walk does on an early boundary
    pub boundary_policy: BoundaryPolicy,
    /// Where rhyme anchors come from
    pub anchor_source: AnchorSource,
    /// Anchor draws per rhyme group
    pub max_anchor_attempts: usize,
    /// Retries after a transport failure
    pub lookup_retries: usize,
    /// Base retry delay
    pub retry_backoff: Duration,
    /// End each stanza's last line with a period
    pub punctuate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            length: LengthPolicy::default(),
            plan: PlanOptions::default(),
            tokenizer: TokenizerConfig::default(),
            boundary_policy: BoundaryPolicy::default(),
            anchor_source: AnchorSource::default(),
            max_anchor_attempts: DEFAULT_MAX_ANCHOR_ATTEMPTS,
            lookup_retries: DEFAULT_LOOKUP_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            punctuate: true,
        }
    }
}

impl EngineConfig {
    /// Configuration for an in-memory lookup: no retries, no sleeping
    pub fn offline() -> Self {
        Self {
            lookup_retries: 0,
            retry_backoff: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Reject settings that cannot produce a poem
    pub fn validate(&self) -> Result<()> {
        self.length.validate()?;

        if self.max_anchor_attempts == 0 {
            return Err(EngineError::ConfigError(
                "max_anchor_attempts must be at least 1".to_string(),
            ));
        }
        if self.plan.repeat == 0 {
            return Err(EngineError::ConfigError(
                "repeat must be at least 1".to_string(),
            ));
        }
        if self.plan.stanza_size == Some(0) {
            return Err(EngineError::ConfigError(
                "stanza_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
