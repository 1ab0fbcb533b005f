//! Line synthesis
//!
//! Builds one line backward from its required ending word.

use crate::error::Result;
use log::trace;
use rand::Rng;
use versewalk_core::{
    trim_leading_punctuation, BackwardWalk, BoundaryPolicy, CoreError, CorpusModel, TokenId,
};

/// Renders lines from a corpus model
#[derive(Debug, Clone, Copy)]
pub struct LineSynthesizer<'a> {
    model: &'a CorpusModel,
    policy: BoundaryPolicy,
}

impl<'a> LineSynthesizer<'a> {
    /// Create a synthesizer over `model`
    pub fn new(model: &'a CorpusModel, policy: BoundaryPolicy) -> Self {
        Self { model, policy }
    }

    /// Tokens of a line ending in `ending`, at most `target_length` long
    ///
    /// The last token is always `ending`. Punctuation a walk leaves at the
    /// front of the line is dropped.
    pub fn render<R: Rng + ?Sized>(
        &self,
        ending: &str,
        target_length: usize,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        if target_length == 0 {
            return Err(CoreError::InvalidLength {
                reason: "target length must be at least 1".to_string(),
            }
            .into());
        }

        let mut walk = BackwardWalk::new(self.model, ending, self.policy, rng)?;
        let mut ids: Vec<TokenId> = walk.by_ref().take(target_length).collect();
        ids.reverse();
        trace!(
            "walked {} of {} tokens back from '{}' ({} boundaries)",
            ids.len(),
            target_length,
            ending,
            walk.boundaries_hit()
        );

        let tokens: Vec<&str> = ids.iter().map(|&id| self.model.text(id)).collect();
        Ok(trim_leading_punctuation(&tokens)
            .iter()
            .map(|t| t.to_string())
            .collect())
    }
}
