//! Backward Markov walks
//!
//! A [`BackwardWalk`] starts at a line's ending word and yields one token per
//! step, each sampled from the predecessor table of the token before it. The
//! consumer decides how many tokens to take; the walk itself only decides
//! what happens when a boundary is sampled.

use crate::corpus::{CorpusModel, Link, TokenId};
use crate::error::{CoreError, Result};
use rand::Rng;

/// What a walk does when it samples a boundary before the consumer is done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BoundaryPolicy {
    /// End the walk; the line comes out shorter than its target
    #[default]
    Stop,
    /// Continue from a uniformly random corpus word
    Restart,
}

/// Lazy token-by-token walk toward the start of a line
///
/// Yields the starting token first, then its sampled predecessors. Never
/// yields more tokens than the consumer pulls, so `take(n)` bounds the line.
pub struct BackwardWalk<'a, R: Rng + ?Sized> {
    model: &'a CorpusModel,
    rng: &'a mut R,
    next: Option<TokenId>,
    policy: BoundaryPolicy,
    boundaries_hit: usize,
}

impl<'a, R: Rng + ?Sized> BackwardWalk<'a, R> {
    /// Start a walk at `ending`
    pub fn new(
        model: &'a CorpusModel,
        ending: &str,
        policy: BoundaryPolicy,
        rng: &'a mut R,
    ) -> Result<Self> {
        let id = model
            .id_of(ending)
            .ok_or_else(|| CoreError::unknown_word(ending.to_lowercase()))?;
        Ok(Self::from_id(model, id, policy, rng))
    }

    /// Start a walk at an interned token
    pub fn from_id(
        model: &'a CorpusModel,
        ending: TokenId,
        policy: BoundaryPolicy,
        rng: &'a mut R,
    ) -> Self {
        Self {
            model,
            rng,
            next: Some(ending),
            policy,
            boundaries_hit: 0,
        }
    }

    /// How many boundaries were sampled so far
    pub fn boundaries_hit(&self) -> usize {
        self.boundaries_hit
    }
}

impl<R: Rng + ?Sized> Iterator for BackwardWalk<'_, R> {
    type Item = TokenId;

    fn next(&mut self) -> Option<TokenId> {
        let current = self.next.take()?;

        self.next = match self.model.predecessors_of(current).sample(self.rng) {
            Some(Link::Token(prev)) => Some(prev),
            Some(Link::Boundary) | None => {
                self.boundaries_hit += 1;
                match self.policy {
                    BoundaryPolicy::Stop => None,
                    BoundaryPolicy::Restart => Some(self.model.random_word(self.rng)),
                }
            }
        };

        Some(current)
    }
}

/// Walk back from `ending` and return at most `max_tokens` ids in reading order
pub fn walk_line<R: Rng + ?Sized>(
    model: &CorpusModel,
    ending: &str,
    max_tokens: usize,
    policy: BoundaryPolicy,
    rng: &mut R,
) -> Result<Vec<TokenId>> {
    let mut tokens: Vec<TokenId> = BackwardWalk::new(model, ending, policy, rng)?
        .take(max_tokens)
        .collect();
    tokens.reverse();
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn texts(model: &CorpusModel, ids: &[TokenId]) -> Vec<String> {
        ids.iter().map(|&id| model.text(id).to_string()).collect()
    }

    #[test]
    fn test_walk_ends_with_ending_word() {
        let model = CorpusModel::load("one two three four five").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let line = walk_line(&model, "five", 4, BoundaryPolicy::Stop, &mut rng).unwrap();
        assert_eq!(texts(&model, &line), vec!["two", "three", "four", "five"]);
    }

    #[test]
    fn test_walk_stops_at_boundary() {
        let model = CorpusModel::load("just three words").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let line = walk_line(&model, "words", 10, BoundaryPolicy::Stop, &mut rng).unwrap();
        assert_eq!(texts(&model, &line), vec!["just", "three", "words"]);
    }

    #[test]
    fn test_restart_fills_target() {
        let model = CorpusModel::load("just three words").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let line = walk_line(&model, "words", 10, BoundaryPolicy::Restart, &mut rng).unwrap();
        assert_eq!(line.len(), 10);
        assert_eq!(model.text(*line.last().unwrap()), "words");
    }

    #[test]
    fn test_zero_length_walk_is_empty() {
        let model = CorpusModel::load("a b c").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let line = walk_line(&model, "c", 0, BoundaryPolicy::Stop, &mut rng).unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn test_unknown_ending() {
        let model = CorpusModel::load("a b c").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = walk_line(&model, "zebra", 3, BoundaryPolicy::Stop, &mut rng).unwrap_err();
        assert_eq!(err, CoreError::unknown_word("zebra"));
    }

    #[test]
    fn test_walk_is_lazy() {
        let model = CorpusModel::load("one two three four five").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut walk = BackwardWalk::new(&model, "five", BoundaryPolicy::Stop, &mut rng).unwrap();

        assert_eq!(walk.next().map(|id| model.text(id)), Some("five"));
        assert_eq!(walk.next().map(|id| model.text(id)), Some("four"));
        assert_eq!(walk.boundaries_hit(), 0);
    }

    #[test]
    fn test_boundary_count() {
        let model = CorpusModel::load("solo").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut walk = BackwardWalk::new(&model, "solo", BoundaryPolicy::Stop, &mut rng).unwrap();
        assert!(walk.next().is_some());
        assert!(walk.next().is_none());
        assert_eq!(walk.boundaries_hit(), 1);
    }

    #[test]
    fn test_same_seed_same_walk() {
        let text = "the sun and the moon and the stars and the sea";
        let model = CorpusModel::load(text).unwrap();

        let mut first = ChaCha8Rng::seed_from_u64(42);
        let mut second = ChaCha8Rng::seed_from_u64(42);
        let a = walk_line(&model, "sea", 6, BoundaryPolicy::Restart, &mut first).unwrap();
        let b = walk_line(&model, "sea", 6, BoundaryPolicy::Restart, &mut second).unwrap();
        assert_eq!(a, b);
    }
}
