//! Rhyme resolution
//!
//! The resolver turns the raw answers of a [`RhymeLookup`] into rhyme
//! families whose members all occur in the corpus. It owns the lookup cache
//! of one generation run and applies the retry bounds: transport retries per
//! lookup, anchor draws per rhyme group.

use crate::config::{AnchorSource, EngineConfig};
use crate::error::{EngineError, Result};
use crate::lookup::RhymeLookup;
use log::{debug, trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet, VecDeque};
use std::thread;
use std::time::Duration;
use versewalk_core::{CorpusModel, GroupKey, TokenId};

/// Turn a corpus word into the spelling a rhyme service recognises
///
/// Strips surrounding punctuation, expands archaic elisions (`warm'd` →
/// `warmed`, `o'er` → `over`), drops `'st` endings and keeps ASCII letters.
pub fn normalize_for_lookup(word: &str) -> String {
    let mut word = word
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase();

    if let Some(stem) = word.strip_suffix("'st") {
        word = stem.to_string();
    }
    if word.ends_with("'d") || word.ends_with("'n") {
        let last = word.pop();
        word.pop();
        word.push('e');
        word.extend(last);
    }
    let word = word.replace("o'e", "ove").replace("e'e", "eve");

    word.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// Lookup answers of one generation run, keyed by normalized query word
#[derive(Debug, Clone, Default)]
pub struct RhymeCache {
    entries: HashMap<String, Vec<String>>,
}

impl RhymeCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached answer for a normalized query
    pub fn get(&self, query: &str) -> Option<&Vec<String>> {
        self.entries.get(query)
    }

    /// Store an answer
    pub fn insert(&mut self, query: String, rhymes: Vec<String>) {
        self.entries.insert(query, rhymes);
    }

    /// Number of cached queries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An anchor word and the corpus words that rhyme with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RhymeFamily {
    anchor: String,
    members: Vec<String>,
}

impl RhymeFamily {
    /// Family containing only its anchor
    pub fn new(anchor: impl Into<String>) -> Self {
        let anchor = anchor.into();
        Self {
            members: vec![anchor.clone()],
            anchor,
        }
    }

    /// Add a member; returns false if it was already present
    pub fn insert(&mut self, word: String) -> bool {
        if self.members.contains(&word) {
            return false;
        }
        self.members.push(word);
        true
    }

    /// The word the family was seeded from
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// All members, anchor first
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: a family holds at least its anchor
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `word` belongs to the family
    pub fn contains(&self, word: &str) -> bool {
        self.members.iter().any(|m| m == word)
    }

    /// Pick `count` distinct members in random order
    pub fn choose<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<String> {
        let mut members = self.members.clone();
        members.shuffle(rng);
        members.truncate(count);
        members
    }
}

/// Retry and anchor settings of a resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Pool anchors are drawn from
    pub anchor_source: AnchorSource,
    /// Anchor draws per rhyme group
    pub max_anchor_attempts: usize,
    /// Retries after a transport failure
    pub lookup_retries: usize,
    /// Base retry delay
    pub retry_backoff: Duration,
}

impl From<&EngineConfig> for ResolverSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            anchor_source: config.anchor_source,
            max_anchor_attempts: config.max_anchor_attempts,
            lookup_retries: config.lookup_retries,
            retry_backoff: config.retry_backoff,
        }
    }
}

/// Resolves rhyme families against one corpus for one generation run
pub struct RhymeResolver<'a> {
    model: &'a CorpusModel,
    lookup: &'a dyn RhymeLookup,
    settings: ResolverSettings,
    cache: RhymeCache,
    lookup_calls: usize,
}

impl<'a> RhymeResolver<'a> {
    /// Create a resolver with an empty cache
    pub fn new(
        model: &'a CorpusModel,
        lookup: &'a dyn RhymeLookup,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            model,
            lookup,
            settings,
            cache: RhymeCache::new(),
            lookup_calls: 0,
        }
    }

    /// Number of calls that reached the lookup collaborator
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls
    }

    /// The run's lookup cache
    pub fn cache(&self) -> &RhymeCache {
        &self.cache
    }

    /// Corpus words that rhyme with `word`, in lookup order
    pub fn rhymes_for(&mut self, word: &str) -> Result<Vec<String>> {
        let query = normalize_for_lookup(word);
        if query.is_empty() {
            return Err(EngineError::NoRhymeAvailable {
                word: word.to_string(),
            });
        }

        let own = word.to_lowercase();
        let raw = self.query_cached(&query)?;
        let candidates: Vec<String> = raw
            .into_iter()
            .filter(|c| *c != own && *c != query && self.model.is_word(c))
            .collect();

        if candidates.is_empty() {
            return Err(EngineError::NoRhymeAvailable {
                word: word.to_string(),
            });
        }
        trace!("{} corpus rhymes for '{}'", candidates.len(), word);
        Ok(candidates)
    }

    /// Random anchor from the configured pool, skipping `excluded` words
    pub fn pick_anchor<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        excluded: &HashSet<String>,
    ) -> Option<&'a str> {
        let model = self.model;
        let pool: &[TokenId] = match self.settings.anchor_source {
            AnchorSource::LineEndings if !model.line_endings().is_empty() => model.line_endings(),
            _ => model.word_ids(),
        };

        let available: Vec<TokenId> = pool
            .iter()
            .copied()
            .filter(|&id| !excluded.contains(model.text(id)))
            .collect();

        available.choose(rng).map(|&id| model.text(id))
    }

    /// A family with at least `size` members for one rhyme group
    ///
    /// Words in `used` are never anchors or members. Anchors that yield too
    /// small a family are replaced by fresh draws until the attempt bound.
    pub fn family_for_group<R: Rng + ?Sized>(
        &mut self,
        group: GroupKey,
        size: usize,
        used: &HashSet<String>,
        rng: &mut R,
    ) -> Result<RhymeFamily> {
        let max_attempts = self.settings.max_anchor_attempts;
        let mut excluded = used.clone();
        let mut last_failure = String::from("no anchor could be drawn");

        for attempt in 1..=max_attempts {
            let Some(anchor) = self.pick_anchor(rng, &excluded) else {
                return Err(EngineError::RhymeGroupUnsatisfiable {
                    group,
                    attempts: attempt - 1,
                    reason: format!("anchor pool exhausted ({last_failure})"),
                });
            };
            excluded.insert(anchor.to_string());
            debug!("group {group}: anchor attempt {attempt} with '{anchor}'");

            if size <= 1 {
                return Ok(RhymeFamily::new(anchor));
            }

            match self.build_family(anchor, size, used) {
                Ok(family) if family.len() >= size => {
                    debug!(
                        "group {group}: family of '{anchor}' has {} members",
                        family.len()
                    );
                    return Ok(family);
                }
                Ok(family) => {
                    last_failure = format!(
                        "family of '{anchor}' has {} of {size} needed members",
                        family.len()
                    );
                }
                Err(EngineError::NoRhymeAvailable { word }) => {
                    last_failure = format!("no corpus-attested rhyme for '{word}'");
                }
                Err(EngineError::Lookup(err)) => {
                    return Err(EngineError::RhymeGroupUnsatisfiable {
                        group,
                        attempts: attempt,
                        reason: err.to_string(),
                    });
                }
                Err(other) => return Err(other),
            }
            trace!("group {group}: {last_failure}");
        }

        Err(EngineError::RhymeGroupUnsatisfiable {
            group,
            attempts: max_attempts,
            reason: last_failure,
        })
    }

    /// Grow a family from `anchor` until it has `size` members
    ///
    /// When the anchor's own rhymes are not enough, members that have not
    /// been queried yet serve as new anchors; their rhymes rhyme with the
    /// family too.
    fn build_family(
        &mut self,
        anchor: &str,
        size: usize,
        used: &HashSet<String>,
    ) -> Result<RhymeFamily> {
        let mut family = RhymeFamily::new(anchor);
        let mut frontier = VecDeque::from([anchor.to_string()]);

        while family.len() < size {
            let Some(word) = frontier.pop_front() else {
                break;
            };

            let rhymes = match self.rhymes_for(&word) {
                Ok(rhymes) => rhymes,
                Err(EngineError::NoRhymeAvailable { .. }) if word != anchor => continue,
                Err(err) => return Err(err),
            };

            for rhyme in rhymes {
                if !used.contains(&rhyme) && family.insert(rhyme.clone()) {
                    frontier.push_back(rhyme);
                }
            }
        }

        Ok(family)
    }

    fn query_cached(&mut self, query: &str) -> Result<Vec<String>> {
        if let Some(hit) = self.cache.get(query) {
            trace!("rhyme cache hit for '{query}'");
            return Ok(hit.clone());
        }

        let mut attempt = 0;
        let answer = loop {
            self.lookup_calls += 1;
            match self.lookup.query(query) {
                Ok(answer) => break answer,
                Err(err) if attempt < self.settings.lookup_retries => {
                    attempt += 1;
                    warn!(
                        "{} lookup for '{query}' failed ({err}), retry {attempt}/{}",
                        self.lookup.name(),
                        self.settings.lookup_retries
                    );
                    let delay = self.settings.retry_backoff * attempt as u32;
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                }
                Err(err) => return Err(err.into()),
            }
        };

        let mut rhymes: Vec<String> = Vec::with_capacity(answer.len());
        for candidate in answer {
            let candidate = candidate.trim().to_lowercase();
            if !candidate.is_empty() && !rhymes.contains(&candidate) {
                rhymes.push(candidate);
            }
        }

        self.cache.insert(query.to_string(), rhymes.clone());
        Ok(rhymes)
    }
}
