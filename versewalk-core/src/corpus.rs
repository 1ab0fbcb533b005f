//! Corpus adjacency model
//!
//! The model interns every token of the corpus and records, for each token,
//! how often every other token (or a boundary) was observed immediately
//! before and immediately after it. Tables are ordered maps so that weighted
//! sampling is reproducible for a seeded generator.

use crate::error::{CoreError, Result};
use crate::token::{tokenize, Lexeme, TokenizerConfig};
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

/// Dense identifier of an interned token
pub type TokenId = u32;

/// One side of an observed adjacency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Link {
    /// Corpus start/end, sentence end or stanza break
    Boundary,
    /// An interned token
    Token(TokenId),
}

/// Kind of an interned token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A word usable as a line ending or rhyme anchor
    Word,
    /// Kept punctuation (`,` `;` `:`)
    Punct,
}

/// Weighted set of neighbours of one token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transitions {
    counts: BTreeMap<Link, u32>,
    total: u32,
}

impl Transitions {
    fn observe(&mut self, link: Link) {
        *self.counts.entry(link).or_insert(0) += 1;
        self.total += 1;
    }

    /// Sum of all observation counts
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of distinct neighbours
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no neighbour was ever observed
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Observation count of one neighbour
    pub fn count(&self, link: Link) -> u32 {
        self.counts.get(&link).copied().unwrap_or(0)
    }

    /// Neighbours with their counts, in link order
    pub fn iter(&self) -> impl Iterator<Item = (Link, u32)> + '_ {
        self.counts.iter().map(|(&link, &count)| (link, count))
    }

    /// Pick a neighbour with probability proportional to its count
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Link> {
        if self.total == 0 {
            return None;
        }

        let target = rng.gen_range(0..self.total);
        let mut cumulative = 0;
        for (&link, &count) in &self.counts {
            cumulative += count;
            if cumulative > target {
                return Some(link);
            }
        }
        // Unreachable while total matches the counts
        self.counts.keys().next_back().copied()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    text: String,
    kind: TokenKind,
}

/// Bidirectional adjacency model of a corpus
///
/// Built once by [`CorpusModel::load`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct CorpusModel {
    entries: Vec<Entry>,
    index: HashMap<String, TokenId>,
    predecessors: Vec<Transitions>,
    successors: Vec<Transitions>,
    starters: Transitions,
    words: Vec<TokenId>,
    line_endings: Vec<TokenId>,
    token_count: usize,
}

impl CorpusModel {
    /// Build a model with default tokenizer settings
    pub fn load(text: &str) -> Result<Self> {
        Self::load_with(text, &TokenizerConfig::default())
    }

    /// Build a model from raw text
    pub fn load_with(text: &str, config: &TokenizerConfig) -> Result<Self> {
        let mut builder = ModelBuilder::default();

        for lexeme in tokenize(text) {
            match lexeme {
                Lexeme::Word(word) => builder.push(word, TokenKind::Word),
                Lexeme::Punct(mark) => builder.push(mark.to_string(), TokenKind::Punct),
                Lexeme::SentenceEnd => builder.close_segment(),
                Lexeme::LineBreak => {
                    builder.end_line();
                    if config.line_breaks_are_boundaries {
                        builder.close_segment();
                    }
                }
                Lexeme::StanzaBreak => {
                    builder.end_line();
                    builder.close_segment();
                }
            }
        }
        builder.end_line();
        builder.close_segment();

        builder.finish()
    }

    /// Look up a token id by its (case-insensitive) text
    pub fn id_of(&self, word: &str) -> Option<TokenId> {
        match self.index.get(word) {
            Some(&id) => Some(id),
            None => self.index.get(&word.to_lowercase()).copied(),
        }
    }

    /// Text of an interned token
    pub fn text(&self, id: TokenId) -> &str {
        &self.entries[id as usize].text
    }

    /// Kind of an interned token
    pub fn kind(&self, id: TokenId) -> TokenKind {
        self.entries[id as usize].kind
    }

    /// Whether the token appears anywhere in the corpus
    pub fn contains(&self, token: &str) -> bool {
        self.id_of(token).is_some()
    }

    /// Whether the token appears in the corpus as a word
    pub fn is_word(&self, token: &str) -> bool {
        self.id_of(token)
            .is_some_and(|id| self.kind(id) == TokenKind::Word)
    }

    /// Tokens observed immediately before `word`
    pub fn predecessors(&self, word: &str) -> Result<&Transitions> {
        let id = self
            .id_of(word)
            .ok_or_else(|| CoreError::unknown_word(word.to_lowercase()))?;
        Ok(self.predecessors_of(id))
    }

    /// Tokens observed immediately after `word`
    pub fn successors(&self, word: &str) -> Result<&Transitions> {
        let id = self
            .id_of(word)
            .ok_or_else(|| CoreError::unknown_word(word.to_lowercase()))?;
        Ok(self.successors_of(id))
    }

    /// Predecessor table by id
    pub fn predecessors_of(&self, id: TokenId) -> &Transitions {
        &self.predecessors[id as usize]
    }

    /// Successor table by id
    pub fn successors_of(&self, id: TokenId) -> &Transitions {
        &self.successors[id as usize]
    }

    /// Tokens observed right after a boundary
    pub fn starters(&self) -> &Transitions {
        &self.starters
    }

    /// Word vocabulary in first-seen order
    pub fn word_ids(&self) -> &[TokenId] {
        &self.words
    }

    /// Word vocabulary as text, in first-seen order
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(|&id| self.text(id))
    }

    /// Last word of every non-empty corpus line, with repetition
    pub fn line_endings(&self) -> &[TokenId] {
        &self.line_endings
    }

    /// Number of distinct tokens, punctuation included
    pub fn vocabulary_size(&self) -> usize {
        self.entries.len()
    }

    /// Number of distinct words
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Total number of tokens read from the corpus
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Uniformly random word from the vocabulary
    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> TokenId {
        // `finish` rejects corpora without words
        self.words[rng.gen_range(0..self.words.len())]
    }
}

#[derive(Default)]
struct ModelBuilder {
    entries: Vec<Entry>,
    index: HashMap<String, TokenId>,
    predecessors: Vec<Transitions>,
    successors: Vec<Transitions>,
    starters: Transitions,
    words: Vec<TokenId>,
    line_endings: Vec<TokenId>,
    token_count: usize,
    previous: Option<TokenId>,
    line_last_word: Option<TokenId>,
}

impl ModelBuilder {
    fn intern(&mut self, text: String, kind: TokenKind) -> TokenId {
        if let Some(&id) = self.index.get(&text) {
            return id;
        }
        let id = self.entries.len() as TokenId;
        self.index.insert(text.clone(), id);
        self.entries.push(Entry { text, kind });
        self.predecessors.push(Transitions::default());
        self.successors.push(Transitions::default());
        if kind == TokenKind::Word {
            self.words.push(id);
        }
        id
    }

    fn push(&mut self, text: String, kind: TokenKind) {
        // Punctuation never opens a segment or doubles up
        if kind == TokenKind::Punct {
            match self.previous {
                None => return,
                Some(prev) if self.entries[prev as usize].kind == TokenKind::Punct => return,
                Some(_) => {}
            }
        }

        let id = self.intern(text, kind);
        match self.previous {
            Some(prev) => {
                self.predecessors[id as usize].observe(Link::Token(prev));
                self.successors[prev as usize].observe(Link::Token(id));
            }
            None => {
                self.predecessors[id as usize].observe(Link::Boundary);
                self.starters.observe(Link::Token(id));
            }
        }

        self.previous = Some(id);
        self.token_count += 1;
        if kind == TokenKind::Word {
            self.line_last_word = Some(id);
        }
    }

    fn close_segment(&mut self) {
        if let Some(prev) = self.previous.take() {
            self.successors[prev as usize].observe(Link::Boundary);
        }
    }

    fn end_line(&mut self) {
        if let Some(word) = self.line_last_word.take() {
            self.line_endings.push(word);
        }
    }

    fn finish(self) -> Result<CorpusModel> {
        if self.words.is_empty() {
            return Err(CoreError::EmptyCorpus);
        }

        Ok(CorpusModel {
            entries: self.entries,
            index: self.index,
            predecessors: self.predecessors,
            successors: self.successors,
            starters: self.starters,
            words: self.words,
            line_endings: self.line_endings,
            token_count: self.token_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn link(model: &CorpusModel, word: &str) -> Link {
        Link::Token(model.id_of(word).unwrap())
    }

    #[test]
    fn test_predecessor_counts() {
        let model = CorpusModel::load("How are you are you good").unwrap();

        let are = model.predecessors("are").unwrap();
        assert_eq!(are.count(link(&model, "how")), 1);
        assert_eq!(are.count(link(&model, "you")), 1);

        let you = model.predecessors("you").unwrap();
        assert_eq!(you.count(link(&model, "are")), 2);
        assert_eq!(you.total(), 2);
    }

    #[test]
    fn test_successor_counts() {
        let model = CorpusModel::load("How are you are you good").unwrap();

        let you = model.successors("you").unwrap();
        assert_eq!(you.count(link(&model, "are")), 1);
        assert_eq!(you.count(link(&model, "good")), 1);
        assert_eq!(model.successors("good").unwrap().count(Link::Boundary), 1);
    }

    #[test]
    fn test_corpus_edges_are_boundaries() {
        let model = CorpusModel::load("first middle last").unwrap();
        assert_eq!(model.predecessors("first").unwrap().count(Link::Boundary), 1);
        assert_eq!(model.successors("last").unwrap().count(Link::Boundary), 1);
        assert_eq!(model.starters().count(link(&model, "first")), 1);
    }

    #[test]
    fn test_sentence_end_is_boundary() {
        let model = CorpusModel::load("the end. a start").unwrap();
        assert_eq!(model.predecessors("a").unwrap().count(Link::Boundary), 1);
        assert_eq!(model.predecessors("a").unwrap().count(link(&model, "end")), 0);
    }

    #[test]
    fn test_line_break_policy() {
        let text = "over the hill\nunder the sea";

        let joined = CorpusModel::load(text).unwrap();
        assert_eq!(
            joined.predecessors("under").unwrap().count(link(&joined, "hill")),
            1
        );

        let config = TokenizerConfig {
            line_breaks_are_boundaries: true,
        };
        let split = CorpusModel::load_with(text, &config).unwrap();
        assert_eq!(split.predecessors("under").unwrap().count(Link::Boundary), 1);
    }

    #[test]
    fn test_stanza_break_is_boundary() {
        let model = CorpusModel::load("one two\n\nthree four").unwrap();
        assert_eq!(model.predecessors("three").unwrap().count(Link::Boundary), 1);
    }

    #[test]
    fn test_unknown_word() {
        let model = CorpusModel::load("some words here").unwrap();
        assert_eq!(
            model.predecessors("Missing").unwrap_err(),
            CoreError::unknown_word("missing")
        );
        assert!(model.successors("missing").is_err());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let model = CorpusModel::load("Bright Star").unwrap();
        assert!(model.contains("STAR"));
        assert!(model.is_word("bright"));
        assert_eq!(model.text(model.id_of("Bright").unwrap()), "bright");
    }

    #[test]
    fn test_punctuation_tokens() {
        let model = CorpusModel::load("love, and death, and fate").unwrap();
        assert!(model.contains(","));
        assert!(!model.is_word(","));
        assert_eq!(model.predecessors("and").unwrap().count(link(&model, ",")), 2);
        assert_eq!(model.word_count(), 4);
        assert_eq!(model.vocabulary_size(), 5);
    }

    #[test]
    fn test_leading_punctuation_skipped() {
        let model = CorpusModel::load(", hello. ; world").unwrap();
        assert!(!model.contains(","));
        assert!(!model.contains(";"));
        assert_eq!(model.token_count(), 2);
    }

    #[test]
    fn test_line_endings() {
        let model = CorpusModel::load("the bright light\nthe quiet night,\n\n\nlight").unwrap();
        let endings: Vec<&str> = model
            .line_endings()
            .iter()
            .map(|&id| model.text(id))
            .collect();
        assert_eq!(endings, vec!["light", "night", "light"]);
    }

    #[test]
    fn test_every_token_has_neighbours() {
        let model = CorpusModel::load("a b. c, d\n\ne f g.").unwrap();
        for id in 0..model.vocabulary_size() as TokenId {
            assert!(!model.predecessors_of(id).is_empty());
            assert!(!model.successors_of(id).is_empty());
        }
    }

    #[test]
    fn test_empty_corpus() {
        assert_eq!(CorpusModel::load("").unwrap_err(), CoreError::EmptyCorpus);
        assert_eq!(CorpusModel::load("... ,;").unwrap_err(), CoreError::EmptyCorpus);
    }

    #[test]
    fn test_weighted_sampling_follows_counts() {
        let model = CorpusModel::load("x a. x a. x a. y a.").unwrap();
        let table = model.predecessors("a").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let mut x_hits = 0;
        for _ in 0..4000 {
            if table.sample(&mut rng) == Some(link(&model, "x")) {
                x_hits += 1;
            }
        }
        // Expected 3000 of 4000
        assert!((2700..3300).contains(&x_hits), "x sampled {x_hits} times");
    }

    #[test]
    fn test_sampling_empty_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(Transitions::default().sample(&mut rng), None);
    }

    #[test]
    fn test_random_word_is_a_word() {
        let model = CorpusModel::load("alpha, beta; gamma").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let id = model.random_word(&mut rng);
            assert_eq!(model.kind(id), TokenKind::Word);
        }
    }
}
