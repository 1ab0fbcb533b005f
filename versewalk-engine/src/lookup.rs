//! Rhyme-lookup collaborators
//!
//! The engine never talks to a rhyme service directly; it goes through the
//! [`RhymeLookup`] trait. [`StaticRhymeTable`] is the in-memory
//! implementation used for offline runs and tests.

use crate::error::{EngineError, LookupError, Result};
use std::collections::HashMap;

/// Source of candidate rhymes for a word
pub trait RhymeLookup: Send + Sync {
    /// Candidate rhymes for `word`, best first
    ///
    /// An empty list is a valid answer. Errors are treated as transient and
    /// retried by the caller.
    fn query(&self, word: &str) -> std::result::Result<Vec<String>, LookupError>;

    /// Human-readable name for logs
    fn name(&self) -> &'static str;
}

/// In-memory rhyme table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRhymeTable {
    table: HashMap<String, Vec<String>>,
}

impl StaticRhymeTable {
    /// Create an empty table; every query answers with no rhymes
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rhymes for a word, keeping earlier entries first
    pub fn insert<I, S>(&mut self, word: &str, rhymes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = word.to_lowercase();
        let entry = self.table.entry(key.clone()).or_default();
        for rhyme in rhymes {
            let rhyme = rhyme.into().to_lowercase();
            if rhyme != key && !entry.contains(&rhyme) {
                entry.push(rhyme);
            }
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with<I, S>(mut self, word: &str, rhymes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(word, rhymes);
        self
    }

    /// Close the table under "rhymes with": every listed word also rhymes
    /// with its key and with the other words of the same entry
    pub fn symmetric(self) -> Self {
        let mut closed = StaticRhymeTable::new();
        let mut keys: Vec<&String> = self.table.keys().collect();
        keys.sort();

        for key in keys {
            let rhymes = &self.table[key];
            let mut family: Vec<&str> = vec![key.as_str()];
            family.extend(rhymes.iter().map(String::as_str));

            for &word in &family {
                closed.insert(word, family.iter().copied().filter(|w| *w != word));
            }
        }
        closed
    }

    /// Parse a JSON object mapping words to arrays of rhymes
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| EngineError::ConfigError(format!("invalid rhyme table: {e}")))?;

        let mut words: Vec<_> = raw.into_iter().collect();
        words.sort();

        let mut table = StaticRhymeTable::new();
        for (word, rhymes) in words {
            table.insert(&word, rhymes);
        }
        Ok(table)
    }

    /// Number of words with an entry
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl RhymeLookup for StaticRhymeTable {
    fn query(&self, word: &str) -> std::result::Result<Vec<String>, LookupError> {
        Ok(self.table.get(word).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "static-table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_answers_nothing() {
        let table = StaticRhymeTable::new();
        assert_eq!(table.query("light").unwrap(), Vec::<String>::new());
        assert!(table.is_empty());
    }

    #[test]
    fn test_insert_dedups_and_lowercases() {
        let table = StaticRhymeTable::new().with("light", ["Night", "sight", "night", "light"]);
        assert_eq!(table.query("light").unwrap(), vec!["night", "sight"]);
    }

    #[test]
    fn test_symmetric_closure() {
        let table = StaticRhymeTable::new()
            .with("light", ["night", "sight"])
            .symmetric();

        assert_eq!(table.query("night").unwrap(), vec!["light", "sight"]);
        assert_eq!(table.query("sight").unwrap(), vec!["light", "night"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_from_json() {
        let table =
            StaticRhymeTable::from_json(r#"{"day": ["way", "play"], "light": ["night"]}"#).unwrap();
        assert_eq!(table.query("day").unwrap(), vec!["way", "play"]);
        assert_eq!(table.query("light").unwrap(), vec!["night"]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = StaticRhymeTable::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_trait_object() {
        let lookup: Box<dyn RhymeLookup> = Box::new(StaticRhymeTable::new());
        assert_eq!(lookup.name(), "static-table");
    }
}
