//! Corpus name resolution
//!
//! `--corpus keats` looks `keats` up in the config file's `[corpora]` table.
//! Identifiers that are not registered are used as paths or glob patterns.

use super::glob_resolver::resolve_patterns;
use crate::config::CliConfig;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Named corpora from the config file
#[derive(Debug, Default)]
pub struct CorpusRegistry {
    entries: BTreeMap<String, Vec<String>>,
}

impl CorpusRegistry {
    /// Build the registry; relative patterns follow the config file
    pub fn from_config(config: &CliConfig) -> Self {
        let entries = config
            .corpora
            .iter()
            .map(|(name, patterns)| {
                let patterns = patterns
                    .to_vec()
                    .into_iter()
                    .map(|p| {
                        config
                            .resolve_path(Path::new(&p))
                            .to_string_lossy()
                            .into_owned()
                    })
                    .collect();
                (name.clone(), patterns)
            })
            .collect();

        Self { entries }
    }

    /// Patterns for one identifier
    pub fn patterns_for(&self, id: &str) -> Vec<String> {
        match self.entries.get(id) {
            Some(patterns) => patterns.clone(),
            None => vec![id.to_string()],
        }
    }

    /// Files of all identifiers, sorted and deduplicated
    pub fn resolve(&self, ids: &[String]) -> Result<Vec<PathBuf>> {
        let patterns: Vec<String> = ids.iter().flat_map(|id| self.patterns_for(id)).collect();
        resolve_patterns(&patterns)
    }

    /// Registered corpora in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.entries
            .iter()
            .map(|(name, patterns)| (name.as_str(), patterns.as_slice()))
    }

    /// Whether no corpus is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
