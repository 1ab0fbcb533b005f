//! Configuration module
//!
//! The config file is TOML with four tables: `[generation]`, `[rhymes]`,
//! `[output]` and `[corpora]`. Every field has a default, so an empty file
//! is valid. Relative paths are resolved against the file's directory.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use versewalk_api::{
    AnchorSource, BoundaryPolicy, DEFAULT_LOOKUP_RETRIES, DEFAULT_MAX_ANCHOR_ATTEMPTS,
    DEFAULT_RETRY_BACKOFF,
};

/// Datamuse endpoint queried when no rhyme table is given
pub const DEFAULT_SERVICE_URL: &str = "https://api.datamuse.com/words";

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Rhyme source settings
    #[serde(default)]
    pub rhymes: RhymesConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Named corpora: name to one or more file patterns
    #[serde(default)]
    pub corpora: BTreeMap<String, CorpusPatterns>,

    /// Directory of the file this was loaded from
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Load and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse config text
    pub fn parse(content: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolve a path from the config file against its directory
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() && !base.as_os_str().is_empty() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Generation-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Scheme used when `--scheme` is not given
    pub scheme: Option<String>,

    /// Same token budget for every line
    pub length: usize,

    /// Explicit token budget per line; overrides `length`
    pub lengths: Option<Vec<usize>>,

    /// Random token budget `[min, max]` per line; overrides `length`
    pub length_range: Option<(usize, usize)>,

    /// Fixed number of lines per stanza
    pub stanza_size: Option<usize>,

    /// Scheme repetitions, each with fresh rhymes
    pub repeat: usize,

    /// Fixed random seed
    pub seed: Option<u64>,

    /// Anchor draws per rhyme group
    pub max_anchor_attempts: usize,

    /// Where rhyme anchors come from
    pub anchor_source: AnchorSource,

    /// What a walk does on an early boundary
    pub boundary_policy: BoundaryPolicy,

    /// Treat every corpus line break as a walk boundary
    pub line_breaks_are_boundaries: bool,

    /// End each stanza with a period
    pub punctuate: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            scheme: None,
            length: versewalk_core::DEFAULT_LINE_LENGTH,
            lengths: None,
            length_range: None,
            stanza_size: None,
            repeat: 1,
            seed: None,
            max_anchor_attempts: DEFAULT_MAX_ANCHOR_ATTEMPTS,
            anchor_source: AnchorSource::default(),
            boundary_policy: BoundaryPolicy::default(),
            line_breaks_are_boundaries: false,
            punctuate: true,
        }
    }
}

/// Rhyme-source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RhymesConfig {
    /// JSON rhyme table used instead of the web service
    pub table: Option<PathBuf>,

    /// Close the rhyme table under "rhymes with"
    pub symmetric: bool,

    /// Rhyme service endpoint
    pub service_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Also ask for near rhymes
    pub near_rhymes: bool,

    /// Maximum candidates per request
    pub max_results: usize,

    /// Retries after a transport failure
    pub lookup_retries: usize,

    /// Base delay between retries in milliseconds
    pub retry_backoff_ms: u64,
}

impl Default for RhymesConfig {
    fn default() -> Self {
        Self {
            table: None,
            symmetric: false,
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: 10,
            near_rhymes: true,
            max_results: 100,
            lookup_retries: DEFAULT_LOOKUP_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF.as_millis() as u64,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Include metadata in output
    pub include_metadata: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,

    /// Markdown title; the scheme is used when unset
    pub title: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            include_metadata: false,
            pretty_json: true,
            title: None,
        }
    }
}

/// File patterns of a named corpus
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorpusPatterns {
    /// A single path or glob
    One(String),
    /// Several paths or globs
    Many(Vec<String>),
}

impl CorpusPatterns {
    /// Patterns as a list
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            CorpusPatterns::One(pattern) => vec![pattern.clone()],
            CorpusPatterns::Many(patterns) => patterns.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config.generation.length, 7);
        assert_eq!(config.generation.repeat, 1);
        assert!(config.generation.punctuate);
        assert_eq!(config.rhymes.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.output.default_format, "text");
        assert!(config.corpora.is_empty());
    }

    #[test]
    fn test_defaults_match_engine() {
        let defaults = versewalk_api::Config::default();
        let engine = defaults.engine();
        let config = CliConfig::default();

        assert_eq!(
            config.generation.max_anchor_attempts,
            engine.max_anchor_attempts
        );
        assert_eq!(config.rhymes.lookup_retries, engine.lookup_retries);
        assert_eq!(
            Duration::from_millis(config.rhymes.retry_backoff_ms),
            engine.retry_backoff
        );
    }

    #[test]
    fn test_full_config() {
        let config = CliConfig::parse(
            r#"
[generation]
scheme = "abab/cdcd"
length_range = [4, 8]
stanza_size = 4
seed = 99
anchor_source = "vocabulary"
boundary_policy = "restart"

[rhymes]
table = "rhymes.json"
symmetric = true
near_rhymes = false

[output]
default_format = "markdown"
title = "Ode"

[corpora]
keats = "keats/*.txt"
romantics = ["keats/*.txt", "shelley/*.txt"]
"#,
        )
        .unwrap();

        assert_eq!(config.generation.scheme.as_deref(), Some("abab/cdcd"));
        assert_eq!(config.generation.length_range, Some((4, 8)));
        assert_eq!(config.generation.anchor_source, AnchorSource::Vocabulary);
        assert_eq!(config.generation.boundary_policy, BoundaryPolicy::Restart);
        assert!(config.rhymes.symmetric);
        assert!(!config.rhymes.near_rhymes);
        assert_eq!(config.output.title.as_deref(), Some("Ode"));
        assert_eq!(config.corpora["keats"].to_vec(), vec!["keats/*.txt"]);
        assert_eq!(config.corpora["romantics"].to_vec().len(), 2);
    }

    #[test]
    fn test_invalid_value_rejected() {
        let err = CliConfig::parse("[generation]\nboundary_policy = \"sideways\"").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_relative_paths_follow_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("versewalk.toml");
        fs::write(&path, "[rhymes]\ntable = \"rhymes.json\"\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        let table = config.rhymes.table.as_deref().unwrap();
        assert_eq!(config.resolve_path(table), dir.path().join("rhymes.json"));
        assert_eq!(
            config.resolve_path(Path::new("/abs/rhymes.json")),
            PathBuf::from("/abs/rhymes.json")
        );
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/versewalk.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
