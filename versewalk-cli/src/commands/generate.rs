//! Generate command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{CorpusRegistry, FileReader};
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use crate::rhyme_service::DatamuseClient;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use versewalk_api::{Config, ConfigBuilder, Input, PoemGenerator, RhymeLookup, StaticRhymeTable};

/// Arguments for the generate command
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Rhyme scheme, one label per line; `/` separates stanzas
    #[arg(short, long, value_name = "SCHEME")]
    pub scheme: Option<String>,

    /// Corpus name from the config file, or file paths/patterns (supports glob)
    #[arg(long, value_name = "NAME/PATTERN", required = true, num_args = 1..)]
    pub corpus: Vec<String>,

    /// Maximum tokens per line
    #[arg(short, long, value_name = "N", conflicts_with_all = ["lengths", "length_range"])]
    pub length: Option<usize>,

    /// Maximum tokens for each line, comma separated
    #[arg(long, value_name = "N,N,...", value_delimiter = ',', conflicts_with = "length_range")]
    pub lengths: Option<Vec<usize>>,

    /// Random maximum per line, inclusive (e.g. 4..8)
    #[arg(long, value_name = "MIN..MAX", value_parser = parse_length_range)]
    pub length_range: Option<(usize, usize)>,

    /// Lines per stanza, overriding separators in the scheme
    #[arg(long, value_name = "N")]
    pub stanza_size: Option<usize>,

    /// Repeat the scheme with fresh rhymes
    #[arg(long, value_name = "N")]
    pub repeat: Option<usize>,

    /// Random seed for reproducible poems
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// JSON rhyme table used instead of the rhyme service
    #[arg(long, value_name = "FILE", conflicts_with = "offline")]
    pub rhymes_file: Option<PathBuf>,

    /// Never contact the rhyme service
    #[arg(long)]
    pub offline: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Markdown title
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Include generation metadata in the output
    #[arg(long)]
    pub metadata: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "VERSEWALK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, stanzas separated by blank lines
    Text,
    /// JSON poem with stanzas and lines
    Json,
    /// Markdown formatted output
    Markdown,
}

impl OutputFormat {
    /// Parse a format name from the config file
    pub fn from_name(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true)
            .map_err(|_| CliError::ConfigError(format!("unknown output format '{name}'")).into())
    }
}

/// Parse `MIN..MAX` (or `MIN-MAX`) into an inclusive range
pub fn parse_length_range(value: &str) -> std::result::Result<(usize, usize), String> {
    let (min, max) = value
        .split_once("..")
        .or_else(|| value.split_once('-'))
        .ok_or_else(|| format!("expected MIN..MAX, got '{value}'"))?;
    let max = max.strip_prefix('=').unwrap_or(max);

    let min: usize = min
        .trim()
        .parse()
        .map_err(|_| format!("invalid minimum '{min}'"))?;
    let max: usize = max
        .trim()
        .parse()
        .map_err(|_| format!("invalid maximum '{max}'"))?;
    if min > max {
        return Err(format!("minimum {min} exceeds maximum {max}"));
    }
    Ok((min, max))
}

/// Builder preloaded with the config file's generation and retry settings
pub fn config_builder(config: &CliConfig) -> ConfigBuilder {
    let generation = &config.generation;
    let builder = Config::builder()
        .stanza_size(generation.stanza_size)
        .repeat(generation.repeat)
        .seed(generation.seed)
        .max_anchor_attempts(generation.max_anchor_attempts)
        .anchor_source(generation.anchor_source)
        .boundary_policy(generation.boundary_policy)
        .line_breaks_are_boundaries(generation.line_breaks_are_boundaries)
        .punctuate(generation.punctuate)
        .lookup_retries(config.rhymes.lookup_retries)
        .retry_backoff(Duration::from_millis(config.rhymes.retry_backoff_ms));

    match (&generation.lengths, generation.length_range) {
        (Some(lengths), _) => builder.lengths(lengths.clone()),
        (None, Some((min, max))) => builder.length_range(min, max),
        (None, None) => builder.length(generation.length),
    }
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting poem generation");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let scheme = self
            .scheme
            .clone()
            .or_else(|| config.generation.scheme.clone())
            .ok_or(CliError::MissingScheme)?;

        let lookup = self.build_lookup(&config)?;
        let generator = PoemGenerator::with_config(self.build_config(&config)?, lookup)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let files = CorpusRegistry::from_config(&config).resolve(&self.corpus)?;
        log::info!("Reading {} corpus file(s)", files.len());

        let mut progress = ProgressReporter::new(self.quiet);
        let corpus = FileReader::read_corpus(&files, &mut progress)?;
        let model = generator
            .load_corpus(Input::from_text(corpus))
            .context("Failed to build corpus model")?;

        progress.start_generation(&scheme);
        let result = generator.generate_from_model(&scheme, &model);
        progress.finish();
        let output = result.map_err(|e| CliError::GenerationError(e.to_string()))?;

        log::info!(
            "Generated {} lines with seed {} ({} rhyme lookups)",
            output.metadata.line_count,
            output.metadata.seed,
            output.metadata.lookup_calls
        );

        let mut formatter = self.create_formatter(&config)?;
        formatter.format_poem(&output)?;
        formatter.finish()?;

        Ok(())
    }

    /// Merge command-line flags over the config file
    fn build_config(&self, config: &CliConfig) -> Result<Config> {
        let mut builder = config_builder(config);

        if let Some(length) = self.length {
            builder = builder.length(length);
        } else if let Some(lengths) = &self.lengths {
            builder = builder.lengths(lengths.clone());
        } else if let Some((min, max)) = self.length_range {
            builder = builder.length_range(min, max);
        }
        if self.stanza_size.is_some() {
            builder = builder.stanza_size(self.stanza_size);
        }
        if let Some(repeat) = self.repeat {
            builder = builder.repeat(repeat);
        }
        if self.seed.is_some() {
            builder = builder.seed(self.seed);
        }
        if self.uses_static_table(config) {
            builder = builder.offline();
        }

        builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    fn uses_static_table(&self, config: &CliConfig) -> bool {
        self.offline || self.rhymes_file.is_some() || config.rhymes.table.is_some()
    }

    /// Rhyme table if one is configured, the rhyme service otherwise
    fn build_lookup(&self, config: &CliConfig) -> Result<Arc<dyn RhymeLookup>> {
        let table_path = self.rhymes_file.clone().or_else(|| {
            config
                .rhymes
                .table
                .as_deref()
                .map(|path| config.resolve_path(path))
        });

        if let Some(path) = table_path {
            let json = FileReader::read_text(&path)?;
            let mut table = StaticRhymeTable::from_json(&json)
                .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
            if config.rhymes.symmetric {
                table = table.symmetric();
            }
            log::info!(
                "Using rhyme table {} ({} entries)",
                path.display(),
                table.len()
            );
            return Ok(Arc::new(table));
        }

        if self.offline {
            log::info!("Offline: only unrhymed schemes can be satisfied");
            return Ok(Arc::new(StaticRhymeTable::new()));
        }

        log::info!("Using rhyme service {}", config.rhymes.service_url);
        Ok(Arc::new(DatamuseClient::new(&config.rhymes)?))
    }

    fn create_formatter(&self, config: &CliConfig) -> Result<Box<dyn OutputFormatter>> {
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_name(&config.output.default_format)?,
        };

        let writer: Box<dyn Write + Send> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        let include_metadata = self.metadata || config.output.include_metadata;
        Ok(match format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer, include_metadata)),
            OutputFormat::Json => Box::new(JsonFormatter::new(
                writer,
                config.output.pretty_json,
                include_metadata,
            )),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(
                writer,
                self.title.clone().or_else(|| config.output.title.clone()),
                include_metadata,
            )),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use versewalk_api::{BoundaryPolicy, LengthPolicy};

    fn args() -> GenerateArgs {
        GenerateArgs {
            scheme: Some("aabb".to_string()),
            corpus: vec!["ode.txt".to_string()],
            length: None,
            lengths: None,
            length_range: None,
            stanza_size: None,
            repeat: None,
            seed: None,
            rhymes_file: None,
            offline: false,
            format: None,
            output: None,
            title: None,
            metadata: false,
            config: None,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_parse_length_range() {
        assert_eq!(parse_length_range("4..8"), Ok((4, 8)));
        assert_eq!(parse_length_range("4..=8"), Ok((4, 8)));
        assert_eq!(parse_length_range("3-5"), Ok((3, 5)));
        assert!(parse_length_range("8..4").is_err());
        assert!(parse_length_range("eight").is_err());
    }

    #[test]
    fn test_output_format_from_name() {
        assert_eq!(OutputFormat::from_name("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_name("yaml").is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let config = CliConfig::parse(
            "[generation]\nlength = 5\nrepeat = 3\nboundary_policy = \"restart\"\n",
        )
        .unwrap();

        let built = args().build_config(&config).unwrap();
        assert_eq!(built.engine().length, LengthPolicy::Fixed(5));
        assert_eq!(built.engine().plan.repeat, 3);
        assert_eq!(built.engine().boundary_policy, BoundaryPolicy::Restart);
        assert_eq!(built.engine().lookup_retries, 2);

        let overridden = GenerateArgs {
            length_range: Some((2, 4)),
            repeat: Some(1),
            seed: Some(7),
            offline: true,
            ..args()
        }
        .build_config(&config)
        .unwrap();
        assert_eq!(
            overridden.engine().length,
            LengthPolicy::Range { min: 2, max: 4 }
        );
        assert_eq!(overridden.engine().plan.repeat, 1);
        assert_eq!(overridden.seed(), Some(7));
        assert_eq!(overridden.engine().lookup_retries, 0);
    }

    #[test]
    fn test_invalid_merge_is_config_error() {
        let err = GenerateArgs {
            length: Some(0),
            ..args()
        }
        .build_config(&CliConfig::default())
        .unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_offline_lookup_is_static() {
        let lookup = GenerateArgs {
            offline: true,
            ..args()
        }
        .build_lookup(&CliConfig::default())
        .unwrap();
        assert_eq!(lookup.name(), "static-table");
    }
}
