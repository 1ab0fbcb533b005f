//! Validate command implementation

use super::generate::{config_builder, OutputFormat};
use crate::config::CliConfig;
use crate::input::{resolve_patterns, CorpusRegistry, FileReader};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use versewalk_api::StaticRhymeTable;
use versewalk_core::{PlanOptions, SchemePlan};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,

    /// Scheme to check against the config (default: generation.scheme)
    #[arg(short, long, value_name = "SCHEME")]
    pub scheme: Option<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let config = match CliConfig::load(&self.config) {
            Ok(config) => config,
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                return Err(anyhow::anyhow!("Validation failed: {e}"));
            }
        };

        let mut problems = Vec::new();
        let mut notes = Vec::new();

        if let Err(e) = config_builder(&config).build() {
            problems.push(e.to_string());
        }
        if let Err(e) = OutputFormat::from_name(&config.output.default_format) {
            problems.push(e.to_string());
        }

        if let Some(table) = &config.rhymes.table {
            let path = config.resolve_path(table);
            match FileReader::read_text(&path)
                .and_then(|json| StaticRhymeTable::from_json(&json).map_err(Into::into))
            {
                Ok(table) => notes.push(format!("Rhyme table: {} entries", table.len())),
                Err(e) => problems.push(format!("rhyme table {}: {e}", path.display())),
            }
        } else {
            notes.push(format!("Rhyme service: {}", config.rhymes.service_url));
        }

        for (name, patterns) in CorpusRegistry::from_config(&config).iter() {
            match resolve_patterns(patterns) {
                Ok(files) => notes.push(format!("Corpus '{name}': {} files", files.len())),
                Err(e) => problems.push(format!("corpus '{name}': {e}")),
            }
        }

        if let Some(scheme) = self.scheme.as_ref().or(config.generation.scheme.as_ref()) {
            let options = PlanOptions {
                repeat: config.generation.repeat.max(1),
                stanza_size: config.generation.stanza_size.filter(|&size| size > 0),
            };
            match SchemePlan::with_options(scheme, &options) {
                Ok(plan) => {
                    notes.push(format!(
                        "Scheme '{scheme}': {} lines, {} stanzas, {} rhyme groups",
                        plan.line_count(),
                        plan.stanza_count(),
                        plan.groups().len()
                    ));
                    if let Some(lengths) = &config.generation.lengths {
                        if lengths.len() != plan.line_count() {
                            problems.push(format!(
                                "generation.lengths has {} entries but the scheme has {} lines",
                                lengths.len(),
                                plan.line_count()
                            ));
                        }
                    }
                }
                Err(e) => problems.push(format!("scheme '{scheme}': {e}")),
            }
        }

        if problems.is_empty() {
            println!("✓ Configuration is valid!");
            for note in &notes {
                println!("  {note}");
            }
            Ok(())
        } else {
            println!("✗ Configuration is invalid!");
            for problem in &problems {
                println!("  Error: {problem}");
            }
            Err(anyhow::anyhow!(
                "Validation failed: {} problem(s)",
                problems.len()
            ))
        }
    }
}
