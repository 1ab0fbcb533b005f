//! List command implementation

use super::generate::OutputFormat;
use super::ListCommands;
use crate::config::CliConfig;
use crate::input::{resolve_patterns, CorpusRegistry};
use anyhow::Result;
use clap::ValueEnum;

/// Execute a list subcommand
pub fn execute(command: &ListCommands) -> Result<()> {
    match command {
        ListCommands::Corpora { config } => {
            let config = CliConfig::load_or_default(config.as_deref())?;
            let registry = CorpusRegistry::from_config(&config);
            if registry.is_empty() {
                println!("No corpora defined");
                return Ok(());
            }

            println!("Named corpora:");
            for (name, patterns) in registry.iter() {
                let files = resolve_patterns(patterns)
                    .map(|files| files.len())
                    .unwrap_or(0);
                println!("  {:<16} {} ({} files)", name, patterns.join(", "), files);
            }
        }
        ListCommands::Formats => {
            println!("Available output formats:");
            for format in OutputFormat::value_variants() {
                if let Some(value) = format.to_possible_value() {
                    println!(
                        "  {:<10} - {}",
                        value.get_name(),
                        value.get_help().map(|h| h.to_string()).unwrap_or_default()
                    );
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_formats() {
        assert!(execute(&ListCommands::Formats).is_ok());
    }

    #[test]
    fn test_list_corpora_from_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ode.txt"), "the golden light").unwrap();
        let config_path = dir.path().join("versewalk.toml");
        fs::write(&config_path, "[corpora]\nodes = \"*.txt\"\nmissing = \"none/*.txt\"\n").unwrap();

        let command = ListCommands::Corpora {
            config: Some(config_path),
        };
        assert!(execute(&command).is_ok());
    }
}
