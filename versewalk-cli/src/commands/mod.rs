//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

pub mod generate;
pub mod generate_config;
pub mod list;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a rhyming poem from one or more corpora
    Generate(generate::GenerateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate a configuration file
    Validate(validate::ValidateArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List named corpora from a configuration file
    Corpora {
        /// Configuration file
        #[arg(short, long, value_name = "FILE", env = "VERSEWALK_CONFIG")]
        config: Option<PathBuf>,
    },

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Generate(args) => args.execute(),
            Commands::List { subcommand } => list::execute(&subcommand),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}
