//! versewalk command-line entry point

use anyhow::Result;
use clap::Parser;
use versewalk_cli::commands::Commands;

/// Generate rhyming poems by walking a corpus backwards from rhyme words
#[derive(Debug, Parser)]
#[command(name = "versewalk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    Cli::parse().command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_length_flags_conflict() {
        let parsed = Cli::try_parse_from([
            "versewalk", "generate", "--corpus", "ode.txt", "--length", "5", "--lengths", "5,6",
        ]);
        assert!(parsed.is_err());
    }
}
