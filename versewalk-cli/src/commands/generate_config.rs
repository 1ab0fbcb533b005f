//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

const TEMPLATE: &str = r#"# versewalk configuration
#
# Every key is optional. Relative paths are resolved against the
# directory of this file.

[generation]
# Scheme used when --scheme is not given. One label per line; lines that
# share a label rhyme, `/` starts a new stanza.
scheme = "abab/cdcd"

# Maximum tokens per line. Use `lengths` for one value per line, or
# `length_range = [min, max]` for a random value per line.
length = 7
# lengths = [8, 6, 8, 6, 8, 6, 8, 6]
# length_range = [5, 9]

# Lines per stanza; overrides `/` separators in the scheme.
# stanza_size = 4

# Repeat the scheme, each copy with fresh rhymes.
repeat = 1

# Fixed seed for reproducible poems.
# seed = 42

# Anchor draws per rhyme group before giving up.
max_anchor_attempts = 20

# Where anchors come from: "line_endings" or "vocabulary".
anchor_source = "line_endings"

# On an early sentence boundary: "stop" the line, or "restart" from a
# random word.
boundary_policy = "stop"

# Treat every corpus line break as a boundary (verse corpora).
line_breaks_are_boundaries = false

# End each stanza with a period.
punctuate = true

[rhymes]
# JSON object mapping a word to its rhymes. When set, the rhyme service
# is never contacted.
# table = "rhymes.json"
# Also record each rhyme as rhyming back.
symmetric = false

service_url = "https://api.datamuse.com/words"
timeout_secs = 10
near_rhymes = true
max_results = 100
lookup_retries = 2
retry_backoff_ms = 250

[output]
# "text", "json" or "markdown"
default_format = "text"
include_metadata = false
pretty_json = true
# title = "Ode"

[corpora]
# Names usable with --corpus, each one pattern or a list of patterns.
# keats = "corpora/keats/*.txt"
# romantics = ["corpora/keats/*.txt", "corpora/shelley/*.txt"]
"#;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Register your corpora under [corpora]");
        println!("2. Validate your configuration:");
        println!("   versewalk validate -c {}", self.output.display());
        println!("3. Generate a poem:");
        println!(
            "   versewalk generate --config {} --corpus <NAME>",
            self.output.display()
        );

        Ok(())
    }

    /// Commented template with every default spelled out
    pub fn generate_template(&self) -> String {
        TEMPLATE.to_string()
    }
}
