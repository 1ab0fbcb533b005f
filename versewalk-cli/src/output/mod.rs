//! Output formatting module

use anyhow::Result;
use versewalk_api::Output;

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Format and output a generated poem
    fn format_poem(&mut self, output: &Output) -> Result<()>;

    /// Finalize output (e.g., flush, write trailers)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
