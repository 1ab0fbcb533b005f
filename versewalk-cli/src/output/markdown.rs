//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use versewalk_api::Output;

/// Markdown formatter - title header, stanzas as blocks with hard line breaks
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    title: Option<String>,
    include_metadata: bool,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter; the scheme is the default title
    pub fn new(writer: W, title: Option<String>, include_metadata: bool) -> Self {
        Self {
            writer,
            title,
            include_metadata,
        }
    }
}

impl<W: Write + Send> OutputFormatter for MarkdownFormatter<W> {
    fn format_poem(&mut self, output: &Output) -> Result<()> {
        let title = self
            .title
            .clone()
            .unwrap_or_else(|| format!("A poem in {}", output.poem.scheme));
        writeln!(self.writer, "## {title}")?;

        for stanza in &output.poem.stanzas {
            writeln!(self.writer)?;
            let last = stanza.lines.len().saturating_sub(1);
            for (i, line) in stanza.lines.iter().enumerate() {
                let hard_break = if i < last { "  " } else { "" };
                writeln!(self.writer, "{}{hard_break}", line.text)?;
            }
        }

        if self.include_metadata {
            let meta = &output.metadata;
            writeln!(self.writer)?;
            writeln!(self.writer, "---")?;
            writeln!(
                self.writer,
                "*Seed {}, {} lines in {} stanzas*",
                meta.seed, meta.line_count, meta.stanza_count
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
