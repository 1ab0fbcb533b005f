//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use versewalk_api::Output;

/// Plain text formatter - one line per verse, blank line between stanzas
pub struct TextFormatter<W: Write> {
    writer: W,
    include_metadata: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, include_metadata: bool) -> Self {
        Self {
            writer,
            include_metadata,
        }
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn format_poem(&mut self, output: &Output) -> Result<()> {
        write!(self.writer, "{}", output.poem)?;
        if self.include_metadata {
            let meta = &output.metadata;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "# seed {} | {} lines | {} rhyme lookups via {}",
                meta.seed, meta.line_count, meta.lookup_calls, meta.rhyme_source
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
