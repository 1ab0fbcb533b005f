//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use versewalk_api::Output;

/// JSON formatter - the poem DTO, or the full output with metadata
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    include_metadata: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool, include_metadata: bool) -> Self {
        Self {
            writer,
            pretty,
            include_metadata,
        }
    }

    fn write_value<T: serde::Serialize>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn format_poem(&mut self, output: &Output) -> Result<()> {
        if self.include_metadata {
            self.write_value(output)
        } else {
            self.write_value(&output.poem)
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
