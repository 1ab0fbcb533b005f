//! Data Transfer Objects for API

use crate::error::{ApiError, Result};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use versewalk_engine::{BoundaryPolicy, Poem};

/// Separator placed between documents read from several sources
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Corpus source
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// Raw text string
    Text(String),
    /// File path
    File(PathBuf),
    /// Several files read as one corpus
    Files(Vec<PathBuf>),
    /// Raw bytes (UTF-8)
    Bytes(Vec<u8>),
    /// Reader (not serializable)
    #[cfg_attr(feature = "serde", serde(skip))]
    Reader(Box<dyn Read>),
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Files(paths) => f.debug_tuple("Files").field(paths).finish(),
            Input::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<dyn Read>").finish(),
        }
    }
}

impl Input {
    /// Create input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Create input from file path
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    /// Create input from several files
    pub fn from_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Input::Files(paths.into_iter().map(Into::into).collect())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Read the corpus text
    ///
    /// Files are joined with a blank line so the end of one document never
    /// runs into the start of the next.
    pub fn read_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => fs::read_to_string(&path).map_err(ApiError::Io),
            Input::Files(paths) => {
                if paths.is_empty() {
                    return Err(ApiError::Config("no corpus files given".to_string()));
                }
                let documents = paths
                    .iter()
                    .map(fs::read_to_string)
                    .collect::<std::io::Result<Vec<_>>>()?;
                Ok(documents.join(DOCUMENT_SEPARATOR))
            }
            Input::Bytes(bytes) => String::from_utf8(bytes).map_err(ApiError::Utf8),
            Input::Reader(mut reader) => {
                let mut buffer = String::new();
                reader.read_to_string(&mut buffer).map_err(ApiError::Io)?;
                Ok(buffer)
            }
        }
    }
}

/// One rendered line (serializable DTO)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineDTO {
    /// Display text
    pub text: String,
    /// Scheme label
    pub label: char,
    /// Zero-based repetition of the scheme the line belongs to
    pub round: usize,
    /// Ending word
    pub ending: String,
    /// Walked tokens
    pub tokens: Vec<String>,
    /// Token budget of the line
    pub target_length: usize,
}

/// One stanza (serializable DTO)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StanzaDTO {
    /// Lines in order
    pub lines: Vec<LineDTO>,
}

/// A generated poem (serializable DTO)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoemDTO {
    /// Scheme the poem was generated from
    pub scheme: String,
    /// Stanzas in order
    pub stanzas: Vec<StanzaDTO>,
}

impl PoemDTO {
    /// Convert an engine poem
    pub fn from_poem(scheme: &str, poem: Poem) -> Self {
        let stanzas = poem
            .stanzas
            .into_iter()
            .map(|stanza| StanzaDTO {
                lines: stanza
                    .lines
                    .into_iter()
                    .map(|line| LineDTO {
                        text: line.text,
                        label: line.label,
                        round: line.group.round,
                        ending: line.ending,
                        tokens: line.tokens,
                        target_length: line.target_length,
                    })
                    .collect(),
            })
            .collect();

        Self {
            scheme: scheme.to_string(),
            stanzas,
        }
    }

    /// All lines in order
    pub fn lines(&self) -> impl Iterator<Item = &LineDTO> + '_ {
        self.stanzas.iter().flat_map(|s| s.lines.iter())
    }

    /// Total number of lines
    pub fn line_count(&self) -> usize {
        self.stanzas.iter().map(|s| s.lines.len()).sum()
    }
}

impl fmt::Display for PoemDTO {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stanza) in self.stanzas.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for line in &stanza.lines {
                writeln!(f, "{}", line.text)?;
            }
        }
        Ok(())
    }
}

/// Generation metadata with run statistics
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Seed that reproduces this poem
    pub seed: u64,
    /// Number of lines
    pub line_count: usize,
    /// Number of stanzas
    pub stanza_count: usize,
    /// Rhyme groups resolved
    pub rhyme_groups: usize,
    /// Calls that reached the rhyme lookup
    pub lookup_calls: usize,
    /// Name of the rhyme lookup
    pub rhyme_source: String,
    /// Boundary policy used by the walks
    pub boundary_policy: BoundaryPolicy,
    /// Distinct corpus words
    pub corpus_words: usize,
    /// Tokens read from the corpus
    pub corpus_tokens: usize,
    /// Generation time in milliseconds
    pub processing_time_ms: u64,
}

/// Complete output with poem and metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Output {
    /// Generated poem
    pub poem: PoemDTO,
    /// Generation metadata
    pub metadata: Metadata,
}

impl Output {
    /// Poem as plain text
    pub fn text(&self) -> String {
        self.poem.to_string()
    }
}
