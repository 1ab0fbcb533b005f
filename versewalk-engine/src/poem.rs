//! Generated poem structure

use std::fmt;
use versewalk_core::GroupKey;

/// One rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Display text
    pub text: String,
    /// Walked tokens, lowercased, in reading order
    pub tokens: Vec<String>,
    /// Scheme label
    pub label: char,
    /// Rhyme group the line belongs to
    pub group: GroupKey,
    /// Required ending word
    pub ending: String,
    /// Token budget the line was rendered with
    pub target_length: usize,
}

impl Line {
    /// Number of walked tokens
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Consecutive lines printed as one block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stanza {
    /// Lines in poem order
    pub lines: Vec<Line>,
}

impl Stanza {
    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the stanza has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A generated poem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Poem {
    /// Stanzas in order
    pub stanzas: Vec<Stanza>,
}

impl Poem {
    /// Stanzas in order
    pub fn stanzas(&self) -> &[Stanza] {
        &self.stanzas
    }

    /// All lines in poem order
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.stanzas.iter().flat_map(|s| s.lines.iter())
    }

    /// Total number of lines
    pub fn line_count(&self) -> usize {
        self.stanzas.iter().map(Stanza::len).sum()
    }

    /// Number of stanzas
    pub fn stanza_count(&self) -> usize {
        self.stanzas.len()
    }

    /// Ending words in poem order
    pub fn endings(&self) -> Vec<&str> {
        self.lines().map(|l| l.ending.as_str()).collect()
    }
}

impl fmt::Display for Poem {
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
