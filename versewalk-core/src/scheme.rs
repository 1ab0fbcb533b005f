//! Rhyme-scheme planning
//!
//! A scheme such as `"abab/cdcd"` lists one label per line. Lines that share
//! a label (within one repetition of the scheme) form a rhyme group. `/` and
//! line breaks separate stanzas; spaces and tabs are ignored.

use crate::error::{CoreError, Result};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

/// Explicit stanza separator
pub const STANZA_SEPARATOR: char = '/';

/// Identity of a rhyme group: its label within one repetition of the scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    /// Scheme label
    pub label: char,
    /// Zero-based repetition of the scheme
    pub round: usize,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.round == 0 {
            write!(f, "'{}'", self.label)
        } else {
            write!(f, "'{}' (repeat {})", self.label, self.round + 1)
        }
    }
}

/// Lines that must end in mutually rhyming words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RhymeGroup {
    /// Group identity
    pub key: GroupKey,
    /// Poem line indices, ascending
    pub lines: Vec<usize>,
}

impl RhymeGroup {
    /// Number of lines in the group
    pub fn size(&self) -> usize {
        self.lines.len()
    }
}

/// One line slot of the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedLine {
    /// Poem line index
    pub index: usize,
    /// Scheme label
    pub label: char,
    /// Index into [`SchemePlan::groups`]
    pub group: usize,
}

/// Layout options applied on top of the scheme string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanOptions {
    /// How many times the scheme is repeated, each with fresh rhymes
    pub repeat: usize,
    /// Fixed lines per stanza; overrides separators in the scheme
    pub stanza_size: Option<usize>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            repeat: 1,
            stanza_size: None,
        }
    }
}

/// Parse a scheme into `(line_index, label)` pairs
pub fn parse(scheme: &str) -> Result<Vec<(usize, char)>> {
    Ok(parse_stanzas(scheme)?
        .into_iter()
        .flatten()
        .enumerate()
        .collect())
}

/// Parse a scheme into labels grouped by stanza
pub fn parse_stanzas(scheme: &str) -> Result<Vec<Vec<char>>> {
    let mut stanzas = Vec::new();
    let mut current = Vec::new();

    for ch in scheme.chars() {
        if ch == STANZA_SEPARATOR || ch == '\n' || ch == '\r' {
            if !current.is_empty() {
                stanzas.push(std::mem::take(&mut current));
            }
        } else if !ch.is_whitespace() {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        stanzas.push(current);
    }

    if stanzas.is_empty() {
        return Err(CoreError::InvalidScheme {
            reason: format!("'{}' contains no line labels", scheme.escape_default()),
        });
    }
    Ok(stanzas)
}

/// Resolved line slots, rhyme groups and stanza layout for one poem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemePlan {
    lines: Vec<PlannedLine>,
    groups: Vec<RhymeGroup>,
    stanza_starts: Vec<usize>,
}

impl SchemePlan {
    /// Plan a scheme with default options
    pub fn new(scheme: &str) -> Result<Self> {
        Self::with_options(scheme, &PlanOptions::default())
    }

    /// Plan a scheme
    pub fn with_options(scheme: &str, options: &PlanOptions) -> Result<Self> {
        if options.repeat == 0 {
            return Err(CoreError::InvalidScheme {
                reason: "repeat count must be at least 1".to_string(),
            });
        }
        if options.stanza_size == Some(0) {
            return Err(CoreError::InvalidLength {
                reason: "stanza size must be at least 1".to_string(),
            });
        }

        let stanzas = parse_stanzas(scheme)?;
        let mut lines = Vec::new();
        let mut groups: Vec<RhymeGroup> = Vec::new();
        let mut group_index: HashMap<GroupKey, usize> = HashMap::new();
        let mut stanza_starts = Vec::new();

        for round in 0..options.repeat {
            for stanza in &stanzas {
                stanza_starts.push(lines.len());
                for &label in stanza {
                    let index = lines.len();
                    let key = GroupKey { label, round };
                    let group = *group_index.entry(key).or_insert_with(|| {
                        groups.push(RhymeGroup {
                            key,
                            lines: Vec::new(),
                        });
                        groups.len() - 1
                    });
                    groups[group].lines.push(index);
                    lines.push(PlannedLine {
                        index,
                        label,
                        group,
                    });
                }
            }
        }

        if let Some(size) = options.stanza_size {
            stanza_starts = (0..lines.len()).step_by(size).collect();
        }

        Ok(Self {
            lines,
            groups,
            stanza_starts,
        })
    }

    /// Line slots in poem order
    pub fn lines(&self) -> &[PlannedLine] {
        &self.lines
    }

    /// Rhyme groups in order of first appearance
    pub fn groups(&self) -> &[RhymeGroup] {
        &self.groups
    }

    /// First line index of every stanza
    pub fn stanza_starts(&self) -> &[usize] {
        &self.stanza_starts
    }

    /// Total number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of stanzas
    pub fn stanza_count(&self) -> usize {
        self.stanza_starts.len()
    }

    /// Line index ranges of every stanza
    pub fn stanza_ranges(&self) -> Vec<Range<usize>> {
        self.stanza_starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = self
                    .stanza_starts
                    .get(i + 1)
                    .copied()
                    .unwrap_or(self.lines.len());
                start..end
            })
            .collect()
    }

    /// Whether `line` is the last line of its stanza
    pub fn ends_stanza(&self, line: usize) -> bool {
        line + 1 == self.lines.len() || self.stanza_starts.binary_search(&(line + 1)).is_ok()
    }

    /// Rhyme group of a line
    pub fn group_of(&self, line: usize) -> &RhymeGroup {
        &self.groups[self.lines[line].group]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!(
            parse("aabb").unwrap(),
            vec![(0, 'a'), (1, 'a'), (2, 'b'), (3, 'b')]
        );
    }

    #[test]
    fn test_parse_skips_separators() {
        assert_eq!(
            parse("ab/ba").unwrap(),
            vec![(0, 'a'), (1, 'b'), (2, 'b'), (3, 'a')]
        );
    }

    #[test]
    fn test_parse_stanzas() {
        assert_eq!(
            parse_stanzas("aa / bb\n\ncc//").unwrap(),
            vec![vec!['a', 'a'], vec!['b', 'b'], vec!['c', 'c']]
        );
    }

    #[test]
    fn test_empty_scheme_rejected() {
        assert!(matches!(parse(""), Err(CoreError::InvalidScheme { .. })));
        assert!(matches!(parse(" / \n"), Err(CoreError::InvalidScheme { .. })));
    }

    #[test]
    fn test_groups_partition_lines() {
        let plan = SchemePlan::new("abab/cdcd/ee").unwrap();
        assert_eq!(plan.line_count(), 10);
        assert_eq!(plan.groups().len(), 5);

        let mut seen: Vec<usize> = plan
            .groups()
            .iter()
            .flat_map(|g| g.lines.iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());

        assert_eq!(plan.groups()[0].lines, vec![0, 2]);
        assert_eq!(plan.groups()[1].lines, vec![1, 3]);
        assert_eq!(plan.group_of(9).key.label, 'e');
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let plan = SchemePlan::new("aA").unwrap();
        assert_eq!(plan.groups().len(), 2);
    }

    #[test]
    fn test_stanzas_from_separators() {
        let plan = SchemePlan::new("aaaa/bbbb/cccc").unwrap();
        assert_eq!(plan.stanza_starts(), &[0, 4, 8]);
        assert_eq!(plan.stanza_ranges(), vec![0..4, 4..8, 8..12]);
        assert!(plan.ends_stanza(3));
        assert!(!plan.ends_stanza(4));
        assert!(plan.ends_stanza(11));
    }

    #[test]
    fn test_stanza_size_overrides_separators() {
        let options = PlanOptions {
            repeat: 1,
            stanza_size: Some(4),
        };
        let plan = SchemePlan::with_options("aa/bb/cc/dd", &options).unwrap();
        assert_eq!(plan.stanza_count(), 2);
        assert_eq!(plan.stanza_ranges(), vec![0..4, 4..8]);
    }

    #[test]
    fn test_uneven_stanza_size() {
        let options = PlanOptions {
            repeat: 1,
            stanza_size: Some(4),
        };
        let plan = SchemePlan::with_options("aabba", &options).unwrap();
        assert_eq!(plan.stanza_ranges(), vec![0..4, 4..5]);
    }

    #[test]
    fn test_repeat_gets_fresh_groups() {
        let options = PlanOptions {
            repeat: 3,
            stanza_size: None,
        };
        let plan = SchemePlan::with_options("abab", &options).unwrap();
        assert_eq!(plan.line_count(), 12);
        assert_eq!(plan.groups().len(), 6);
        assert_eq!(plan.stanza_count(), 3);
        assert_eq!(plan.group_of(4).key, GroupKey { label: 'a', round: 1 });
    }

    #[test]
    fn test_invalid_options() {
        let zero_repeat = PlanOptions {
            repeat: 0,
            stanza_size: None,
        };
        assert!(SchemePlan::with_options("aa", &zero_repeat).is_err());

        let zero_stanza = PlanOptions {
            repeat: 1,
            stanza_size: Some(0),
        };
        assert!(matches!(
            SchemePlan::with_options("aa", &zero_stanza),
            Err(CoreError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_group_key_display() {
        assert_eq!(GroupKey { label: 'a', round: 0 }.to_string(), "'a'");
        assert_eq!(
            GroupKey { label: 'b', round: 1 }.to_string(),
            "'b' (repeat 2)"
        );
    }
}
