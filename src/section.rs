//! Agent output model.
//!
//! The monitored host's agent prints one table per plugin, each introduced
//! by a `<<<section_name>>>` header line:
//!
//! ```text
//! <<<asterisk_registry>>>
//! 22384668@sip2sip.info:5060	Registered
//! <<<asterisk_channels>>>
//! Channel              Location             State   Application(Data)
//! SIP/6001-00000001    (None)               Up      Playback(demo-congrats)
//! 1 active channel
//! ```
//!
//! [`AgentOutput::parse`] splits such text into named sections and tokenizes
//! every row into a [`StringTable`]. Rows are split on whitespace unless the
//! header carries a `:sep(N)` option, in which case they are split on the
//! character with code `N` and every token is trimmed.

use std::collections::BTreeMap;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::ParseError;

/// Rows of string tokens, one row per agent output line.
pub type StringTable = Vec<Vec<String>>;

/// All sections found in one agent output snapshot, keyed by section name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentOutput {
    sections: BTreeMap<String, StringTable>,
}

impl AgentOutput {
    /// Split raw agent output into sections.
    ///
    /// Lines before the first header and blank lines are dropped. A header
    /// that repeats appends to the section already collected under that name.
    /// Piggybacked data (from a `<<<<host>>>>` marker up to `<<<<>>>>`)
    /// belongs to another host and is skipped.
    pub fn parse(content: &str) -> Self {
        let mut sections: BTreeMap<String, StringTable> = BTreeMap::new();
        let mut current: Option<(String, Option<char>)> = None;
        let mut piggyback = false;

        for line in content.lines() {
            if let Some(host) = parse_piggyback_marker(line) {
                piggyback = !host.is_empty();
                current = None;
                continue;
            }
            if piggyback {
                continue;
            }

            if let Some(header) = parse_header(line) {
                sections.entry(header.0.clone()).or_default();
                current = Some(header);
                continue;
            }

            let Some((name, separator)) = &current else {
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }

            let row: Vec<String> = match separator {
                Some(sep) => line.split(*sep).map(|t| t.trim().to_string()).collect(),
                None => line.split_whitespace().map(str::to_string).collect(),
            };
            if let Some(table) = sections.get_mut(name) {
                table.push(row);
            }
        }

        Self { sections }
    }

    /// Get the table of a section.
    pub fn section(&self, name: &str) -> Option<&StringTable> {
        self.sections.get(name)
    }

    /// Iterate over all sections in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StringTable)> {
        self.sections.iter()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Parse `<<<name>>>` or `<<<name:opt:opt>>>` into the section name and
/// an optional field separator.
fn parse_header(line: &str) -> Option<(String, Option<char>)> {
    let inner = line.trim().strip_prefix("<<<")?.strip_suffix(">>>")?;
    let mut parts = inner.split(':');
    let name = parts.next().filter(|n| !n.is_empty() && !n.starts_with('<'))?;

    let separator = parts
        .filter_map(|opt| opt.strip_prefix("sep(")?.strip_suffix(')')?.parse::<u32>().ok())
        .filter_map(char::from_u32)
        .last();

    Some((name.to_string(), separator))
}

/// Host name of a `<<<<host>>>>` piggyback marker; empty for the closing
/// `<<<<>>>>`.
fn parse_piggyback_marker(line: &str) -> Option<&str> {
    let host = line.trim().strip_prefix("<<<<")?.strip_suffix(">>>>")?;
    (!host.contains(['<', '>'])).then_some(host)
}

/// Positional access to the tokens of one row, with errors that name the
/// section and row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    section: &'static str,
    row: usize,
    tokens: &'a [String],
}

impl<'a> Fields<'a> {
    pub(crate) fn new(section: &'static str, row: usize, tokens: &'a [String]) -> Self {
        Self {
            section,
            row,
            tokens,
        }
    }

    pub(crate) fn text(&self, index: usize) -> Result<String, ParseError> {
        self.tokens
            .get(index)
            .cloned()
            .ok_or(ParseError::MissingField {
                section: self.section,
                row: self.row,
                index,
            })
    }

    pub(crate) fn integer<T>(&self, index: usize, field: &'static str) -> Result<T, ParseError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let value = self.text(index)?;
        value.parse().map_err(|source| ParseError::InvalidInteger {
            section: self.section,
            row: self.row,
            field,
            value,
            source,
        })
    }
}
