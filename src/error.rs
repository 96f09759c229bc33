//! Error types for section parsing.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors that abort the parse of a whole agent section.
///
/// Fixed-position parsers do not try to recover individual rows: one bad
/// row fails the section for this cycle.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A row is shorter than the parser's fixed layout.
    #[error("{section}: row {row} has no field at position {index}")]
    MissingField {
        section: &'static str,
        row: usize,
        index: usize,
    },

    /// A token expected to hold an integer does not.
    #[error("{section}: invalid {field} '{value}' in row {row}: {source}")]
    InvalidInteger {
        section: &'static str,
        row: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
