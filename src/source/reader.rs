//! Reader-based data source.

use std::io::Read;

use anyhow::{Context, Result};

use super::DataSource;
use crate::section::AgentOutput;

/// Reads agent output from any [`Read`] implementation until EOF.
///
/// ```
/// use std::io::Cursor;
/// use asterisk_check::{DataSource, ReaderSource};
///
/// let data = "<<<asterisk_channels>>>\n0 active channels\n";
/// let mut source = ReaderSource::new(Cursor::new(data), "example");
/// let output = source.read().unwrap();
/// assert!(output.section("asterisk_channels").is_some());
/// ```
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    description: String,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R, description: &str) -> Self {
        Self {
            reader,
            description: description.to_string(),
        }
    }
}

impl<R: Read + std::fmt::Debug> DataSource for ReaderSource<R> {
    fn read(&mut self) -> Result<AgentOutput> {
        let mut content = String::new();
        self.reader
            .read_to_string(&mut content)
            .with_context(|| format!("Read error: {}", self.description))?;
        Ok(AgentOutput::parse(&content))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
