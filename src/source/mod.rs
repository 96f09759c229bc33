//! Sources of raw agent output.
//!
//! A [`DataSource`] yields one [`AgentOutput`] snapshot per call. The crate
//! does not talk to agents itself: it reads output that has already been
//! collected, either from a file or from any reader such as stdin.

mod file;
mod reader;

pub use file::FileSource;
pub use reader::ReaderSource;

use std::fmt::Debug;

use anyhow::Result;

use crate::section::AgentOutput;

/// Trait for reading agent output snapshots.
///
/// # Example
///
/// ```no_run
/// use asterisk_check::{DataSource, FileSource};
///
/// let mut source = FileSource::new("agent_output.txt");
/// let output = source.read().unwrap();
/// println!("Got {} sections from {}", output.len(), source.description());
/// ```
pub trait DataSource: Debug {
    /// Read the current snapshot.
    fn read(&mut self) -> Result<AgentOutput>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
