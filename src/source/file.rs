//! File-based data source.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::DataSource;
use crate::section::AgentOutput;

/// Reads agent output from a file, e.g. a dump of `check_mk_agent`.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn read(&mut self) -> Result<AgentOutput> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Read error: {}", self.path.display()))?;
        Ok(AgentOutput::parse(&content))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
