//! Binding of parse, discovery and check functions into runnable plugins.
//!
//! ```text
//! StringTable ──parse──▶ section ──discover──▶ [Service]
//!                           │                      │
//!                           └───────check(item)◀───┘──▶ [CheckOutput]
//! ```
//!
//! The set of plugins is fixed at compile time and returned by
//! [`all_plugins`]; callers look plugins up by section name.

use std::fmt::{self, Debug, Formatter};

use asterisk_check_types::{CheckOutput, Levels, Service};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::levels::DEFAULT_LATENCY_LEVELS;
use crate::plugins::{channels, iax2_peers, peers, registry};
use crate::section::StringTable;

/// Per-deployment check parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckParams {
    /// Upper warn/crit levels for peer latency.
    #[serde(default = "default_latency")]
    pub latency: Levels,
}

fn default_latency() -> Levels {
    DEFAULT_LATENCY_LEVELS
}

impl Default for CheckParams {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY_LEVELS,
        }
    }
}

/// The outputs of one service for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCheck {
    pub service: Service,
    /// Display name, e.g. `Asterisk peer 15/15`.
    pub name: String,
    pub outputs: Vec<CheckOutput>,
}

/// A check plugin as seen by a caller driving check cycles.
pub trait CheckPlugin: Send + Sync + Debug {
    /// Plugin name, equal to the agent section it consumes.
    fn name(&self) -> &'static str;

    /// Display name of a discovered service.
    fn service_name(&self, service: &Service) -> String;

    /// Parse the section and list the services it contains.
    fn discover(&self, table: &StringTable) -> Result<Vec<Service>, ParseError>;

    /// Parse the section and check a single service.
    fn check(
        &self,
        service: &Service,
        params: &CheckParams,
        table: &StringTable,
    ) -> Result<Vec<CheckOutput>, ParseError>;

    /// Parse the section once, then discover and check every service.
    fn run(&self, table: &StringTable, params: &CheckParams) -> Result<Vec<ServiceCheck>, ParseError>;
}

/// A plugin assembled from plain functions over a parsed section `S`.
pub struct Plugin<S> {
    pub name: &'static str,
    /// Service name template; `%s` is replaced by the item.
    pub service_name: &'static str,
    pub parse: fn(&StringTable) -> Result<S, ParseError>,
    pub discover: fn(&S) -> Vec<Service>,
    pub check: fn(Option<&str>, &CheckParams, &S) -> Vec<CheckOutput>,
}

impl<S> Debug for Plugin<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}

impl<S> CheckPlugin for Plugin<S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn service_name(&self, service: &Service) -> String {
        match service.item() {
            Some(item) => self.service_name.replace("%s", item),
            None => self.service_name.to_string(),
        }
    }

    fn discover(&self, table: &StringTable) -> Result<Vec<Service>, ParseError> {
        let section = (self.parse)(table)?;
        Ok((self.discover)(&section))
    }

    fn check(
        &self,
        service: &Service,
        params: &CheckParams,
        table: &StringTable,
    ) -> Result<Vec<CheckOutput>, ParseError> {
        let section = (self.parse)(table)?;
        Ok((self.check)(service.item(), params, &section))
    }

    fn run(&self, table: &StringTable, params: &CheckParams) -> Result<Vec<ServiceCheck>, ParseError> {
        let section = (self.parse)(table)?;
        let checks = (self.discover)(&section)
            .into_iter()
            .map(|service| ServiceCheck {
                name: self.service_name(&service),
                outputs: (self.check)(service.item(), params, &section),
                service,
            })
            .collect();
        Ok(checks)
    }
}

/// Every plugin shipped with this crate.
pub fn all_plugins() -> Vec<Box<dyn CheckPlugin>> {
    vec![
        Box::new(peers::plugin()),
        Box::new(iax2_peers::plugin()),
        Box::new(registry::plugin()),
        Box::new(channels::plugin()),
    ]
}

/// Look up a plugin by the section it consumes.
pub fn find_plugin(name: &str) -> Option<Box<dyn CheckPlugin>> {
    all_plugins().into_iter().find(|p| p.name() == name)
}
