//! Deployment configuration.
//!
//! Settings are layered: an optional file (format chosen by extension) and
//! then `ASTERISK_CHECK__*` environment variables, e.g.
//! `ASTERISK_CHECK__PEERS__LATENCY=1000,1800`.
//!
//! ```toml
//! [peers]
//! latency = [1500, 2000]
//!
//! [iax2_peers]
//! latency = [800, 1200]
//!
//! [agent]
//! deploy = true
//! interval = 300
//! ```

use std::path::Path;

use asterisk_check_types::Levels;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::plugin::CheckParams;
use crate::plugins::{iax2_peers, peers};

const ENV_PREFIX: &str = "ASTERISK_CHECK";

/// Agent plugin deployment rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Whether the `asterisk` agent plugin is shipped to monitored hosts.
    #[serde(default)]
    pub deploy: bool,
    /// Execution interval of the agent plugin in seconds. Unset runs it on
    /// every agent call.
    #[serde(default)]
    pub interval: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub peers: CheckParams,
    #[serde(default)]
    pub iax2_peers: CheckParams,
    #[serde(default)]
    pub agent: AgentConfig,
}

impl AppConfig {
    /// Load the configuration from `path` (if any) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder.add_source(env).build()?.try_deserialize()
    }

    /// Override the latency levels of both peer families.
    pub fn set_latency(&mut self, levels: Levels) {
        self.peers.latency = levels;
        self.iax2_peers.latency = levels;
    }

    /// Parameters for the plugin consuming `section`.
    pub fn params_for(&self, section: &str) -> CheckParams {
        match section {
            peers::SECTION_NAME => self.peers,
            iax2_peers::SECTION_NAME => self.iax2_peers,
            _ => CheckParams::default(),
        }
    }
}

/// `ASTERISK_CHECK__SECTION__KEY` variables; latency lists are comma separated.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("peers.latency")
        .with_list_parse_key("iax2_peers.latency")
}
