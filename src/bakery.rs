//! Agent plugin deployment descriptor.
//!
//! The data this crate checks is produced by the `asterisk` agent plugin on
//! the monitored host. Whether that plugin is shipped, and how often the
//! agent runs it, is decided per deployment by [`AgentConfig`].

use std::path::PathBuf;

use serde::Serialize;

use crate::config::AgentConfig;

/// File name of the agent plugin.
pub const AGENT_PLUGIN_NAME: &str = "asterisk";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
}

/// An agent plugin file to install on monitored hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentPlugin {
    pub base_os: Os,
    pub source: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
}

/// The agent plugins to ship for this configuration.
pub fn bake(config: &AgentConfig) -> Vec<AgentPlugin> {
    if !config.deploy {
        return Vec::new();
    }

    vec![AgentPlugin {
        base_os: Os::Linux,
        source: PathBuf::from(AGENT_PLUGIN_NAME),
        interval: config.interval,
    }]
}
