//! # asterisk-check
//!
//! Monitoring checks for an Asterisk VoIP PBX. The crate turns the text
//! tables printed by the `asterisk` agent plugin into health verdicts and
//! metrics for SIP peers, IAX2 peers, outbound SIP registrations and active
//! channels.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  source ──▶ section ──▶ plugin ──────────────▶ report           │
//! │  (raw text)  (AgentOutput) (parse/discover/check) (state, perf) │
//! │                               │                                  │
//! │                               ├── plugins::peers      ─┐         │
//! │                               ├── plugins::iax2_peers ─┴ levels  │
//! │                               ├── plugins::registry              │
//! │                               └── plugins::channels              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: [`DataSource`] trait with [`FileSource`] and [`ReaderSource`]
//! - **[`section`]**: splitting agent output into named, tokenized sections
//! - **[`plugins`]**: one module per check family, each with a parse,
//!   discovery and check function
//! - **[`levels`]**: upper warn/crit threshold evaluation
//! - **[`plugin`]**: binding of those functions into [`CheckPlugin`]s
//! - **[`runner`]**: one check cycle over a snapshot
//! - **[`report`]**: folding outputs into plugin-style lines and exit codes
//! - **[`bakery`]**: which agent plugin to deploy for a configuration
//!
//! Every check is a pure function of the snapshot it is given: nothing is
//! cached or carried from one cycle to the next.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Check a captured agent output
//! asterisk-check --file agent_output.txt
//!
//! # Pipe the agent output in and only list the services
//! check_mk_agent | asterisk-check --discover
//! ```
//!
//! ### As a library
//!
//! ```
//! use asterisk_check::{run_checks, AgentOutput, AppConfig};
//!
//! let output = AgentOutput::parse(
//!     "<<<asterisk_registry>>>\n22384668@sip2sip.info:5060\tRegistered\n",
//! );
//! let report = run_checks(&output, &AppConfig::default());
//!
//! assert_eq!(report.exit_code(), 0);
//! assert_eq!(
//!     report.services[0].to_string(),
//!     "OK Asterisk registry 22384668@sip2sip.info:5060 - State is Registered"
//! );
//! ```
//!
//! ### Calling a check function directly
//!
//! ```
//! use asterisk_check::plugins::peers::{check_peers, Peer};
//! use asterisk_check::CheckParams;
//! use asterisk_check_types::State;
//!
//! let peers = vec![Peer::new("100", "(Unspecified)", 0, "UNKNOWN", 0)];
//! let outputs = check_peers("100", &CheckParams::default(), &peers);
//!
//! assert_eq!(outputs[0].state(), Some(State::Crit));
//! assert_eq!(outputs[1].state(), Some(State::Ok));
//! ```

pub mod bakery;
pub mod config;
pub mod error;
pub mod levels;
pub mod plugin;
pub mod plugins;
pub mod report;
pub mod runner;
pub mod section;
pub mod source;

pub use crate::config::{AgentConfig, AppConfig};
pub use error::ParseError;
pub use levels::{check_levels, DEFAULT_LATENCY_LEVELS};
pub use plugin::{all_plugins, find_plugin, CheckParams, CheckPlugin, Plugin, ServiceCheck};
pub use report::{RunReport, ServiceReport};
pub use runner::{discover_services, run_checks, Discovery};
pub use section::{AgentOutput, StringTable};
pub use source::{DataSource, FileSource, ReaderSource};
