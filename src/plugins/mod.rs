//! The asterisk check plugins.
//!
//! Each plugin module exposes the same three stages:
//!
//! - a parse function turning the section's [`StringTable`](crate::section::StringTable)
//!   into typed records
//! - a discovery function listing the services to monitor
//! - a check function producing the verdicts and metrics of one service
//!
//! and a `plugin()` constructor binding them into a [`Plugin`](crate::plugin::Plugin).

pub mod channels;
pub mod iax2_peers;
pub mod peers;
pub mod registry;

pub use channels::{Channel, ChannelSummary};
pub use peers::Peer;
pub use registry::Registration;
