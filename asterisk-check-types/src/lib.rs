//! # asterisk-check-types
//!
//! Value types shared by the asterisk monitoring plugins. A check function
//! yields a sequence of [`CheckOutput`] items: verdicts ([`CheckResult`])
//! carrying a [`State`] and a human-readable summary, and numeric
//! [`Metric`]s optionally annotated with warn/crit [`Levels`]. A discovery
//! function yields the [`Service`]s that should be monitored.
//!
//! ## Features
//!
//! - `serde`: serialization of every type via serde
//!
//! ## Example
//!
//! ```rust
//! use asterisk_check_types::{CheckOutput, CheckResult, Levels, Metric, State};
//!
//! let outputs = vec![
//!     CheckOutput::from(CheckResult::warn("Latency: 1584 (warn/crit at 1500/2000)")),
//!     CheckOutput::from(Metric::new("latency", 1584).with_levels(Levels::new(1500, 2000))),
//! ];
//!
//! let state = outputs
//!     .iter()
//!     .filter_map(CheckOutput::state)
//!     .fold(State::Ok, State::worst);
//! assert_eq!(state, State::Warn);
//! ```

mod metric;
mod result;
mod state;

pub use metric::*;
pub use result::*;
pub use state::*;
