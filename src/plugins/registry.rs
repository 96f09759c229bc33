//! Outbound SIP registrations.
//!
//! ```text
//! <<<asterisk_registry>>>
//! 22384668@sip2sip.info:5060	Registered
//! ```

use asterisk_check_types::{CheckOutput, CheckResult, Service};
use serde::Serialize;

use crate::error::ParseError;
use crate::plugin::Plugin;
use crate::section::{Fields, StringTable};

pub const SECTION_NAME: &str = "asterisk_registry";

/// The only registration state treated as healthy.
pub const HEALTHY_REGISTRATION_STATE: &str = "Registered";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// `user@host:port`
    pub account: String,
    pub state: String,
}

impl Registration {
    pub fn new(account: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            state: state.into(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.state == HEALTHY_REGISTRATION_STATE
    }
}

pub fn parse_registrations(table: &StringTable) -> Result<Vec<Registration>, ParseError> {
    table
        .iter()
        .enumerate()
        .map(|(row, tokens)| {
            let fields = Fields::new(SECTION_NAME, row, tokens);
            Ok(Registration {
                account: fields.text(0)?,
                state: fields.text(1)?,
            })
        })
        .collect()
}

pub fn discover_registrations(section: &[Registration]) -> Vec<Service> {
    section
        .iter()
        .map(|registration| Service::with_item(registration.account.as_str()))
        .collect()
}

pub fn check_registration(item: &str, section: &[Registration]) -> Vec<CheckOutput> {
    let Some(registration) = section.iter().find(|r| r.account == item) else {
        return vec![CheckOutput::from(CheckResult::unknown("Registration not found!"))];
    };

    let summary = format!("State is {}", registration.state);
    let result = if registration.is_healthy() {
        CheckResult::ok(summary)
    } else {
        CheckResult::crit(summary)
    };
    vec![result.into()]
}

pub fn plugin() -> Plugin<Vec<Registration>> {
    Plugin {
        name: SECTION_NAME,
        service_name: "Asterisk registry %s",
        parse: parse_registrations,
        discover: |section| discover_registrations(section),
        check: |item, _params, section| check_registration(item.unwrap_or_default(), section),
    }
}
