//! Verdicts, check output items and discovered services.

use crate::{Metric, State};

/// One verdict: a state and a human-readable summary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckResult {
    pub state: State,
    pub summary: String,
}

impl CheckResult {
    pub fn new(state: State, summary: impl Into<String>) -> Self {
        Self {
            state,
            summary: summary.into(),
        }
    }

    pub fn ok(summary: impl Into<String>) -> Self {
        Self::new(State::Ok, summary)
    }

    pub fn warn(summary: impl Into<String>) -> Self {
        Self::new(State::Warn, summary)
    }

    pub fn crit(summary: impl Into<String>) -> Self {
        Self::new(State::Crit, summary)
    }

    pub fn unknown(summary: impl Into<String>) -> Self {
        Self::new(State::Unknown, summary)
    }
}

/// A single item yielded by a check function, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CheckOutput {
    Result(CheckResult),
    Metric(Metric),
}

impl CheckOutput {
    /// The state carried by this item, if it is a verdict.
    pub fn state(&self) -> Option<State> {
        match self {
            CheckOutput::Result(r) => Some(r.state),
            CheckOutput::Metric(_) => None,
        }
    }

    pub fn as_result(&self) -> Option<&CheckResult> {
        match self {
            CheckOutput::Result(r) => Some(r),
            CheckOutput::Metric(_) => None,
        }
    }

    pub fn as_metric(&self) -> Option<&Metric> {
        match self {
            CheckOutput::Result(_) => None,
            CheckOutput::Metric(m) => Some(m),
        }
    }
}

impl From<CheckResult> for CheckOutput {
    fn from(result: CheckResult) -> Self {
        CheckOutput::Result(result)
    }
}

impl From<Metric> for CheckOutput {
    fn from(metric: Metric) -> Self {
        CheckOutput::Metric(metric)
    }
}

/// A monitorable unit found by discovery.
///
/// Plugins monitoring several same-type things (peers, registrations) set
/// `item` to the record key; singleton plugins leave it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Service {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub item: Option<String>,
}

impl Service {
    /// A singleton service without an item.
    pub fn new() -> Self {
        Self::default()
    }

    /// A service addressed by `item`.
    pub fn with_item(item: impl Into<String>) -> Self {
        Self {
            item: Some(item.into()),
        }
    }

    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_accessors() {
        let result = CheckOutput::from(CheckResult::crit("down"));
        assert_eq!(result.state(), Some(State::Crit));
        assert!(result.as_metric().is_none());

        let metric = CheckOutput::from(Metric::new("active_calls", 1));
        assert_eq!(metric.state(), None);
        assert_eq!(metric.as_metric().map(|m| m.value), Some(1));
    }

    #[test]
    fn test_service_item() {
        assert_eq!(Service::new().item(), None);
        assert_eq!(Service::with_item("15/15").item(), Some("15/15"));
    }
}
