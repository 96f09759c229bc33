//! Service states.

use std::fmt::{Display, Formatter, Result as FormatResult};

/// Health verdict for a service in one check cycle.
///
/// `Ok`, `Warn` and `Crit` form an ordinal scale. `Unknown` is an
/// indeterminate state that sits outside that scale; when several verdicts
/// are combined it ranks above `Warn` but below `Crit`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum State {
    #[default]
    Ok,
    Warn,
    Crit,
    Unknown,
}

impl State {
    fn severity(self) -> u8 {
        match self {
            State::Ok => 0,
            State::Warn => 1,
            State::Unknown => 2,
            State::Crit => 3,
        }
    }

    /// Returns the more severe of two states.
    pub fn worst(self, other: State) -> State {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }

    /// Plugin exit code as understood by Nagios-compatible cores.
    pub fn exit_code(self) -> i32 {
        match self {
            State::Ok => 0,
            State::Warn => 1,
            State::Crit => 2,
            State::Unknown => 3,
        }
    }

    /// Returns a short label for display.
    pub fn label(self) -> &'static str {
        match self {
            State::Ok => "OK",
            State::Warn => "WARN",
            State::Crit => "CRIT",
            State::Unknown => "UNKNOWN",
        }
    }

    /// Marker appended to summaries of non-OK results.
    pub fn marker(self) -> &'static str {
        match self {
            State::Ok => "",
            State::Warn => "(!)",
            State::Crit => "(!!)",
            State::Unknown => "(?)",
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worst_prefers_crit_over_unknown() {
        assert_eq!(State::Unknown.worst(State::Crit), State::Crit);
        assert_eq!(State::Crit.worst(State::Unknown), State::Crit);
        assert_eq!(State::Warn.worst(State::Unknown), State::Unknown);
        assert_eq!(State::Ok.worst(State::Warn), State::Warn);
        assert_eq!(State::Ok.worst(State::Ok), State::Ok);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(State::Ok.exit_code(), 0);
        assert_eq!(State::Warn.exit_code(), 1);
        assert_eq!(State::Crit.exit_code(), 2);
        assert_eq!(State::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(State::Crit.to_string(), "CRIT");
        assert_eq!(State::Unknown.marker(), "(?)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uppercase() {
        assert_eq!(serde_json::to_string(&State::Warn).unwrap(), "\"WARN\"");
        let parsed: State = serde_json::from_str("\"UNKNOWN\"").unwrap();
        assert_eq!(parsed, State::Unknown);
    }
}
