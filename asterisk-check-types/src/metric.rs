//! Numeric measurements and their threshold annotations.

use std::fmt::{Display, Formatter, Result as FormatResult};

/// Upper warn/crit bounds for a value.
///
/// Serialized as a two-element `[warn, crit]` array so configuration files
/// can write `latency = [1500, 2000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "(u64, u64)", into = "(u64, u64)"))]
pub struct Levels {
    pub warn: u64,
    pub crit: u64,
}

impl Levels {
    /// Create levels from a warn and crit bound.
    pub const fn new(warn: u64, crit: u64) -> Self {
        Self { warn, crit }
    }
}

impl From<(u64, u64)> for Levels {
    fn from((warn, crit): (u64, u64)) -> Self {
        Self { warn, crit }
    }
}

impl From<Levels> for (u64, u64) {
    fn from(levels: Levels) -> Self {
        (levels.warn, levels.crit)
    }
}

/// A named measurement emitted alongside a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metric {
    pub name: String,
    pub value: u64,
    /// Bounds the value was evaluated against, for trend rendering.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub levels: Option<Levels>,
}

impl Metric {
    /// Create a metric without levels.
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
            levels: None,
        }
    }

    /// Attach warn/crit levels.
    pub fn with_levels(mut self, levels: Levels) -> Self {
        self.levels = Some(levels);
        self
    }
}

/// Renders performance data as `name=value;warn;crit`.
impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        match self.levels {
            Some(levels) => write!(f, "{}={};{};{}", self.name, self.value, levels.warn, levels.crit),
            None => write!(f, "{}={};;", self.name, self.value),
        }
    }
}
