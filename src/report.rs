//! Rendering of check outputs for a monitoring core.
//!
//! A [`ServiceReport`] folds one service's outputs into a single line in
//! the classic plugin format:
//!
//! ```text
//! WARN Asterisk peer prSIP_2 - Peer prSIP_2 on host 10.52.12.87:5061 is OK, Latency: 1584 (warn/crit at 1500/2000) (!) | latency=1584;1500;2000
//! ```
//!
//! A [`RunReport`] collects the services of one snapshot and carries the
//! overall state used as process exit code.

use std::fmt::{Display, Formatter, Result as FormatResult};

use asterisk_check_types::{CheckOutput, CheckResult, Metric, State};
use serde::Serialize;

use crate::plugin::ServiceCheck;

/// The folded outputs of one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceReport {
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// Worst state of all results.
    pub state: State,
    pub results: Vec<CheckResult>,
    pub metrics: Vec<Metric>,
}

impl ServiceReport {
    pub fn new(service: impl Into<String>, item: Option<String>, outputs: Vec<CheckOutput>) -> Self {
        let mut results = Vec::new();
        let mut metrics = Vec::new();
        for output in outputs {
            match output {
                CheckOutput::Result(r) => results.push(r),
                CheckOutput::Metric(m) => metrics.push(m),
            }
        }

        let state = results.iter().map(|r| r.state).fold(State::Ok, State::worst);

        Self {
            service: service.into(),
            item,
            state,
            results,
            metrics,
        }
    }

    /// Summaries joined by `, `, each non-OK one followed by its marker.
    pub fn summary(&self) -> String {
        self.results
            .iter()
            .filter(|r| !r.summary.is_empty())
            .map(|r| match r.state {
                State::Ok => r.summary.clone(),
                state => format!("{} {}", r.summary, state.marker()),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Performance data, space separated.
    pub fn perfdata(&self) -> String {
        self.metrics
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<ServiceCheck> for ServiceReport {
    fn from(check: ServiceCheck) -> Self {
        Self::new(check.name, check.service.item, check.outputs)
    }
}

impl Display for ServiceReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        write!(f, "{} {} - {}", self.state, self.service, self.summary())?;
        if !self.metrics.is_empty() {
            write!(f, " | {}", self.perfdata())?;
        }
        Ok(())
    }
}

/// All service reports of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub state: State,
    pub services: Vec<ServiceReport>,
}

impl RunReport {
    pub fn push(&mut self, report: ServiceReport) {
        self.state = self.state.worst(report.state);
        self.services.push(report);
    }

    pub fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Number of services in each state, as (ok, warn, crit, unknown).
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        self.services.iter().fold((0, 0, 0, 0), |(ok, warn, crit, unknown), s| match s.state {
            State::Ok => (ok + 1, warn, crit, unknown),
            State::Warn => (ok, warn + 1, crit, unknown),
            State::Crit => (ok, warn, crit + 1, unknown),
            State::Unknown => (ok, warn, crit, unknown + 1),
        })
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        for service in &self.services {
            writeln!(f, "{}", service)?;
        }
        Ok(())
    }
}
