//! Threshold evaluation against upper warn/crit levels.

use asterisk_check_types::{CheckOutput, CheckResult, Levels, Metric, State};

/// Latency levels applied when no deployment-specific pair is configured.
pub const DEFAULT_LATENCY_LEVELS: Levels = Levels::new(1500, 2000);

/// Evaluate `value` against upper `levels`.
///
/// Emits a verdict labelled with `label` followed by a metric named
/// `metric_name` that carries the value and the bounds. A value equal to a
/// bound already counts as crossing it.
pub fn check_levels(value: u64, levels: Levels, metric_name: &str, label: &str) -> Vec<CheckOutput> {
    let state = if value >= levels.crit {
        State::Crit
    } else if value >= levels.warn {
        State::Warn
    } else {
        State::Ok
    };

    let summary = match state {
        State::Ok => format!("{}: {}", label, value),
        _ => format!("{}: {} (warn/crit at {}/{})", label, value, levels.warn, levels.crit),
    };

    vec![
        CheckOutput::from(CheckResult::new(state, summary)),
        CheckOutput::from(Metric::new(metric_name, value).with_levels(levels)),
    ]
}
