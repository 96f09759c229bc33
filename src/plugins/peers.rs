//! SIP peers.
//!
//! Agent section, one peer per row:
//!
//! ```text
//! <<<asterisk_peers>>>
//! 100             (Unspecified)   0       UNKNOWN         0
//! 15/15           10.52.12.55     5060    Unmonitored     0
//! 50-5/50-5       10.52.12.87     5060    OK              13
//! linkedPBX_86/87 10.52.25.6      5060    UNREACHABLE     0
//! ```

use asterisk_check_types::{CheckOutput, CheckResult, Service};
use serde::Serialize;

use crate::error::ParseError;
use crate::levels::check_levels;
use crate::plugin::{CheckParams, Plugin};
use crate::section::{Fields, StringTable};

pub const SECTION_NAME: &str = "asterisk_peers";

/// The only peer status treated as healthy.
pub const HEALTHY_PEER_STATUS: &str = "OK";

/// A telephony trunk or endpoint known to Asterisk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Peer {
    pub name: String,
    /// IP address or the literal `(Unspecified)`.
    pub host: String,
    /// 0 when unspecified.
    pub port: u16,
    pub status: String,
    pub latency: u64,
}

impl Peer {
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        status: impl Into<String>,
        latency: u64,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
            status: status.into(),
            latency,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY_PEER_STATUS
    }
}

/// Parse `name host port status latency` rows.
pub fn parse_peers(table: &StringTable) -> Result<Vec<Peer>, ParseError> {
    table
        .iter()
        .enumerate()
        .map(|(row, tokens)| {
            let fields = Fields::new(SECTION_NAME, row, tokens);
            Ok(Peer {
                name: fields.text(0)?,
                host: fields.text(1)?,
                port: fields.integer(2, "port")?,
                status: fields.text(3)?,
                latency: fields.integer(4, "latency")?,
            })
        })
        .collect()
}

/// One service per peer, in input order. Duplicate names are kept.
pub fn discover_peers(section: &[Peer]) -> Vec<Service> {
    section.iter().map(|peer| Service::with_item(peer.name.as_str())).collect()
}

/// Evaluate the first peer named `item`.
///
/// The peer's status and its latency are reported independently: a peer
/// with a bad status still gets its latency evaluated.
pub fn check_peers(item: &str, params: &CheckParams, section: &[Peer]) -> Vec<CheckOutput> {
    let Some(peer) = section.iter().find(|peer| peer.name == item) else {
        return vec![CheckOutput::from(CheckResult::unknown("UNKNOWN - peer not found"))];
    };

    let summary = format!(
        "Peer {} on host {}:{} is {}",
        peer.name, peer.host, peer.port, peer.status
    );
    let status = if peer.is_healthy() {
        CheckResult::ok(summary)
    } else {
        CheckResult::crit(summary)
    };

    let mut outputs: Vec<CheckOutput> = vec![status.into()];
    outputs.extend(check_levels(peer.latency, params.latency, "latency", "Latency"));
    outputs
}

pub fn plugin() -> Plugin<Vec<Peer>> {
    Plugin {
        name: SECTION_NAME,
        service_name: "Asterisk peer %s",
        parse: parse_peers,
        discover: |section| discover_peers(section),
        check: |item, params, section| check_peers(item.unwrap_or_default(), params, section),
    }
}

#[cfg(test)]
mod tests {
    use asterisk_check_types::{Metric, State};

    use super::*;
    use crate::levels::DEFAULT_LATENCY_LEVELS;

    fn table(rows: &[&[&str]]) -> StringTable {
        rows.iter().map(|r| r.iter().map(|t| t.to_string()).collect()).collect()
    }

    fn params() -> CheckParams {
        CheckParams::default()
    }

    fn sample_peers() -> Vec<Peer> {
        vec![
            Peer::new("15/15", "10.52.12.55", 5060, "Unmonitored", 0),
            Peer::new("21-2/21-2", "(Unspecified)", 0, "UNKNOWN", 0),
            Peer::new("50-5/50-5", "10.52.12.87", 5060, "OK", 13),
        ]
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_peers(&Vec::new()).unwrap(), Vec::new());
    }

    #[test]
    fn test_parse_peers() {
        let parsed = parse_peers(&table(&[
            &["100", "(Unspecified)", "0", "UNKNOWN", "0"],
            &["15/15", "10.52.12.55", "5060", "Unmonitored", "0"],
            &["21-2/21-2", "(Unspecified)", "0", "UNKNOWN", "0"],
            &["50-5/50-5", "10.52.12.87", "5060", "OK", "13"],
        ]))
        .unwrap();

        assert_eq!(
            parsed,
            vec![
                Peer::new("100", "(Unspecified)", 0, "UNKNOWN", 0),
                Peer::new("15/15", "10.52.12.55", 5060, "Unmonitored", 0),
                Peer::new("21-2/21-2", "(Unspecified)", 0, "UNKNOWN", 0),
                Peer::new("50-5/50-5", "10.52.12.87", 5060, "OK", 13),
            ]
        );
    }

    #[test]
    fn test_parse_malformed_latency_fails_section() {
        let err = parse_peers(&table(&[
            &["100", "(Unspecified)", "0", "UNKNOWN", "0"],
            &["101", "10.0.0.1", "5060", "OK", "fast"],
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ParseError::InvalidInteger { field: "latency", row: 1, .. }
        ));
    }

    #[test]
    fn test_parse_short_row_fails_section() {
        let err = parse_peers(&table(&[&["100", "(Unspecified)", "0"]])).unwrap_err();
        assert!(matches!(err, ParseError::MissingField { index: 3, .. }));
    }

    #[test]
    fn test_discover_keeps_order_and_duplicates() {
        let mut peers = sample_peers();
        peers.push(Peer::new("15/15", "10.52.12.56", 5060, "OK", 1));

        assert_eq!(
            discover_peers(&peers),
            vec![
                Service::with_item("15/15"),
                Service::with_item("21-2/21-2"),
                Service::with_item("50-5/50-5"),
                Service::with_item("15/15"),
            ]
        );
    }

    #[test]
    fn test_check_not_found() {
        assert_eq!(
            check_peers("42", &params(), &[]),
            vec![CheckOutput::from(CheckResult::unknown("UNKNOWN - peer not found"))]
        );
        assert_eq!(
            check_peers("42", &params(), &[Peer::new("100", "(Unspecified)", 0, "UNKNOWN", 0)]),
            vec![CheckOutput::from(CheckResult::unknown("UNKNOWN - peer not found"))]
        );
    }

    #[test]
    fn test_check_unhealthy_status_still_reports_latency() {
        assert_eq!(
            check_peers("100", &params(), &[Peer::new("100", "(Unspecified)", 0, "UNKNOWN", 0)]),
            vec![
                CheckOutput::from(CheckResult::crit("Peer 100 on host (Unspecified):0 is UNKNOWN")),
                CheckOutput::from(CheckResult::ok("Latency: 0")),
                CheckOutput::from(Metric::new("latency", 0).with_levels(DEFAULT_LATENCY_LEVELS)),
            ]
        );
        assert_eq!(
            check_peers("15/15", &params(), &sample_peers())[0],
            CheckOutput::from(CheckResult::crit("Peer 15/15 on host 10.52.12.55:5060 is Unmonitored"))
        );
    }

    #[test]
    fn test_check_healthy_peer() {
        assert_eq!(
            check_peers("50-5/50-5", &params(), &sample_peers()),
            vec![
                CheckOutput::from(CheckResult::ok("Peer 50-5/50-5 on host 10.52.12.87:5060 is OK")),
                CheckOutput::from(CheckResult::ok("Latency: 13")),
                CheckOutput::from(Metric::new("latency", 13).with_levels(DEFAULT_LATENCY_LEVELS)),
            ]
        );
    }

    #[test]
    fn test_check_latency_levels() {
        let peers = vec![
            Peer::new("prSIP_2", "10.52.12.87", 5061, "OK", 1584),
            Peer::new("prSIP_3", "10.52.12.87", 5062, "OK", 2039),
        ];

        let warn = check_peers("prSIP_2", &params(), &peers);
        assert_eq!(
            warn[1],
            CheckOutput::from(CheckResult::warn("Latency: 1584 (warn/crit at 1500/2000)"))
        );

        let crit = check_peers("prSIP_3", &params(), &peers);
        assert_eq!(crit[0].state(), Some(State::Ok));
        assert_eq!(
            crit[1],
            CheckOutput::from(CheckResult::crit("Latency: 2039 (warn/crit at 1500/2000)"))
        );
    }

    #[test]
    fn test_check_first_match_wins() {
        let peers = vec![
            Peer::new("dup", "10.0.0.1", 5060, "OK", 1),
            Peer::new("dup", "10.0.0.2", 5060, "UNREACHABLE", 0),
        ];
        assert_eq!(
            check_peers("dup", &params(), &peers)[0],
            CheckOutput::from(CheckResult::ok("Peer dup on host 10.0.0.1:5060 is OK"))
        );
    }

    #[test]
    fn test_check_is_idempotent() {
        let peers = sample_peers();
        assert_eq!(
            check_peers("50-5/50-5", &params(), &peers),
            check_peers("50-5/50-5", &params(), &peers)
        );
    }
}
