//! IAX2 peers.
//!
//! Same record and checks as SIP peers; only the row layout differs. The
//! third token is a flag printed after the host (for example `(S)`) and is
//! ignored:
//!
//! ```text
//! <<<asterisk_iax2_peers>>>
//! voxlink/pbx27     195.211.101.70 (S)    4569    OK    6
//! ```

use super::peers::{check_peers, discover_peers, Peer};
use crate::error::ParseError;
use crate::plugin::Plugin;
use crate::section::{Fields, StringTable};

pub const SECTION_NAME: &str = "asterisk_iax2_peers";

/// Parse `name host flag port status latency` rows.
pub fn parse_iax2_peers(table: &StringTable) -> Result<Vec<Peer>, ParseError> {
    table
        .iter()
        .enumerate()
        .map(|(row, tokens)| {
            let fields = Fields::new(SECTION_NAME, row, tokens);
            Ok(Peer {
                name: fields.text(0)?,
                host: fields.text(1)?,
                port: fields.integer(3, "port")?,
                status: fields.text(4)?,
                latency: fields.integer(5, "latency")?,
            })
        })
        .collect()
}

pub fn plugin() -> Plugin<Vec<Peer>> {
    Plugin {
        name: SECTION_NAME,
        service_name: "Asterisk IAX2 peer %s",
        parse: parse_iax2_peers,
        discover: |section| discover_peers(section),
        check: |item, params, section| check_peers(item.unwrap_or_default(), params, section),
    }
}

#[cfg(test)]
mod tests {
    use asterisk_check_types::{CheckOutput, CheckResult, Service};

    use super::*;
    use crate::plugin::CheckParams;

    fn table(rows: &[&[&str]]) -> StringTable {
        rows.iter().map(|r| r.iter().map(|t| t.to_string()).collect()).collect()
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_iax2_peers(&Vec::new()).unwrap(), Vec::new());
    }

    #[test]
    fn test_parse_skips_flag_column() {
        let parsed = parse_iax2_peers(&table(&[
            &["voxlink/pbx27", "195.211.101.70", "(S)", "4569", "OK", "6"],
            &["voxlink/pbx47", "195.211.201.70", "(S)", "4569", "UNKNOWN", "65"],
        ]))
        .unwrap();

        assert_eq!(
            parsed,
            vec![
                Peer::new("voxlink/pbx27", "195.211.101.70", 4569, "OK", 6),
                Peer::new("voxlink/pbx47", "195.211.201.70", 4569, "UNKNOWN", 65),
            ]
        );
    }

    #[test]
    fn test_parse_sip_layout_is_rejected() {
        // Five-token SIP rows put the status where the IAX2 port belongs.
        let err = parse_iax2_peers(&table(&[&["100", "(Unspecified)", "0", "UNKNOWN", "0"]]))
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidInteger { field: "port", .. }));
    }

    #[test]
    fn test_plugin_checks_like_sip_peers() {
        let plugin = plugin();
        let section = (plugin.parse)(&table(&[&[
            "voxlink/pbx47",
            "195.211.201.70",
            "(S)",
            "4569",
            "UNKNOWN",
            "65",
        ]]))
        .unwrap();

        assert_eq!((plugin.discover)(&section), vec![Service::with_item("voxlink/pbx47")]);
        assert_eq!(
            (plugin.check)(Some("voxlink/pbx47"), &CheckParams::default(), &section)[0],
            CheckOutput::from(CheckResult::crit("Peer voxlink/pbx47 on host 195.211.201.70:4569 is UNKNOWN"))
        );
        assert_eq!(
            (plugin.check)(Some("voxlink/pbx48"), &CheckParams::default(), &section),
            vec![CheckOutput::from(CheckResult::unknown("UNKNOWN - peer not found"))]
        );
    }
}
