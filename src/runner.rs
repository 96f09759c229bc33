//! One check cycle over a snapshot.

use asterisk_check_types::{CheckOutput, CheckResult};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::plugin::{all_plugins, CheckPlugin};
use crate::report::{RunReport, ServiceReport};
use crate::section::{AgentOutput, StringTable};

/// Services found by one plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pub plugin: &'static str,
    /// Display names of the discovered services, in discovery order.
    pub services: Vec<String>,
}

fn plugins_in(output: &AgentOutput) -> Vec<(Box<dyn CheckPlugin>, &StringTable)> {
    let plugins = all_plugins();
    for (name, _) in output.iter() {
        if !plugins.iter().any(|p| p.name() == name.as_str()) {
            debug!(section = %name, "no plugin for section, skipping");
        }
    }

    plugins
        .into_iter()
        .filter_map(|plugin| {
            let table = output.section(plugin.name())?;
            Some((plugin, table))
        })
        .collect()
}

/// Discover the services of every section that has a plugin.
///
/// Sections that fail to parse are logged and left out.
pub fn discover_services(output: &AgentOutput) -> Vec<Discovery> {
    plugins_in(output)
        .into_iter()
        .filter_map(|(plugin, table)| match plugin.discover(table) {
            Ok(services) => Some(Discovery {
                plugin: plugin.name(),
                services: services.iter().map(|s| plugin.service_name(s)).collect(),
            }),
            Err(e) => {
                warn!(plugin = plugin.name(), error = %e, "discovery failed");
                None
            }
        })
        .collect()
}

/// Discover and check every service of every section that has a plugin.
///
/// A section that fails to parse is reported as one UNKNOWN service named
/// after its plugin, and the remaining sections are still checked.
pub fn run_checks(output: &AgentOutput, config: &AppConfig) -> RunReport {
    let mut report = RunReport::default();

    for (plugin, table) in plugins_in(output) {
        let params = config.params_for(plugin.name());
        match plugin.run(table, &params) {
            Ok(checks) => {
                debug!(plugin = plugin.name(), services = checks.len(), "checked section");
                for check in checks {
                    report.push(ServiceReport::from(check));
                }
            }
            Err(e) => {
                warn!(plugin = plugin.name(), error = %e, "section parse failed");
                report.push(ServiceReport::new(
                    plugin.name(),
                    None,
                    vec![CheckOutput::from(CheckResult::unknown(format!("Parse error: {}", e)))],
                ));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use asterisk_check_types::{Levels, State};

    use super::*;

    const AGENT_OUTPUT: &str = "\
<<<asterisk_peers>>>
100             (Unspecified)   0       UNKNOWN         0
50-5/50-5       10.52.12.87     5060    OK              13
<<<asterisk_registry>>>
22384668@sip2sip.info:5060	Registered
<<<asterisk_queues>>>
support 3 calls
<<<asterisk_channels>>>
Channel              Location             State   Application(Data)
SIP/6001-00000001    (None)               Up      Playback(demo-congrats)
1 active channel
1 active call
12 calls processed
";

    #[test]
    fn test_discover_services() {
        let discovered = discover_services(&AgentOutput::parse(AGENT_OUTPUT));
        assert_eq!(
            discovered,
            vec![
                Discovery {
                    plugin: "asterisk_peers",
                    services: vec![
                        "Asterisk peer 100".to_string(),
                        "Asterisk peer 50-5/50-5".to_string()
                    ],
                },
                Discovery {
                    plugin: "asterisk_registry",
                    services: vec!["Asterisk registry 22384668@sip2sip.info:5060".to_string()],
                },
                Discovery {
                    plugin: "asterisk_channels",
                    services: vec!["Asterisk Channels".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_run_checks() {
        let report = run_checks(&AgentOutput::parse(AGENT_OUTPUT), &AppConfig::default());

        let names: Vec<&str> = report.services.iter().map(|s| s.service.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Asterisk peer 100",
                "Asterisk peer 50-5/50-5",
                "Asterisk registry 22384668@sip2sip.info:5060",
                "Asterisk Channels",
            ]
        );
        assert_eq!(report.services[0].state, State::Crit);
        assert_eq!(report.services[1].state, State::Ok);
        assert_eq!(report.services[3].state, State::Ok);
        assert_eq!(report.state, State::Crit);
    }

    #[test]
    fn test_run_checks_applies_config_levels() {
        let mut config = AppConfig::default();
        config.peers.latency = Levels::new(10, 20);

        let report = run_checks(&AgentOutput::parse(AGENT_OUTPUT), &config);
        assert_eq!(report.services[1].state, State::Warn);
    }

    #[test]
    fn test_parse_failure_becomes_unknown_service() {
        let output = AgentOutput::parse(
            "<<<asterisk_peers>>>\n100 (Unspecified) zero UNKNOWN 0\n<<<asterisk_registry>>>\na@b:5060 Registered\n",
        );
        let report = run_checks(&output, &AppConfig::default());

        assert_eq!(report.services.len(), 2);
        assert_eq!(report.services[0].service, "asterisk_peers");
        assert_eq!(report.services[0].state, State::Unknown);
        assert!(report.services[0].summary().starts_with("Parse error: asterisk_peers"));
        assert_eq!(report.services[1].state, State::Ok);
    }

    #[test]
    fn test_empty_output() {
        let report = run_checks(&AgentOutput::default(), &AppConfig::default());
        assert!(report.is_empty());
        assert_eq!(report.exit_code(), 0);
    }
}
