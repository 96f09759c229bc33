//! Active channels and call statistics.
//!
//! The section is the output of `core show channels`: a header row, one row
//! per channel and three statistic lines.
//!
//! ```text
//! <<<asterisk_channels>>>
//! Channel              Location             State   Application(Data)
//! SIP/6001-00000001    (None)               Up      Playback(demo-congrats)
//! SIP/trunk_internal   (None)               Up      Dial(SIP/+41223344@trunk)
//! Local/1234@anywhere  anywhere             Down    Return()
//! 3 active channels
//! 2 active calls
//! 15468 calls processed
//! ```
//!
//! Rows are classified by token count alone: four tokens make a channel,
//! three tokens a statistic line. Anything else is ignored.

use asterisk_check_types::{CheckOutput, CheckResult, Metric, Service};
use serde::Serialize;

use crate::error::ParseError;
use crate::plugin::Plugin;
use crate::section::{Fields, StringTable};

pub const SECTION_NAME: &str = "asterisk_channels";

/// Tokens of the column header row.
pub const CHANNELS_HEADER: [&str; 4] = ["Channel", "Location", "State", "Application(Data)"];

pub const HEALTHY_CHANNEL_STATES: [&str; 3] = ["Up", "Ring", "Ringing"];

/// One active call leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub name: String,
    pub location: String,
    pub state: String,
    pub application_data: String,
}

impl Channel {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        state: impl Into<String>,
        application_data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            state: state.into(),
            application_data: application_data.into(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        HEALTHY_CHANNEL_STATES.contains(&self.state.as_str())
    }
}

/// Which counter a statistic line feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallStat {
    ActiveChannels,
    ActiveCalls,
    ProcessedCalls,
}

impl CallStat {
    /// Classify `<count> <word> <word>` by its two keywords. Asterisk prints
    /// the singular form when the count is one.
    fn classify(first: &str, second: &str) -> Option<Self> {
        match (first, second) {
            ("active", "channel" | "channels") => Some(CallStat::ActiveChannels),
            ("active", "call" | "calls") => Some(CallStat::ActiveCalls),
            ("call" | "calls", "processed") => Some(CallStat::ProcessedCalls),
            _ => None,
        }
    }

    fn field(self) -> &'static str {
        match self {
            CallStat::ActiveChannels => "active channels",
            CallStat::ActiveCalls => "active calls",
            CallStat::ProcessedCalls => "processed calls",
        }
    }
}

/// Channels and call counters of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    /// Channels in input order.
    pub channels: Vec<Channel>,
    /// `None` until the `active channels` line has been seen. Its absence
    /// marks the whole summary as incomplete.
    pub active_channels: Option<u64>,
    pub active_calls: u64,
    pub processed_calls: u64,
}

impl ChannelSummary {
    pub fn is_incomplete(&self) -> bool {
        self.active_channels.is_none()
    }

    /// Channels whose state is not healthy, in input order.
    pub fn down_channels(&self) -> Vec<&Channel> {
        self.channels.iter().filter(|c| !c.is_healthy()).collect()
    }

    /// `"{n} active channels, {n} active calls, {n} calls processed"`, or
    /// `None` while the summary is incomplete.
    pub fn stats_text(&self) -> Option<String> {
        let active_channels = self.active_channels?;
        Some(format!(
            "{} active channels, {} active calls, {} calls processed",
            active_channels, self.active_calls, self.processed_calls
        ))
    }

    fn record(&mut self, stat: CallStat, value: u64) {
        match stat {
            CallStat::ActiveChannels => self.active_channels = Some(value),
            CallStat::ActiveCalls => self.active_calls = value,
            CallStat::ProcessedCalls => self.processed_calls = value,
        }
    }
}

fn down_channels_text(down: &[&Channel]) -> String {
    match down {
        [channel] => format!("Channel {} is {}! ", channel.name, channel.state),
        _ => format!("{} Channels are down! ", down.len()),
    }
}

fn is_header(tokens: &[String]) -> bool {
    tokens.iter().all(|t| CHANNELS_HEADER.contains(&t.as_str()))
}

pub fn parse_channels(table: &StringTable) -> Result<ChannelSummary, ParseError> {
    let mut summary = ChannelSummary::default();

    for (row, tokens) in table.iter().enumerate() {
        if is_header(tokens) {
            continue;
        }

        match tokens.as_slice() {
            [name, location, state, application_data] => {
                summary.channels.push(Channel::new(
                    name.as_str(),
                    location.as_str(),
                    state.as_str(),
                    application_data.as_str(),
                ));
            }
            [_, first, second] => {
                if let Some(stat) = CallStat::classify(first, second) {
                    let value = Fields::new(SECTION_NAME, row, tokens).integer(0, stat.field())?;
                    summary.record(stat, value);
                }
            }
            _ => {}
        }
    }

    Ok(summary)
}

/// The channel check is a singleton, discovered unconditionally.
pub fn discover_channels(_section: &ChannelSummary) -> Vec<Service> {
    vec![Service::new()]
}

pub fn check_channels(section: &ChannelSummary) -> Vec<CheckOutput> {
    let Some(stats) = section.stats_text() else {
        return vec![CheckOutput::from(CheckResult::unknown(
            "incomplete check output, channel stats not found!",
        ))];
    };

    let down = section.down_channels();
    let result = if down.is_empty() {
        CheckResult::ok(stats)
    } else {
        CheckResult::crit(down_channels_text(&down) + &stats)
    };

    vec![
        CheckOutput::from(result),
        CheckOutput::from(Metric::new("active_channels", section.active_channels.unwrap_or_default())),
        CheckOutput::from(Metric::new("active_calls", section.active_calls)),
        CheckOutput::from(Metric::new("processed_calls", section.processed_calls)),
    ]
}

pub fn plugin() -> Plugin<ChannelSummary> {
    Plugin {
        name: SECTION_NAME,
        service_name: "Asterisk Channels",
        parse: parse_channels,
        discover: discover_channels,
        check: |_item, _params, section| check_channels(section),
    }
}
