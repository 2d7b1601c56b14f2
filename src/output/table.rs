//! Plain-text layout of the probe table and the run summary.
//!
//! Everything here is pure; styling is applied by the sink on top of these
//! strings.

use crate::ping::icmp::PAYLOAD_SIZE;
use crate::ping::{ProbeResult, RunStats};

pub const PROTOCOL: &str = "ICMP";
pub const PLACEHOLDER: &str = "-";

/// Left margin in front of every table line
pub const INDENT: &str = "            ";

const TRY_WIDTH: usize = 6;
const TARGET_WIDTH: usize = 17;
const PROTOCOL_WIDTH: usize = 10;
const LATENCY_WIDTH: usize = 12;
const BYTES_WIDTH: usize = 8;
const STATUS_WIDTH: usize = 10;

/// Width of the summary rules, matching the table
pub const RULE_WIDTH: usize =
    TRY_WIDTH + TARGET_WIDTH + PROTOCOL_WIDTH + LATENCY_WIDTH + BYTES_WIDTH + STATUS_WIDTH;

/// Bytes on the wire for one echo request: payload plus ICMP header
pub fn bytes_label() -> String {
    (PAYLOAD_SIZE + 8).to_string()
}

fn center(text: &str, width: usize) -> String {
    format!("{:^width$}", text)
}

/// One table row, each cell already padded to its column width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub attempt: String,
    pub target: String,
    pub protocol: String,
    pub latency: String,
    pub bytes: String,
    pub status: String,
    pub up: bool,
}

impl Row {
    pub fn header() -> Self {
        Self {
            attempt: center("TRY", TRY_WIDTH),
            target: center("TARGET", TARGET_WIDTH),
            protocol: center("PROTOCOL", PROTOCOL_WIDTH),
            latency: center("LATENCY", LATENCY_WIDTH),
            bytes: center("BYTES", BYTES_WIDTH),
            status: center("STATUS", STATUS_WIDTH),
            up: true,
        }
    }

    pub fn from_result(result: &ProbeResult, target: &str) -> Self {
        let (latency, bytes, status) = match result.latency_ms() {
            Some(ms) => (format_ms(ms), bytes_label(), "UP"),
            None => (PLACEHOLDER.to_string(), PLACEHOLDER.to_string(), "Down"),
        };

        Self {
            attempt: center(&format!("#{}", result.attempt), TRY_WIDTH),
            target: center(target, TARGET_WIDTH),
            protocol: center(PROTOCOL, PROTOCOL_WIDTH),
            latency: center(&latency, LATENCY_WIDTH),
            bytes: center(&bytes, BYTES_WIDTH),
            status: center(status, STATUS_WIDTH),
            up: result.is_success(),
        }
    }

    /// The unstyled line, without the left margin
    pub fn plain(&self) -> String {
        format!(
            "{}{}{}{}{}{}",
            self.attempt, self.target, self.protocol, self.latency, self.bytes, self.status
        )
    }
}

/// Latency with two decimals, e.g. `10.00 ms`
pub fn format_ms(ms: f64) -> String {
    format!("{:.2} ms", ms)
}

/// Formatted figures for the closing summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub sent: String,
    pub received: String,
    pub lost: String,
    pub loss: String,
    pub avg: String,
    pub min: String,
    pub max: String,
}

impl Summary {
    pub fn from_stats(stats: &RunStats) -> Self {
        Self {
            sent: stats.sent.to_string(),
            received: stats.received.to_string(),
            lost: stats.lost().to_string(),
            loss: format!("{:.1}%", stats.packet_loss()),
            avg: format_ms(stats.avg_latency()),
            min: format_ms(stats.min_latency()),
            max: format_ms(stats.max_latency()),
        }
    }

    /// Top rule with the title embedded
    pub fn title_rule() -> String {
        let title = " Ping Summary ";
        let side = RULE_WIDTH.saturating_sub(title.chars().count());
        format!(
            "{}{}{}",
            "═".repeat(side / 2),
            title,
            "═".repeat(side - side / 2)
        )
    }

    pub fn bottom_rule() -> String {
        "═".repeat(RULE_WIDTH)
    }
}
