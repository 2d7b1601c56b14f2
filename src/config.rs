use std::num::IntErrorKind;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::error::ConfigError;
use crate::target::is_valid_target;

pub const DEFAULT_COUNT: u64 = 10;
pub const DEFAULT_INTERVAL_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

const EXAMPLES: &str = "\
Examples:
  pinger google.com
  pinger 1.1.1.1 -c 5 -i 200 -t 1000";

#[derive(Parser, Debug, Clone)]
#[command(name = "pinger")]
#[command(about = "Send ICMP echo probes to a host and summarize latency and packet loss")]
#[command(version, after_help = EXAMPLES)]
pub struct Config {
    /// IP address or hostname to ping. If not provided, an interactive prompt opens.
    #[arg()]
    pub host: Option<String>,

    /// Number of pings to send
    #[arg(short, long, default_value_t = DEFAULT_COUNT, value_parser = parse_positive, allow_negative_numbers = true)]
    pub count: u64,

    /// Delay between pings in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_INTERVAL_MS, value_parser = parse_positive, allow_negative_numbers = true)]
    pub interval: u64,

    /// Timeout per ping in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS, value_parser = parse_positive, allow_negative_numbers = true)]
    pub timeout: u64,

    /// Do not clear the screen before the run
    #[arg(long, default_value = "false")]
    pub no_clear: bool,

    /// Disable colored output (NO_COLOR is honored too)
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Log verbosity on stderr: -v for debug, -vv for trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Build the run parameters for the host given on the command line.
    /// Returns `Ok(None)` when no host was given and the prompt should open.
    /// Target validation may block on a name lookup.
    pub fn to_run_config(&self) -> Result<Option<RunConfig>, ConfigError> {
        let Some(host) = &self.host else {
            return Ok(None);
        };

        if !is_valid_target(host) {
            return Err(ConfigError::InvalidTarget(host.clone()));
        }

        RunConfig::new(host.trim(), self.count, self.interval, self.timeout).map(Some)
    }
}

/// Parameters for one run, fixed before the first probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub target: String,
    pub count: u64,
    pub interval: Duration,
    pub timeout: Duration,
}

impl RunConfig {
    pub fn new(
        target: impl Into<String>,
        count: u64,
        interval_ms: u64,
        timeout_ms: u64,
    ) -> Result<Self, ConfigError> {
        for value in [count, interval_ms, timeout_ms] {
            if value == 0 {
                return Err(ConfigError::NotPositive(value.to_string()));
            }
        }

        Ok(Self {
            target: target.into(),
            count,
            interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

/// Parse a strictly positive integer. Shared by the CLI flags and the prompt.
pub fn parse_positive(input: &str) -> Result<u64, ConfigError> {
    let input = input.trim();
    let value: i128 = input.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => ConfigError::TooLarge(input.to_string()),
        IntErrorKind::NegOverflow => ConfigError::NotPositive(input.to_string()),
        _ => ConfigError::NotANumber(input.to_string()),
    })?;

    if value <= 0 {
        return Err(ConfigError::NotPositive(input.to_string()));
    }

    u64::try_from(value).map_err(|_| ConfigError::TooLarge(input.to_string()))
}
