use thiserror::Error;

/// Rejected user input, from either the command line or the interactive prompt
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("value must be a positive integer, got {0}")]
    NotPositive(String),

    #[error("{0} is too large, the maximum is 18446744073709551615")]
    TooLarge(String),

    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("invalid host or IP provided: '{0}'")]
    InvalidTarget(String),
}

/// Why a single probe produced no latency. Never escapes the prober.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not resolve {0} to an IPv4 address")]
    Resolve(String),

    #[error("echo request failed: {0}")]
    Icmp(String),

    #[error("no reply within {0} ms")]
    TimedOut(u128),

    #[error("reply arrived after {elapsed_ms:.2} ms, timeout is {timeout_ms} ms")]
    LateReply { elapsed_ms: f64, timeout_ms: u128 },

    #[error("probe worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before all settings were entered")]
    EndOfInput,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
