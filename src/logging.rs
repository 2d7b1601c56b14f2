use tracing_subscriber::EnvFilter;

/// Map `-v` occurrences to a default filter. Quiet by default so log lines
/// don't interleave with the table.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "pinger=warn",
        1 => "pinger=debug",
        _ => "pinger=trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
