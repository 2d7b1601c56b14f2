pub mod icmp;
pub mod runner;

use chrono::{DateTime, Local};
use std::future::Future;
use std::time::Duration;

/// Outcome of a single probe attempt
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// 1-based attempt number
    pub attempt: u64,
    /// Round-trip time (None if timeout/error)
    pub latency: Option<Duration>,
    /// Wall-clock timestamp of the attempt
    pub timestamp: DateTime<Local>,
}

impl ProbeResult {
    pub fn new(attempt: u64, latency: Option<Duration>) -> Self {
        Self {
            attempt,
            latency,
            timestamp: Local::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.latency.is_some()
    }

    /// Get latency in milliseconds as f64 for sub-millisecond precision
    pub fn latency_ms(&self) -> Option<f64> {
        self.latency.map(|d| d.as_secs_f64() * 1000.0)
    }

    /// Format timestamp as HH:MM:SS.mmm
    pub fn timestamp_str(&self) -> String {
        self.timestamp.format("%H:%M:%S%.3f").to_string()
    }
}

/// Something that can send one echo probe and wait for the reply
pub trait Prober {
    /// Probe once. `None` means the probe was lost for any reason;
    /// failures never abort the run.
    fn probe(&mut self, timeout: Duration) -> impl Future<Output = Option<Duration>>;
}

/// Running statistics for a run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub sent: u64,
    pub received: u64,
    /// Latencies of successful probes in milliseconds, in probe order
    pub latencies: Vec<f64>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &ProbeResult) {
        self.sent += 1;

        if let Some(ms) = result.latency_ms() {
            self.received += 1;
            self.latencies.push(ms);
        }
    }

    pub fn lost(&self) -> u64 {
        self.sent - self.received
    }

    pub fn packet_loss(&self) -> f64 {
        if self.sent > 0 {
            (self.lost() as f64 / self.sent as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn avg_latency(&self) -> f64 {
        if self.latencies.is_empty() {
            return 0.0;
        }
        self.latencies.iter().sum::<f64>() / self.latencies.len() as f64
    }

    pub fn min_latency(&self) -> f64 {
        self.latencies.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    pub fn max_latency(&self) -> f64 {
        self.latencies.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }
}
