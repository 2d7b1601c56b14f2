use super::Prober;
use crate::error::ProbeError;
use crate::target::{DnsResolver, Resolver};
use std::net::IpAddr;
use std::time::{Duration, Instant};

/// Echo payload size; with the 8-byte ICMP header this is 64 bytes on the wire
pub const PAYLOAD_SIZE: usize = 56;

/// ICMP prober using ping_rs
pub struct IcmpProber<R = DnsResolver> {
    target: String,
    payload: [u8; PAYLOAD_SIZE],
    resolver: R,
}

impl IcmpProber {
    pub fn new(target: impl Into<String>) -> Self {
        Self::with_resolver(target, DnsResolver)
    }
}

impl<R: Resolver> IcmpProber<R> {
    pub fn with_resolver(target: impl Into<String>, resolver: R) -> Self {
        let mut payload = [0u8; PAYLOAD_SIZE];
        for (i, byte) in payload.iter_mut().enumerate() {
            *byte = i as u8;
        }
        Self {
            target: target.into(),
            payload,
            resolver,
        }
    }

    async fn try_probe(&self, timeout: Duration) -> Result<Duration, ProbeError> {
        let started = Instant::now();

        // Resolved on every attempt so a transient lookup failure only loses one probe
        let ip = IpAddr::V4(self.resolver.resolve(&self.target).await?);
        let payload = self.payload;

        // The lookup spends part of the budget
        let remaining = timeout.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            return Err(ProbeError::TimedOut(timeout.as_millis()));
        }

        let start = Instant::now();
        tokio::task::spawn_blocking(move || ping_rs::send_ping(&ip, remaining, &payload, None))
            .await?
            .map_err(|e| ProbeError::Icmp(format!("{:?}", e)))?;

        // Measure RTT ourselves for sub-millisecond precision
        // (ping_rs on Windows only returns whole milliseconds)
        let rtt = start.elapsed();
        if started.elapsed() > timeout {
            return Err(ProbeError::LateReply {
                elapsed_ms: rtt.as_secs_f64() * 1000.0,
                timeout_ms: timeout.as_millis(),
            });
        }

        Ok(rtt)
    }
}

impl<R: Resolver> Prober for IcmpProber<R> {
    async fn probe(&mut self, timeout: Duration) -> Option<Duration> {
        // Bounds the lookup as well as the echo; a stalled resolver loses the probe
        let outcome = tokio::time::timeout(timeout, self.try_probe(timeout))
            .await
            .unwrap_or(Err(ProbeError::TimedOut(timeout.as_millis())));

        match outcome {
            Ok(rtt) => Some(rtt),
            Err(e) => {
                tracing::debug!(host = %self.target, error = %e, "probe lost");
                None
            }
        }
    }
}
