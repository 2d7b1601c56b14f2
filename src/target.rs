use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};

use crate::error::ProbeError;

/// Check whether `host` is something we are willing to ping.
///
/// Dotted quads are checked syntactically. Anything else must contain a dot
/// and resolve to at least one IPv4 address. The lookup blocks; lookup
/// failures make the target invalid rather than erroring.
pub fn is_valid_target(host: &str) -> bool {
    let host = host.trim();

    if looks_like_ipv4(host) {
        return parse_dotted_quad(host).is_some();
    }

    if host.len() <= 1 || !host.contains('.') {
        return false;
    }

    match (host, 0).to_socket_addrs() {
        Ok(mut addrs) => addrs.any(|addr| addr.is_ipv4()),
        Err(e) => {
            tracing::debug!(host, error = %e, "target lookup failed");
            false
        }
    }
}

/// Strings made only of digits and dots are judged as IPv4 literals and are
/// never handed to the resolver (which would accept short forms like `1.2.3`).
fn looks_like_ipv4(host: &str) -> bool {
    !host.is_empty() && host.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Parse `a.b.c.d` where every octet is 1-3 digits in 0..=255.
/// Leading zeros are accepted (`010.0.0.1` is 10.0.0.1).
pub fn parse_dotted_quad(host: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = host.split('.');

    for octet in octets.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse::<u16>().ok()?.try_into().ok()?;
    }

    if parts.next().is_some() {
        return None;
    }

    Some(Ipv4Addr::from(octets))
}

/// Turns a target into the address a probe is sent to
pub trait Resolver {
    fn resolve(&self, host: &str) -> impl Future<Output = Result<Ipv4Addr, ProbeError>>;
}

/// System resolver through tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct DnsResolver;

impl Resolver for DnsResolver {
    async fn resolve(&self, host: &str) -> Result<Ipv4Addr, ProbeError> {
        resolve_ipv4(host).await
    }
}

/// Resolve a target to an IPv4 address at probe time
pub async fn resolve_ipv4(host: &str) -> Result<Ipv4Addr, ProbeError> {
    // First try parsing as IP address
    if let Some(ip) = parse_dotted_quad(host) {
        return Ok(ip);
    }

    // Try DNS resolution
    let addrs = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|_| ProbeError::Resolve(host.to_string()))?;

    addrs
        .filter_map(|addr: SocketAddr| match addr.ip() {
            IpAddr::V4(ip) => Some(ip),
            IpAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| ProbeError::Resolve(host.to_string()))
}
