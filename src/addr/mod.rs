
use std::net::{IpAddr, SocketAddr};

use crate::error::{Error, Result};

/// Composes a transport address from its textual host and service parts.
///
/// The host must be a numeric IPv4 or IPv6 literal; SDP carries IPv6
/// connection-addresses without brackets, which is exactly what
/// [`IpAddr`]'s parser accepts. Name lookup is never performed here, see
/// the resolver module.
pub fn parse_addr(host: &str, service: &str) -> Result<SocketAddr> {
    if host.is_empty() {
        return Err(Error::ErrHostnameEmpty);
    }
    let ip: IpAddr = host.parse()?;
    let port: u16 = service.parse()?;
    Ok(SocketAddr::new(ip, port))
}

/// Splits a resolved address back into the textual host and service
/// parts carried by a candidate.
pub fn to_host_service(addr: &SocketAddr) -> (String, String) {
    (addr.ip().to_string(), addr.port().to_string())
}
