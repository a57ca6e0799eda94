
pub mod candidate_pair;

use crc::{CRC_32_ISCSI, Crc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::addr;
use crate::error::{Error, Result};

pub(crate) const DEFAULT_LOCAL_PREFERENCE: u16 = 65535;

/// Indicates that the candidate is used for RTP (or the data component).
pub const COMPONENT_RTP: u16 = 1;
/// Indicates that the candidate is used for RTCP.
pub const COMPONENT_RTCP: u16 = 2;

/// Highest component id accepted: the `256 - component` term of the
/// priority formula must stay non-negative.
pub const MAX_COMPONENT: u16 = 256;

/// The only transport this stack gathers candidates for.
pub const TRANSPORT_UDP: &str = "udp";

pub const MAX_FOUNDATION_LEN: usize = 32;
pub const MAX_TRANSPORT_LEN: usize = 32;
pub const MAX_HOSTNAME_LEN: usize = 256;
pub const MAX_SERVICE_LEN: usize = 32;

/// Represents the type of candidate `CandidateType` enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateType {
    #[serde(rename = "host")]
    Host,
    #[serde(rename = "srflx")]
    ServerReflexive,
    #[serde(rename = "prflx")]
    PeerReflexive,
    #[serde(rename = "relay")]
    Relay,
}

// String makes CandidateType printable
impl fmt::Display for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            CandidateType::Host => "host",
            CandidateType::ServerReflexive => "srflx",
            CandidateType::PeerReflexive => "prflx",
            CandidateType::Relay => "relay",
        };
        write!(f, "{s}")
    }
}

impl CandidateType {
    /// Returns the preference weight of a `CandidateType`.
    ///
    /// RFC 8445 5.1.2.2. Guidelines for Choosing Type and Local
    /// Preferences: the RECOMMENDED values are 126 for host candidates,
    /// 110 for peer-reflexive candidates, 100 for server-reflexive
    /// candidates, and 0 for relayed candidates.
    #[must_use]
    pub const fn preference(self) -> u16 {
        match self {
            Self::Host => 126,
            Self::PeerReflexive => 110,
            Self::ServerReflexive => 100,
            Self::Relay => 0,
        }
    }

    /// Maps an SDP type token to a `CandidateType`. An unrecognized
    /// token is a hard error, never a default.
    pub fn from_token(token: &str) -> Result<Self> {
        match token {
            "host" => Ok(Self::Host),
            "srflx" => Ok(Self::ServerReflexive),
            "prflx" => Ok(Self::PeerReflexive),
            "relay" => Ok(Self::Relay),
            _ => Err(Error::ErrUnknownCandidateType),
        }
    }
}

/// Conveys the transport address a reflexive or relayed candidate was
/// derived from (`raddr`/`rport`).
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct CandidateRelatedAddress {
    pub address: String,
    pub port: u16,
}

impl fmt::Display for CandidateRelatedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " related {}:{}", self.address, self.port)
    }
}

/// One ICE candidate: a possible transport endpoint offered for
/// connectivity, plus the metadata exchanged over SDP.
///
/// `hostname`/`service` carry the textual endpoint from the wire;
/// `resolved` is the concrete address and stays `None` until resolution
/// succeeds (see the resolver module). All string fields obey fixed
/// maximum lengths enforced at construction and parse time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub(crate) candidate_type: CandidateType,
    pub(crate) component: u16,
    pub(crate) foundation: String,
    pub(crate) transport: String,
    pub(crate) hostname: String,
    pub(crate) service: String,
    pub(crate) priority: u32,
    pub(crate) related_address: Option<CandidateRelatedAddress>,
    pub(crate) resolved: Option<SocketAddr>,
}

impl Default for Candidate {
    fn default() -> Self {
        Self {
            candidate_type: CandidateType::Host,
            component: COMPONENT_RTP,
            foundation: String::new(),
            transport: TRANSPORT_UDP.to_owned(),
            hostname: String::new(),
            service: String::new(),
            priority: 0,
            related_address: None,
            resolved: None,
        }
    }
}

// String makes the candidate printable
impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}:{}",
            self.transport, self.candidate_type, self.hostname, self.service,
        )?;
        if let Some(related_address) = &self.related_address {
            write!(f, "{related_address}")?;
        }
        Ok(())
    }
}

impl Candidate {
    /// Builds a local candidate from a discovered transport address.
    ///
    /// The foundation is derived deterministically from the base
    /// address, type and transport, so candidates sharing a base and
    /// type are grouped under the same foundation. The priority is
    /// always computed here, never taken from the caller.
    pub fn new_local(
        candidate_type: CandidateType,
        component: u16,
        address: SocketAddr,
    ) -> Result<Self> {
        if component == 0 || component > MAX_COMPONENT {
            return Err(Error::ErrInvalidComponent);
        }

        let (hostname, service) = addr::to_host_service(&address);
        Ok(Self {
            candidate_type,
            component,
            foundation: compute_foundation(candidate_type, &address, TRANSPORT_UDP),
            transport: TRANSPORT_UDP.to_owned(),
            hostname,
            service,
            priority: compute_priority(candidate_type, component, DEFAULT_LOCAL_PREFERENCE),
            related_address: None,
            resolved: Some(address),
        })
    }

    /// Returns candidate type.
    pub fn candidate_type(&self) -> CandidateType {
        self.candidate_type
    }

    /// Returns candidate component.
    pub fn component(&self) -> u16 {
        self.component
    }

    pub fn foundation(&self) -> &str {
        &self.foundation
    }

    pub fn transport(&self) -> &str {
        &self.transport
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the RFC 8445 5.1.2.1 priority of this candidate.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn related_address(&self) -> Option<&CandidateRelatedAddress> {
        self.related_address.as_ref()
    }

    /// Returns the resolved transport address, if resolution happened.
    pub fn resolved(&self) -> Option<SocketAddr> {
        self.resolved
    }

    pub(crate) fn set_resolved(&mut self, address: SocketAddr) {
        self.resolved = Some(address);
    }

    /// Returns the candidate-attribute value, i.e. the `a=candidate:`
    /// line without its attribute name:
    ///
    /// `<foundation> <component> <transport> <priority> <address> <port> typ <type> [raddr <address> rport <port>]`
    ///
    /// A candidate must be resolved before it can be serialized.
    pub fn marshal(&self) -> Result<String> {
        let Some(address) = self.resolved else {
            return Err(Error::ErrUnresolvedCandidate);
        };

        let mut val = format!(
            "{} {} {} {} {} {} typ {}",
            self.foundation,
            self.component,
            self.transport,
            self.priority,
            address.ip(),
            address.port(),
            self.candidate_type,
        );

        if let Some(related_address) = &self.related_address {
            val += format!(
                " raddr {} rport {}",
                related_address.address, related_address.port,
            )
            .as_str();
        }

        Ok(val)
    }

    /// Returns the full SDP attribute line for this candidate.
    pub fn to_sdp_line(&self) -> Result<String> {
        Ok(format!("a=candidate:{}", self.marshal()?))
    }
}

/// RFC 8445 5.1.2.1. Recommended Formula:
///
/// priority = (2^24)*(type preference) +
///            (2^8)*(local preference) +
///            (2^0)*(256 - component ID)
///
/// The local preference MUST be an integer from 0 (lowest preference)
/// to 65535 (highest preference) inclusive. When there is only a single
/// IP address, this value SHOULD be set to 65535.
pub(crate) fn compute_priority(
    candidate_type: CandidateType,
    component: u16,
    local_preference: u16,
) -> u32 {
    (1 << 24) * u32::from(candidate_type.preference())
        + (1 << 8) * u32::from(local_preference)
        + (256 - u32::from(component))
}

/// Candidates sharing a base address, type and transport must share a
/// foundation, and the string must fit in 32 ice-chars; a decimal CRC-32
/// checksum satisfies both.
pub(crate) fn compute_foundation(
    candidate_type: CandidateType,
    base: &SocketAddr,
    transport: &str,
) -> String {
    let mut buf = vec![];
    buf.extend_from_slice(candidate_type.to_string().as_bytes());
    buf.extend_from_slice(base.ip().to_string().as_bytes());
    buf.extend_from_slice(transport.as_bytes());

    let checksum = Crc::<u32>::new(&CRC_32_ISCSI).checksum(&buf);

    format!("{checksum}")
}

/// Creates a Candidate from its SDP attribute representation, with or
/// without the leading `a=candidate:` attribute name.
///
/// Parsing is all-or-nothing: any malformed, truncated or out-of-range
/// field fails the whole line and no candidate is returned. Unrecognized
/// trailing extension tokens are ignored for interoperability. The
/// resolved address is set directly from the connection-address and port
/// tokens when the address is a numeric literal; a hostname (e.g. an
/// mDNS name) is kept for later resolution.
pub fn unmarshal_candidate(raw: &str) -> Result<Candidate> {
    let raw = raw.trim();
    let raw = raw.strip_prefix("a=").unwrap_or(raw);
    let raw = raw.strip_prefix("candidate:").unwrap_or(raw);

    let split: Vec<&str> = raw.split_whitespace().collect();
    if split.len() < 8 {
        return Err(Error::ErrAttributeTooShortIceCandidate);
    }

    // Foundation
    let foundation = split[0];
    if foundation.len() > MAX_FOUNDATION_LEN {
        return Err(Error::ErrAttributeTooLong("foundation"));
    }

    // Component
    let component: u16 = split[1].parse()?;
    if component == 0 || component > MAX_COMPONENT {
        return Err(Error::ErrInvalidComponent);
    }

    // Transport
    let transport = split[2];
    if transport.len() > MAX_TRANSPORT_LEN {
        return Err(Error::ErrAttributeTooLong("transport"));
    }

    // Priority
    let priority: u32 = split[3].parse()?;

    // Connection-address
    let address = split[4];
    if address.len() > MAX_HOSTNAME_LEN {
        return Err(Error::ErrAttributeTooLong("connection-address"));
    }

    // Port
    let service = split[5];
    if service.len() > MAX_SERVICE_LEN {
        return Err(Error::ErrAttributeTooLong("port"));
    }
    let port: u16 = service.parse()?;

    if split[6] != "typ" {
        return Err(Error::ErrMissingTypToken);
    }

    let candidate_type = CandidateType::from_token(split[7])?;

    let mut related_address = None;
    if split.len() > 8 {
        let split2 = &split[8..];

        if split2[0] == "raddr" {
            if split2.len() < 4 || split2[2] != "rport" {
                return Err(Error::ErrParseRelatedAddr);
            }

            related_address = Some(CandidateRelatedAddress {
                address: split2[1].to_owned(),
                port: split2[3].parse()?,
            });
        }
    }

    let resolved = address
        .parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, port));

    Ok(Candidate {
        candidate_type,
        component,
        foundation: foundation.to_owned(),
        transport: transport.to_owned(),
        hostname: address.to_owned(),
        service: service.to_owned(),
        priority,
        related_address,
        resolved,
    })
}
