use std::net;
use std::num::ParseIntError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The candidate type token does not map to host/srflx/prflx/relay.
    #[error("unknown candidate type")]
    ErrUnknownCandidateType,
    /// The component id is outside the range supported by the priority
    /// formula.
    #[error("invalid candidate component")]
    ErrInvalidComponent,
    #[error("attribute exceeds its maximum length: {0}")]
    ErrAttributeTooLong(&'static str),
    #[error("attribute not long enough to be ICE candidate")]
    ErrAttributeTooShortIceCandidate,
    #[error("candidate line is missing the typ token")]
    ErrMissingTypToken,
    #[error("could not parse related addresses")]
    ErrParseRelatedAddr,
    #[error("ice-ufrag must be between 4 and 256 characters")]
    ErrInvalidUfrag,
    #[error("ice-pwd must be between 22 and 256 characters")]
    ErrInvalidPwd,
    #[error("host name must not be empty")]
    ErrHostnameEmpty,
    #[error("maximum number of candidates reached")]
    ErrMaxCandidatesReached,
    #[error("candidate already present in description")]
    ErrDuplicateCandidate,
    #[error("candidate address is not resolved")]
    ErrUnresolvedCandidate,
    #[error("name resolution failed")]
    ErrResolutionFailed,

    #[error("parse int: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("parse ip: {0}")]
    ParseIp(#[from] net::AddrParseError),

    #[error("{0}")]
    Other(String),
}
