
use std::net::SocketAddr;

use crate::addr;
use crate::candidate::Candidate;
use crate::error::{Error, Result};

/// Name-resolution capability injected by the surrounding system (DNS,
/// multicast DNS, a test fake). The core never performs lookups itself.
pub trait NameResolver {
    /// Resolves `hostname`/`service` to one or more transport
    /// addresses. Implementations may block or delegate to an async
    /// runtime; the core imposes no ordering between lookups for
    /// different candidates.
    fn lookup(&self, hostname: &str, service: &str) -> Result<Vec<SocketAddr>>;
}

/// Selects how [`resolve_candidate`] turns a textual endpoint into a
/// concrete address.
pub enum ResolveMode<'a> {
    /// Treat the hostname as a numeric literal; no lookup capability is
    /// invoked.
    Simple,
    /// Delegate to the injected name-resolution capability.
    Lookup(&'a dyn NameResolver),
}

/// Resolves a candidate's textual endpoint in place.
///
/// A candidate that already carries a resolved address is left as is
/// and the call succeeds without consulting any capability. On failure
/// the candidate remains unresolved; other candidates are unaffected,
/// so callers may resolve their set independently and proceed with
/// whichever succeed.
pub fn resolve_candidate(candidate: &mut Candidate, mode: ResolveMode<'_>) -> Result<()> {
    if candidate.resolved().is_some() {
        return Ok(());
    }

    if candidate.hostname().is_empty() {
        return Err(Error::ErrHostnameEmpty);
    }

    match mode {
        ResolveMode::Simple => {
            let address = addr::parse_addr(candidate.hostname(), candidate.service())?;
            candidate.set_resolved(address);
        }
        ResolveMode::Lookup(resolver) => {
            log::debug!(
                "resolving {}:{}",
                candidate.hostname(),
                candidate.service(),
            );

            let records = resolver
                .lookup(candidate.hostname(), candidate.service())
                .map_err(|err| {
                    log::warn!("lookup for {} failed: {err}", candidate.hostname());
                    Error::ErrResolutionFailed
                })?;

            let address = records.into_iter().next().ok_or(Error::ErrResolutionFailed)?;
            log::debug!("resolved {} to {address}", candidate.hostname());
            candidate.set_resolved(address);
        }
    }

    Ok(())
}
