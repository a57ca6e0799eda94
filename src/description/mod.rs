#[cfg(test)]
mod description_test;

use std::net::SocketAddr;

use crate::candidate::{Candidate, unmarshal_candidate};
use crate::error::{Error, Result};
use crate::rand::{generate_pwd, generate_ufrag};

/// Maximum number of candidates carried by one description. A push past
/// this bound fails with an explicit capacity error instead of growing.
pub const MAX_CANDIDATES: usize = 16;

const MIN_UFRAG_LEN: usize = 4;
const MAX_UFRAG_LEN: usize = 256;
const MIN_PWD_LEN: usize = 22;
const MAX_PWD_LEN: usize = 256;

/// One endpoint's full ICE state for offer/answer exchange: the
/// credential pair and an ordered, bounded set of candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Description {
    ice_ufrag: String,
    ice_pwd: String,
    candidates: Vec<Candidate>,
}

impl Description {
    /// Creates a description with caller-supplied credentials,
    /// validating their RFC 8445 length bounds.
    pub fn new(ice_ufrag: impl Into<String>, ice_pwd: impl Into<String>) -> Result<Self> {
        let ice_ufrag = ice_ufrag.into();
        if ice_ufrag.len() < MIN_UFRAG_LEN || ice_ufrag.len() > MAX_UFRAG_LEN {
            return Err(Error::ErrInvalidUfrag);
        }

        let ice_pwd = ice_pwd.into();
        if ice_pwd.len() < MIN_PWD_LEN || ice_pwd.len() > MAX_PWD_LEN {
            return Err(Error::ErrInvalidPwd);
        }

        Ok(Self {
            ice_ufrag,
            ice_pwd,
            candidates: vec![],
        })
    }

    /// Creates the local description with freshly generated credentials
    /// and no candidates yet.
    pub fn new_local() -> Self {
        Self {
            ice_ufrag: generate_ufrag(),
            ice_pwd: generate_pwd(),
            candidates: vec![],
        }
    }

    pub fn ice_ufrag(&self) -> &str {
        &self.ice_ufrag
    }

    pub fn ice_pwd(&self) -> &str {
        &self.ice_pwd
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Appends a candidate if capacity allows and no semantically
    /// identical candidate (same resolved address and component) is
    /// already present. The existing entries are left untouched on
    /// failure.
    pub fn add_candidate(&mut self, candidate: Candidate) -> Result<()> {
        if self.candidates.len() >= MAX_CANDIDATES {
            return Err(Error::ErrMaxCandidatesReached);
        }

        for existing in &self.candidates {
            if existing.component() == candidate.component()
                && existing.resolved().is_some()
                && existing.resolved() == candidate.resolved()
            {
                return Err(Error::ErrDuplicateCandidate);
            }
        }

        self.candidates.push(candidate);
        Ok(())
    }

    /// Orders candidates by descending priority. `sort_by` is stable,
    /// so candidates with equal priority keep their insertion order and
    /// the result is reproducible for a given input set.
    pub fn sort_candidates(&mut self) {
        self.candidates
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Returns the first candidate whose resolved address equals
    /// `address`, in current ordering.
    pub fn find_candidate_from_addr(&self, address: SocketAddr) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|c| c.resolved() == Some(address))
    }

    /// Renders the description as an SDP fragment: `a=ice-ufrag`,
    /// `a=ice-pwd` and one `a=candidate` line per resolved candidate,
    /// CRLF-terminated. Unresolved candidates cannot be expressed on
    /// the wire and are skipped with a warning.
    pub fn marshal(&self) -> String {
        let mut sdp = format!(
            "a=ice-ufrag:{}\r\na=ice-pwd:{}\r\n",
            self.ice_ufrag, self.ice_pwd,
        );

        for candidate in &self.candidates {
            match candidate.marshal() {
                Ok(val) => {
                    sdp.push_str("a=candidate:");
                    sdp.push_str(&val);
                    sdp.push_str("\r\n");
                }
                Err(_) => {
                    log::warn!("skipping unresolved candidate in SDP: {candidate}");
                }
            }
        }

        sdp
    }

    /// Parses an SDP fragment into a description.
    ///
    /// Parsing is line-oriented, accepts both CRLF and LF endings, and
    /// skips unrelated SDP lines. A malformed `a=candidate` line fails
    /// the whole parse; candidate lines beyond [`MAX_CANDIDATES`] are
    /// dropped with a warning while the parse itself succeeds. Both
    /// credentials must be present.
    pub fn unmarshal(sdp: &str) -> Result<Self> {
        let mut ice_ufrag = None;
        let mut ice_pwd = None;
        let mut candidates: Vec<Candidate> = vec![];

        for line in sdp.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(value) = line.strip_prefix("a=ice-ufrag:") {
                if value.len() < MIN_UFRAG_LEN || value.len() > MAX_UFRAG_LEN {
                    return Err(Error::ErrInvalidUfrag);
                }
                ice_ufrag = Some(value.to_owned());
            } else if let Some(value) = line.strip_prefix("a=ice-pwd:") {
                if value.len() < MIN_PWD_LEN || value.len() > MAX_PWD_LEN {
                    return Err(Error::ErrInvalidPwd);
                }
                ice_pwd = Some(value.to_owned());
            } else if line.starts_with("a=candidate:") {
                let candidate = unmarshal_candidate(line)?;
                if candidates.len() >= MAX_CANDIDATES {
                    log::warn!("dropping candidate beyond capacity of {MAX_CANDIDATES}");
                    continue;
                }
                candidates.push(candidate);
            } else {
                log::trace!("skipping unrelated SDP line: {line}");
            }
        }

        Ok(Self {
            ice_ufrag: ice_ufrag.ok_or(Error::ErrInvalidUfrag)?,
            ice_pwd: ice_pwd.ok_or(Error::ErrInvalidPwd)?,
            candidates,
        })
    }
}
