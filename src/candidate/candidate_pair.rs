use std::cmp;
use std::fmt;

use crate::candidate::Candidate;
use crate::description::Description;
use crate::error::{Error, Result};

/// Represents a combination of a local and remote candidate.
///
/// A pair does not own its candidates: it holds the positions of the
/// entries inside the local and remote [`Description`] it was formed
/// from, plus a snapshot of their priorities. Reordering or removing
/// candidates on either side invalidates those handles, so pairs must
/// be formed again after a description changes.
#[derive(Clone, Copy, Debug)]
pub struct CandidatePair {
    pub local_index: usize,
    pub remote_index: usize,
    pub local_priority: u32,
    pub remote_priority: u32,
    pub(crate) controlling: bool,
}

impl fmt::Display for CandidatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "prio {} (local, prio {}) {} <-> {} (remote, prio {})",
            self.priority(),
            self.local_priority,
            self.local_index,
            self.remote_index,
            self.remote_priority,
        )
    }
}

impl PartialEq for CandidatePair {
    fn eq(&self, other: &Self) -> bool {
        self.local_index == other.local_index && self.remote_index == other.remote_index
    }
}

impl CandidatePair {
    /// Pairs up a local and a remote candidate. Both candidates must
    /// carry a resolved address; their priorities are captured at this
    /// point, together with which side plays the controlling role.
    pub fn new(
        local_index: usize,
        remote_index: usize,
        local: &Candidate,
        remote: &Candidate,
        is_controlling: bool,
    ) -> Result<Self> {
        if local.resolved().is_none() || remote.resolved().is_none() {
            return Err(Error::ErrUnresolvedCandidate);
        }

        Ok(Self {
            local_index,
            remote_index,
            local_priority: local.priority(),
            remote_priority: remote.priority(),
            controlling: is_controlling,
        })
    }

    /// RFC 8445 6.1.2.3. Computing Pair Priority and Ordering Pairs
    ///
    /// Let G be the priority for the candidate provided by the
    /// controlling agent. Let D be the priority for the candidate
    /// provided by the controlled agent.
    ///
    /// pair priority = 2^32*MIN(G,D) + 2*MAX(G,D) + (G>D?1:0)
    pub fn priority(&self) -> u64 {
        let (g, d) = if self.controlling {
            (self.local_priority, self.remote_priority)
        } else {
            (self.remote_priority, self.local_priority)
        };

        // Formula-computed candidate priorities stay below 2^31, but a
        // wire-supplied priority can be u32::MAX; saturate rather than
        // wrap in that corner.
        ((1u64 << 32) * u64::from(cmp::min(g, d)))
            .saturating_add(2 * u64::from(cmp::max(g, d)))
            .saturating_add(u64::from(g > d))
    }
}

/// Forms the ordered pair sequence the connectivity-check layer will
/// attempt: the cartesian product of the two descriptions' resolved
/// candidates, sorted by descending pair priority. Unresolved
/// candidates are skipped. Equal-priority pairs keep their formation
/// order (local-major), so the output is deterministic for a given
/// input set.
pub fn pair_candidates(
    local: &Description,
    remote: &Description,
    is_controlling: bool,
) -> Vec<CandidatePair> {
    let mut pairs = vec![];
    for (local_index, local_candidate) in local.candidates().iter().enumerate() {
        for (remote_index, remote_candidate) in remote.candidates().iter().enumerate() {
            match CandidatePair::new(
                local_index,
                remote_index,
                local_candidate,
                remote_candidate,
                is_controlling,
            ) {
                Ok(pair) => pairs.push(pair),
                Err(_) => {
                    log::trace!("skipping unresolved pair {local_index} <-> {remote_index}");
                }
            }
        }
    }

    pairs.sort_by(|a, b| b.priority().cmp(&a.priority()));
    pairs
}
