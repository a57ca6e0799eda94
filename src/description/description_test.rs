use super::*;
use crate::candidate::{COMPONENT_RTCP, COMPONENT_RTP, Candidate, CandidateType};
use crate::error::Error;

fn test_description() -> Description {
    Description::new("someUfrag", "someLongEnoughPwd12345").unwrap()
}

fn host_candidate(addr: &str) -> Candidate {
    Candidate::new_local(CandidateType::Host, COMPONENT_RTP, addr.parse().unwrap()).unwrap()
}

#[test]
fn test_new_validates_credential_bounds() {
    assert_eq!(
        Description::new("abc", "someLongEnoughPwd12345"),
        Err(Error::ErrInvalidUfrag)
    );
    assert_eq!(
        Description::new("someUfrag", "tooShort"),
        Err(Error::ErrInvalidPwd)
    );
    assert_eq!(
        Description::new("u".repeat(257), "someLongEnoughPwd12345"),
        Err(Error::ErrInvalidUfrag)
    );
    assert!(Description::new("someUfrag", "someLongEnoughPwd12345").is_ok());
}

#[test]
fn test_new_local_generates_valid_credentials() {
    let desc = Description::new_local();
    assert_eq!(desc.ice_ufrag().len(), 16);
    assert_eq!(desc.ice_pwd().len(), 32);
    assert!(desc.candidates().is_empty());

    // Generated credentials satisfy the constructor's own contract.
    assert!(Description::new(desc.ice_ufrag(), desc.ice_pwd()).is_ok());
}

#[test]
fn test_add_candidate_capacity() {
    let mut desc = test_description();

    for i in 0..MAX_CANDIDATES {
        let addr = format!("192.0.2.1:{}", 1000 + i);
        desc.add_candidate(host_candidate(&addr)).unwrap();
    }
    assert_eq!(desc.candidates().len(), MAX_CANDIDATES);

    let snapshot = desc.candidates().to_vec();
    assert_eq!(
        desc.add_candidate(host_candidate("192.0.2.1:5000")),
        Err(Error::ErrMaxCandidatesReached)
    );

    // The existing entries are untouched.
    assert_eq!(desc.candidates(), snapshot.as_slice());
}

#[test]
fn test_add_candidate_rejects_duplicates() {
    let mut desc = test_description();
    desc.add_candidate(host_candidate("192.0.2.1:1000")).unwrap();

    // Same resolved address and component.
    assert_eq!(
        desc.add_candidate(host_candidate("192.0.2.1:1000")),
        Err(Error::ErrDuplicateCandidate)
    );

    // Same address, different component: not a duplicate.
    let rtcp = Candidate::new_local(
        CandidateType::Host,
        COMPONENT_RTCP,
        "192.0.2.1:1000".parse().unwrap(),
    )
    .unwrap();
    desc.add_candidate(rtcp).unwrap();
    assert_eq!(desc.candidates().len(), 2);
}

#[test]
fn test_sort_candidates_is_stable() {
    let mut desc = test_description();

    // Priorities [10, 30, 30] in insertion order, distinguished by port.
    for (priority, port) in [(10u32, 1001u16), (30, 1002), (30, 1003)] {
        let raw = format!("1 1 udp {priority} 192.0.2.1 {port} typ host");
        desc.add_candidate(crate::candidate::unmarshal_candidate(&raw).unwrap())
            .unwrap();
    }

    desc.sort_candidates();

    let got: Vec<(u32, u16)> = desc
        .candidates()
        .iter()
        .map(|c| (c.priority(), c.resolved().unwrap().port()))
        .collect();

    // Descending priority; the two 30s keep their insertion order.
    assert_eq!(got, vec![(30, 1002), (30, 1003), (10, 1001)]);
}

#[test]
fn test_find_candidate_from_addr() {
    let mut desc = test_description();
    desc.add_candidate(host_candidate("192.0.2.1:1000")).unwrap();
    desc.add_candidate(host_candidate("192.0.2.2:2000")).unwrap();

    let found = desc
        .find_candidate_from_addr("192.0.2.2:2000".parse().unwrap())
        .unwrap();
    assert_eq!(found.resolved(), Some("192.0.2.2:2000".parse().unwrap()));

    assert!(
        desc.find_candidate_from_addr("198.51.100.1:1000".parse().unwrap())
            .is_none()
    );
}

#[test]
fn test_marshal_unmarshal_round_trip() {
    let mut desc = test_description();
    desc.add_candidate(host_candidate("192.0.2.1:1000")).unwrap();
    desc.add_candidate(
        Candidate::new_local(
            CandidateType::ServerReflexive,
            COMPONENT_RTP,
            "203.0.113.5:3478".parse().unwrap(),
        )
        .unwrap(),
    )
    .unwrap();

    let sdp = desc.marshal();
    assert!(sdp.starts_with("a=ice-ufrag:someUfrag\r\n"));
    assert!(sdp.contains("a=ice-pwd:someLongEnoughPwd12345\r\n"));

    let parsed = Description::unmarshal(&sdp).unwrap();
    assert_eq!(parsed, desc);
}

#[test]
fn test_unmarshal_skips_unrelated_lines() {
    let sdp = "v=0\n\
               o=- 4962303333179871722 1 IN IP4 0.0.0.0\n\
               s=-\n\
               m=application 9 UDP/DTLS/SCTP webrtc-datachannel\n\
               a=ice-ufrag:someUfrag\n\
               a=ice-pwd:someLongEnoughPwd12345\n\
               a=setup:actpass\n\
               a=candidate:4234997325 1 udp 2130706431 192.0.2.1 2345 typ host\n";

    let desc = Description::unmarshal(sdp).unwrap();
    assert_eq!(desc.ice_ufrag(), "someUfrag");
    assert_eq!(desc.ice_pwd(), "someLongEnoughPwd12345");
    assert_eq!(desc.candidates().len(), 1);
    assert_eq!(
        desc.candidates()[0].resolved(),
        Some("192.0.2.1:2345".parse().unwrap())
    );
}

#[test]
fn test_unmarshal_malformed_candidate_line_fails_whole_parse() {
    let sdp = "a=ice-ufrag:someUfrag\r\n\
               a=ice-pwd:someLongEnoughPwd12345\r\n\
               a=candidate:4234997325 1 udp priority 192.0.2.1 2345 typ host\r\n";

    assert!(Description::unmarshal(sdp).is_err());
}

#[test]
fn test_unmarshal_requires_credentials() {
    assert_eq!(
        Description::unmarshal("a=ice-pwd:someLongEnoughPwd12345\r\n"),
        Err(Error::ErrInvalidUfrag)
    );
    assert_eq!(
        Description::unmarshal("a=ice-ufrag:someUfrag\r\n"),
        Err(Error::ErrInvalidPwd)
    );
    assert_eq!(
        Description::unmarshal("a=ice-ufrag:abc\r\na=ice-pwd:someLongEnoughPwd12345\r\n"),
        Err(Error::ErrInvalidUfrag)
    );
}

#[test]
fn test_unmarshal_drops_candidates_beyond_capacity() {
    let mut sdp = String::from(
        "a=ice-ufrag:someUfrag\r\na=ice-pwd:someLongEnoughPwd12345\r\n",
    );
    for i in 0..MAX_CANDIDATES + 2 {
        sdp.push_str(&format!(
            "a=candidate:4234997325 1 udp 2130706431 192.0.2.1 {} typ host\r\n",
            1000 + i,
        ));
    }

    // Overflow is not a parse failure; the first 16 are kept.
    let desc = Description::unmarshal(&sdp).unwrap();
    assert_eq!(desc.candidates().len(), MAX_CANDIDATES);
    assert_eq!(desc.candidates()[0].resolved().unwrap().port(), 1000);
    assert_eq!(
        desc.candidates()[MAX_CANDIDATES - 1].resolved().unwrap().port(),
        1000 + MAX_CANDIDATES as u16 - 1,
    );
}
