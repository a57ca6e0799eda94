
use rand::Rng;

const RUNES_ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const LEN_UFRAG: usize = 16;
const LEN_PWD: usize = 32;

fn generate_random_string(n: usize, runes: &[u8]) -> String {
    let mut rng = rand::rng();

    (0..n)
        .map(|_| {
            let idx = rng.random_range(0..runes.len());
            runes[idx] as char
        })
        .collect()
}

/// Generates an ICE user fragment (RFC 8445 requires 4 to 256
/// characters; 16 are generated).
pub fn generate_ufrag() -> String {
    generate_random_string(LEN_UFRAG, RUNES_ALPHA)
}

/// Generates an ICE password (RFC 8445 requires 22 to 256 characters;
/// 32 are generated).
pub fn generate_pwd() -> String {
    generate_random_string(LEN_PWD, RUNES_ALPHA)
}
