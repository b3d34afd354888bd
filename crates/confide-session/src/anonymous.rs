use confide_core::{ANONYMOUS_ID_PREFIX, Identity};

use chrono::Utc;
use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Generates a fresh id: the anonymous tag plus 9 random base-36 characters.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{ANONYMOUS_ID_PREFIX}{suffix}")
}

/// A brand-new anonymous identity created now.
pub fn new_identity() -> Identity {
    Identity::anonymous(generate_id(), Utc::now())
}

/// Whether a stored record looks like something `new_identity` produced.
pub fn is_well_formed(identity: &Identity) -> bool {
    identity.is_anonymous
        && identity
            .id
            .strip_prefix(ANONYMOUS_ID_PREFIX)
            .is_some_and(|suffix| !suffix.is_empty())
}
