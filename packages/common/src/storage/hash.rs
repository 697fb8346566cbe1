use std::fmt;

use argon2::password_hash::Output;
use sha2::{Digest, Sha256};

/// SHA-256 digest of a normalised join code.
///
/// Equality is constant-time, so comparing a submitted code against the active
/// one leaks nothing about how many leading bytes matched.
#[derive(Clone, Copy)]
pub struct CodeDigest([u8; 32]);

impl CodeDigest {
    /// Digest a code as typed by a user. Whitespace is trimmed and letters upper-cased.
    pub fn compute(code: &str) -> Self {
        let normalised = normalise(code);
        Self(Sha256::digest(normalised.as_bytes()).into())
    }

    /// First 8 hex characters. Safe to log.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

/// Canonical form of a join code.
pub fn normalise(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl PartialEq for CodeDigest {
    fn eq(&self, other: &Self) -> bool {
        // `Output` compares in constant time. 32 bytes is always a valid length.
        match (Output::new(&self.0), Output::new(&other.0)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CodeDigest {}

impl fmt::Debug for CodeDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodeDigest({}..)", self.fingerprint())
    }
}
