mod code;
mod hash;
mod memory;
mod password;
mod traits;

pub use code::{EventCodes, JoinCode};
pub use hash::CodeDigest;
pub use memory::MemoryStore;
pub use password::Hasher;
pub use traits::{CredentialStore, EventStore};

/// Canonical key for organizer emails: trimmed and lower-cased.
pub fn normalise_email(email: &str) -> String {
    email.trim().to_lowercase()
}
