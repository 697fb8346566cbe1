use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::Rng;

use crate::config::AuthConfig;
use crate::error::AccessError;

/// Argon2id hashing for organizer passwords.
#[derive(Clone)]
pub struct Hasher {
    argon2: Argon2<'static>,
    /// Hash of a throwaway password, verified against when the email is unknown
    /// so both failure paths cost one Argon2 run.
    decoy: String,
}

impl Hasher {
    pub fn new(config: &AuthConfig) -> Result<Self, AccessError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let decoy = hash_with(&argon2, "decoy-password-never-issued")?;
        Ok(Self { argon2, decoy })
    }

    pub fn hash(&self, password: &str) -> Result<String, AccessError> {
        hash_with(&self.argon2, password)
    }

    /// `false` for a mismatch or an unparseable stored hash.
    pub fn verify(&self, password: &str, hashword: &str) -> bool {
        PasswordHash::new(hashword)
            .map(|hash| {
                self.argon2
                    .verify_password(password.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Burn one verification without a real account behind it. Always `false`.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.decoy);
        false
    }
}

fn salt() -> Result<SaltString, AccessError> {
    let mut bytes = [0u8; 16];
    rand::rng().fill(&mut bytes);
    Ok(SaltString::encode_b64(&bytes)?)
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, AccessError> {
    let salt = salt()?;
    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

#[cfg(test)]
pub(crate) fn cheap_config() -> AuthConfig {
    AuthConfig {
        argon2_memory_kib: 64,
        argon2_iterations: 1,
        ..AuthConfig::default()
    }
}
