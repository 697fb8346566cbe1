use std::sync::Arc;

use common::config::{CodeConfig, MIN_CODE_LENGTH};
use common::storage::{CredentialStore, EventCodes, JoinCode};
use common::{AccessError, EventId, EventRole};
use rand::Rng;
use tracing::{debug, instrument, warn};

/// 32 symbols with the easily misread `I`, `O`, `0` and `1` left out.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Issues and rotates the join codes of events.
#[derive(Clone)]
pub struct CodeGenerator {
    store: Arc<dyn CredentialStore>,
    length: usize,
    max_attempts: u32,
}

impl CodeGenerator {
    pub fn new(store: Arc<dyn CredentialStore>, config: &CodeConfig) -> Result<Self, AccessError> {
        if config.length < MIN_CODE_LENGTH {
            return Err(AccessError::Internal(format!(
                "codes.length must be at least {MIN_CODE_LENGTH}, got {}",
                config.length
            )));
        }
        if config.max_attempts == 0 {
            return Err(AccessError::Internal(
                "codes.max_attempts must be at least 1".into(),
            ));
        }
        Ok(Self {
            store,
            length: config.length,
            max_attempts: config.max_attempts,
        })
    }

    /// Replace both codes of `event_id` with fresh ones and return them.
    ///
    /// The previous codes stop validating as soon as this returns.
    #[instrument(skip(self))]
    pub async fn generate(&self, event_id: EventId) -> Result<EventCodes, AccessError> {
        let panelist = self.draw_unclaimed(event_id, EventRole::Panelist).await?;
        let participant = match self.draw_unclaimed(event_id, EventRole::Participant).await {
            Ok(code) => code,
            Err(e) => {
                self.release_all(event_id, [&panelist]).await;
                return Err(e);
            }
        };

        let codes = EventCodes::pair(panelist, participant);
        if let Err(e) = self.store.set_event_codes(event_id, codes.clone()).await {
            self.release_all(event_id, codes.iter()).await;
            return Err(e);
        }

        debug!(
            panelist = %codes.panelist.as_ref().map(JoinCode::fingerprint).unwrap_or_default(),
            participant = %codes.participant.as_ref().map(JoinCode::fingerprint).unwrap_or_default(),
            "Join codes rotated"
        );
        Ok(codes)
    }

    pub fn draw(&self, role: EventRole) -> JoinCode {
        draw_code(role, self.length)
    }

    /// Best-effort release of reservations on a failed rotation.
    async fn release_all<'a>(
        &self,
        event_id: EventId,
        codes: impl IntoIterator<Item = &'a JoinCode>,
    ) {
        for code in codes {
            if let Err(e) = self.store.release_code(event_id, code).await {
                warn!(fingerprint = %code.fingerprint(), error = %e, "Failed to release join code");
            }
        }
    }

    /// A code the event already holds counts as a collision.
    async fn draw_unclaimed(
        &self,
        event_id: EventId,
        role: EventRole,
    ) -> Result<JoinCode, AccessError> {
        for attempt in 1..=self.max_attempts {
            let code = self.draw(role);
            if self.store.claim_code(event_id, &code).await? {
                return Ok(code);
            }
            warn!(%role, attempt, "Join code collision, drawing again");
        }
        Err(AccessError::Internal(format!(
            "no free {role} code after {} attempts",
            self.max_attempts
        )))
    }
}

/// Role prefix followed by `length` random symbols from [`ALPHABET`].
pub fn draw_code(role: EventRole, length: usize) -> JoinCode {
    let mut rng = rand::rng();
    let mut value = String::with_capacity(length + 1);
    value.push(role.code_prefix());
    value.extend((0..length).map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char));
    JoinCode::new(value)
}
