use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use super::code::{EventCodes, JoinCode};
use super::normalise_email;
use super::password::Hasher;
use super::traits::{CredentialStore, EventStore};
use crate::config::AuthConfig;
use crate::error::AccessError;
use crate::ids::{EventId, OrganizerId, RoundId};
use crate::record::{Event, Organizer, Round};
use crate::role::EventRole;

struct OrganizerRow {
    organizer: Organizer,
    password_hash: String,
}

enum Claim {
    /// Newly reserved by this call.
    Fresh,
    /// Already reserved by the same event.
    Held,
    /// Reserved by a different event.
    Taken,
}

/// Concurrent in-memory store.
///
/// Every entity kind sits in its own sharded map, so traffic for one event never
/// waits on a lock held for another. Lock order when two maps are touched:
/// emails -> organizers -> events -> rounds, and codes -> claims.
pub struct MemoryStore {
    hasher: Hasher,
    organizers: DashMap<OrganizerId, OrganizerRow>,
    emails: DashMap<String, OrganizerId>,
    events: DashMap<EventId, Event>,
    rounds: DashMap<RoundId, Round>,
    codes: DashMap<EventId, EventCodes>,
    /// Active or reserved code -> owning event. Keeps codes unique across events.
    claims: DashMap<String, EventId>,
}

impl MemoryStore {
    pub fn new(config: &AuthConfig) -> Result<Self, AccessError> {
        Ok(Self::with_hasher(Hasher::new(config)?))
    }

    pub fn with_hasher(hasher: Hasher) -> Self {
        Self {
            hasher,
            organizers: DashMap::new(),
            emails: DashMap::new(),
            events: DashMap::new(),
            rounds: DashMap::new(),
            codes: DashMap::new(),
            claims: DashMap::new(),
        }
    }

    fn claim(&self, event_id: EventId, code: &JoinCode) -> Claim {
        match self.claims.entry(code.as_str().to_string()) {
            Entry::Occupied(owner) if *owner.get() == event_id => Claim::Held,
            Entry::Occupied(_) => Claim::Taken,
            Entry::Vacant(slot) => {
                slot.insert(event_id);
                Claim::Fresh
            }
        }
    }

    fn release(&self, event_id: EventId, code: &JoinCode) {
        self.claims
            .remove_if(code.as_str(), |_, owner| *owner == event_id);
    }

    /// Release `old` unless a slot of the event still holds it.
    fn release_superseded(&self, event_id: EventId, slots: &EventCodes, old: &JoinCode) {
        if !slots.iter().any(|current| current == old) {
            self.release(event_id, old);
        }
    }

    fn stored_hash(&self, id: OrganizerId) -> Option<String> {
        self.organizers
            .get(&id)
            .map(|row| row.password_hash.clone())
    }
}

fn code_taken(code: &JoinCode) -> AccessError {
    AccessError::Internal(format!(
        "join code {}.. is held by another event",
        code.fingerprint()
    ))
}

fn code_shared(code: &JoinCode) -> AccessError {
    AccessError::Internal(format!(
        "join code {}.. cannot serve both roles of an event",
        code.fingerprint()
    ))
}

fn next_position(round_count: usize) -> Result<u32, AccessError> {
    u32::try_from(round_count)
        .map_err(|_| AccessError::Internal(format!("event already has {round_count} rounds")))
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn register_organizer(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Organizer, AccessError> {
        let email = normalise_email(email);
        if self.emails.contains_key(&email) {
            return Err(AccessError::DuplicateIdentity);
        }

        let password_hash = self.hasher.hash(password)?;

        match self.emails.entry(email.clone()) {
            Entry::Occupied(_) => {
                debug!("Registration race: email claimed while hashing");
                Err(AccessError::DuplicateIdentity)
            }
            Entry::Vacant(slot) => {
                let organizer = Organizer {
                    id: OrganizerId::new(),
                    email,
                    event_ids: Vec::new(),
                    created_at: Utc::now(),
                };
                self.organizers.insert(
                    organizer.id,
                    OrganizerRow {
                        organizer: organizer.clone(),
                        password_hash,
                    },
                );
                slot.insert(organizer.id);
                debug!(organizer_id = %organizer.id, "Organizer registered");
                Ok(organizer)
            }
        }
    }

    async fn verify_organizer(
        &self,
        email: &str,
        password: &str,
    ) -> Result<OrganizerId, AccessError> {
        let email = normalise_email(email);
        let found = self.emails.get(&email).map(|id| *id);

        let Some((id, hash)) = found.and_then(|id| self.stored_hash(id).map(|h| (id, h))) else {
            self.hasher.verify_decoy(password);
            return Err(AccessError::InvalidCredentials);
        };

        if self.hasher.verify(password, &hash) {
            Ok(id)
        } else {
            Err(AccessError::InvalidCredentials)
        }
    }

    async fn change_password(
        &self,
        id: OrganizerId,
        current: &str,
        new: &str,
    ) -> Result<(), AccessError> {
        let hash = self.stored_hash(id).ok_or(AccessError::InvalidCredentials)?;
        if !self.hasher.verify(current, &hash) {
            return Err(AccessError::InvalidCredentials);
        }

        let replacement = self.hasher.hash(new)?;
        let mut row = self
            .organizers
            .get_mut(&id)
            .ok_or(AccessError::InvalidCredentials)?;
        row.password_hash = replacement;
        debug!(organizer_id = %id, "Organizer password changed");
        Ok(())
    }

    async fn find_organizer(&self, id: OrganizerId) -> Result<Option<Organizer>, AccessError> {
        Ok(self.organizers.get(&id).map(|row| row.organizer.clone()))
    }

    async fn set_event_code(
        &self,
        event_id: EventId,
        role: EventRole,
        code: JoinCode,
    ) -> Result<(), AccessError> {
        let mut slots = self.codes.entry(event_id).or_default();
        if slots.get(role.other()) == Some(&code) {
            return Err(code_shared(&code));
        }
        if let Claim::Taken = self.claim(event_id, &code) {
            return Err(code_taken(&code));
        }

        if let Some(old) = slots.set(role, code.clone()) {
            self.release_superseded(event_id, &slots, &old);
        }
        drop(slots);
        debug!(%event_id, %role, fingerprint = %code.fingerprint(), "Join code set");
        Ok(())
    }

    async fn set_event_codes(
        &self,
        event_id: EventId,
        codes: EventCodes,
    ) -> Result<(), AccessError> {
        if let (Some(panelist), Some(participant)) = (&codes.panelist, &codes.participant)
            && panelist == participant
        {
            return Err(code_shared(panelist));
        }

        let mut slots = self.codes.entry(event_id).or_default();
        let mut fresh = Vec::new();
        for code in codes.iter() {
            match self.claim(event_id, code) {
                Claim::Fresh => fresh.push(code),
                Claim::Held => {}
                Claim::Taken => {
                    for claimed in fresh {
                        self.release(event_id, claimed);
                    }
                    return Err(code_taken(code));
                }
            }
        }

        // One swap under the entry guard replaces the whole pair.
        let previous = std::mem::replace(&mut *slots, codes);
        for old in previous.iter() {
            self.release_superseded(event_id, &slots, old);
        }
        drop(slots);
        debug!(%event_id, "Join codes replaced");
        Ok(())
    }

    async fn active_code(
        &self,
        event_id: EventId,
        role: EventRole,
    ) -> Result<Option<JoinCode>, AccessError> {
        Ok(self
            .codes
            .get(&event_id)
            .and_then(|codes| codes.get(role).cloned()))
    }

    async fn active_codes(&self, event_id: EventId) -> Result<EventCodes, AccessError> {
        Ok(self
            .codes
            .get(&event_id)
            .map(|codes| codes.clone())
            .unwrap_or_default())
    }

    async fn claim_code(&self, event_id: EventId, code: &JoinCode) -> Result<bool, AccessError> {
        Ok(matches!(self.claim(event_id, code), Claim::Fresh))
    }

    async fn release_code(&self, event_id: EventId, code: &JoinCode) -> Result<(), AccessError> {
        let active = self
            .codes
            .get(&event_id)
            .is_some_and(|codes| codes.iter().any(|current| current == code));
        if !active {
            self.release(event_id, code);
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn insert_event(&self, event: Event) -> Result<(), AccessError> {
        let mut owner = self
            .organizers
            .get_mut(&event.organizer_id)
            .ok_or(AccessError::Unauthorized)?;

        owner.organizer.event_ids.push(event.id);
        debug!(event_id = %event.id, organizer_id = %event.organizer_id, "Event created");
        self.events.insert(event.id, event);
        Ok(())
    }

    async fn event(&self, id: EventId) -> Result<Option<Event>, AccessError> {
        Ok(self.events.get(&id).map(|event| event.clone()))
    }

    async fn events_owned_by(&self, organizer_id: OrganizerId) -> Result<Vec<Event>, AccessError> {
        let ids = self
            .organizers
            .get(&organizer_id)
            .map(|row| row.organizer.event_ids.clone())
            .unwrap_or_default();

        Ok(ids
            .iter()
            .filter_map(|id| self.events.get(id).map(|event| event.clone()))
            .filter(|event| event.is_owned_by(organizer_id))
            .collect())
    }

    async fn append_round(&self, event_id: EventId, name: String) -> Result<Round, AccessError> {
        let mut event = self
            .events
            .get_mut(&event_id)
            .ok_or(AccessError::EventNotFound)?;

        let round = Round {
            id: RoundId::new(),
            event_id,
            name,
            position: next_position(event.round_ids.len())?,
            created_at: Utc::now(),
        };
        self.rounds.insert(round.id, round.clone());
        event.round_ids.push(round.id);
        debug!(%event_id, round_id = %round.id, position = round.position, "Round appended");
        Ok(round)
    }

    async fn rounds(&self, event_id: EventId) -> Result<Vec<Round>, AccessError> {
        let ids = self
            .events
            .get(&event_id)
            .map(|event| event.round_ids.clone())
            .ok_or(AccessError::EventNotFound)?;

        Ok(ids
            .iter()
            .filter_map(|id| self.rounds.get(id).map(|round| round.clone()))
            .collect())
    }
}
