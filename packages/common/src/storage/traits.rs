use async_trait::async_trait;

use super::code::{EventCodes, JoinCode};
use crate::error::AccessError;
use crate::ids::{EventId, OrganizerId};
use crate::record::{Event, Organizer, Round};
use crate::role::EventRole;

/// Organizer credentials and per-event join codes.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fails with `DuplicateIdentity` if the email is taken, ignoring case.
    async fn register_organizer(&self, email: &str, password: &str)
    -> Result<Organizer, AccessError>;

    /// Fails with `InvalidCredentials` for an unknown email or a wrong password.
    async fn verify_organizer(&self, email: &str, password: &str)
    -> Result<OrganizerId, AccessError>;

    async fn change_password(
        &self,
        id: OrganizerId,
        current: &str,
        new: &str,
    ) -> Result<(), AccessError>;

    async fn find_organizer(&self, id: OrganizerId) -> Result<Option<Organizer>, AccessError>;

    /// Overwrite the active code for one role. Last write wins. A code already
    /// active for the other role of the event is refused.
    async fn set_event_code(
        &self,
        event_id: EventId,
        role: EventRole,
        code: JoinCode,
    ) -> Result<(), AccessError>;

    /// Replace both codes of an event in a single write.
    ///
    /// Readers observe either the previous codes or `codes`, never a mix. The two
    /// codes must differ.
    async fn set_event_codes(&self, event_id: EventId, codes: EventCodes)
    -> Result<(), AccessError>;

    async fn active_code(
        &self,
        event_id: EventId,
        role: EventRole,
    ) -> Result<Option<JoinCode>, AccessError>;

    async fn active_codes(&self, event_id: EventId) -> Result<EventCodes, AccessError>;

    /// Reserve `code` for `event_id`. Returns `false` if any event, this one
    /// included, already holds it.
    async fn claim_code(&self, event_id: EventId, code: &JoinCode) -> Result<bool, AccessError>;

    /// Drop a reservation that never became active.
    async fn release_code(&self, event_id: EventId, code: &JoinCode) -> Result<(), AccessError>;
}

/// Events, their ownership, and their ordered rounds.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert an event and record it under its owner. `Unauthorized` if the owner is unknown.
    async fn insert_event(&self, event: Event) -> Result<(), AccessError>;

    async fn event(&self, id: EventId) -> Result<Option<Event>, AccessError>;

    /// Events owned by `organizer_id`, in creation order.
    async fn events_owned_by(&self, organizer_id: OrganizerId) -> Result<Vec<Event>, AccessError>;

    /// Append a round at the end of the event's sequence. `EventNotFound` if unknown.
    async fn append_round(&self, event_id: EventId, name: String) -> Result<Round, AccessError>;

    /// Rounds of an event in position order.
    async fn rounds(&self, event_id: EventId) -> Result<Vec<Round>, AccessError>;
}
