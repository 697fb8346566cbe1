use std::sync::Arc;

use common::storage::{CredentialStore, EventStore};
use common::{AccessError, Event, EventId, OrganizerId, Round};
use tracing::instrument;

use crate::models::validate_name;

/// Events and rounds, partitioned by owning organizer.
#[derive(Clone)]
pub struct EventRegistry {
    credentials: Arc<dyn CredentialStore>,
    events: Arc<dyn EventStore>,
}

impl EventRegistry {
    pub fn new(credentials: Arc<dyn CredentialStore>, events: Arc<dyn EventStore>) -> Self {
        Self {
            credentials,
            events,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_event(
        &self,
        organizer_id: OrganizerId,
        name: &str,
    ) -> Result<Event, AccessError> {
        self.require_organizer(organizer_id).await?;
        let name = validate_name(name, "Event")?;

        let event = Event::new(organizer_id, name);
        self.events.insert_event(event.clone()).await?;
        Ok(event)
    }

    /// Only the caller's own events, oldest first.
    pub async fn list_events(&self, organizer_id: OrganizerId) -> Result<Vec<Event>, AccessError> {
        self.require_organizer(organizer_id).await?;
        self.events.events_owned_by(organizer_id).await
    }

    pub async fn get_event(&self, event_id: EventId) -> Result<Event, AccessError> {
        self.events
            .event(event_id)
            .await?
            .ok_or(AccessError::EventNotFound)
    }

    /// Look up an event and check that `organizer_id` owns it.
    pub async fn owned_event(
        &self,
        organizer_id: OrganizerId,
        event_id: EventId,
    ) -> Result<Event, AccessError> {
        let event = self.get_event(event_id).await?;
        if !event.is_owned_by(organizer_id) {
            return Err(AccessError::Unauthorized);
        }
        Ok(event)
    }

    #[instrument(skip(self))]
    pub async fn create_round(
        &self,
        organizer_id: OrganizerId,
        event_id: EventId,
        name: &str,
    ) -> Result<Round, AccessError> {
        let event = self
            .events
            .event(event_id)
            .await?
            .ok_or_else(|| AccessError::NotFound("Event not found".into()))?;
        if !event.is_owned_by(organizer_id) {
            return Err(AccessError::Unauthorized);
        }
        let name = validate_name(name, "Round")?;

        self.events.append_round(event.id, name).await
    }

    pub async fn list_rounds(&self, event_id: EventId) -> Result<Vec<Round>, AccessError> {
        self.events.rounds(event_id).await
    }

    async fn require_organizer(&self, organizer_id: OrganizerId) -> Result<(), AccessError> {
        match self.credentials.find_organizer(organizer_id).await? {
            Some(_) => Ok(()),
            None => Err(AccessError::Unauthorized),
        }
    }
}
