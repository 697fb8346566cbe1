use std::sync::Arc;

use common::storage::{CredentialStore, EventStore, MemoryStore};
use common::{AccessError, Event, EventId, Organizer, OrganizerId, Round, RouteDescriptor};
use tracing::instrument;

use crate::auth::{Authenticator, LoginRequest};
use crate::codes::CodeGenerator;
use crate::config::{AppConfig, AuthConfig};
use crate::models::{JoinCodes, validate_email, validate_password};
use crate::registry::EventRegistry;

/// Entry point for the calling surfaces. Cheap to clone; clones share one store.
#[derive(Clone)]
pub struct AccessService {
    auth_config: AuthConfig,
    credentials: Arc<dyn CredentialStore>,
    registry: EventRegistry,
    codes: CodeGenerator,
    authenticator: Authenticator,
}

impl AccessService {
    /// Build a service over a fresh in-memory store.
    pub fn new(config: &AppConfig) -> Result<Self, AccessError> {
        let store = Arc::new(MemoryStore::new(&config.auth)?);
        Self::with_store(store, config)
    }

    pub fn with_store<S>(store: Arc<S>, config: &AppConfig) -> Result<Self, AccessError>
    where
        S: CredentialStore + EventStore + 'static,
    {
        let credentials: Arc<dyn CredentialStore> = store.clone();
        let events: Arc<dyn EventStore> = store;

        Ok(Self {
            auth_config: config.auth.clone(),
            registry: EventRegistry::new(credentials.clone(), events.clone()),
            codes: CodeGenerator::new(credentials.clone(), &config.codes)?,
            authenticator: Authenticator::new(credentials.clone(), events),
            credentials,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<RouteDescriptor, AccessError> {
        self.authenticator.login(request).await
    }

    #[instrument(skip(self, password))]
    pub async fn register_organizer(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Organizer, AccessError> {
        validate_email(email)?;
        validate_password(password, &self.auth_config)?;
        self.credentials.register_organizer(email, password).await
    }

    #[instrument(skip(self, current, new))]
    pub async fn change_password(
        &self,
        organizer_id: OrganizerId,
        current: &str,
        new: &str,
    ) -> Result<(), AccessError> {
        validate_password(new, &self.auth_config)?;
        self.credentials
            .change_password(organizer_id, current, new)
            .await
    }

    pub async fn create_event(
        &self,
        organizer_id: OrganizerId,
        name: &str,
    ) -> Result<Event, AccessError> {
        self.registry.create_event(organizer_id, name).await
    }

    pub async fn list_events(&self, organizer_id: OrganizerId) -> Result<Vec<Event>, AccessError> {
        self.registry.list_events(organizer_id).await
    }

    pub async fn get_event(&self, event_id: EventId) -> Result<Event, AccessError> {
        self.registry.get_event(event_id).await
    }

    pub async fn create_round(
        &self,
        organizer_id: OrganizerId,
        event_id: EventId,
        name: &str,
    ) -> Result<Round, AccessError> {
        self.registry
            .create_round(organizer_id, event_id, name)
            .await
    }

    pub async fn list_rounds(&self, event_id: EventId) -> Result<Vec<Round>, AccessError> {
        self.registry.list_rounds(event_id).await
    }

    /// Rotate both join codes of an event owned by `organizer_id`.
    #[instrument(skip(self))]
    pub async fn generate_codes(
        &self,
        organizer_id: OrganizerId,
        event_id: EventId,
    ) -> Result<JoinCodes, AccessError> {
        let event = self.registry.owned_event(organizer_id, event_id).await?;
        let codes = self.codes.generate(event.id).await?;
        JoinCodes::try_from(codes)
    }

    /// `NotFound` until codes have been generated for the event.
    pub async fn active_codes(
        &self,
        organizer_id: OrganizerId,
        event_id: EventId,
    ) -> Result<JoinCodes, AccessError> {
        let event = self.registry.owned_event(organizer_id, event_id).await?;
        let codes = self.credentials.active_codes(event.id).await?;
        JoinCodes::try_from(codes)
    }
}
