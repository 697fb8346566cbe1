use std::sync::Arc;

use common::storage::{CredentialStore, EventStore, normalise_email};
use common::{AccessError, EventId, EventRole, RouteDescriptor};
use tracing::{debug, info, instrument};

use crate::models::validate_login_request;

/// A login attempt, already split by credential shape.
#[derive(Debug, Clone)]
pub enum LoginRequest {
    Organizer {
        email: String,
        password: String,
    },
    /// Panelist or participant entering one event with its join code.
    EventScoped {
        role: EventRole,
        email: String,
        password: String,
        event_id: String,
        code: String,
    },
}

impl LoginRequest {
    pub fn credentials(&self) -> (&str, &str) {
        match self {
            Self::Organizer { email, password } | Self::EventScoped { email, password, .. } => {
                (email, password)
            }
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Self::Organizer { .. } => "organizer",
            Self::EventScoped { .. } => "event_scoped",
        }
    }
}

/// Validates logins and decides where each admitted actor goes.
///
/// A request moves `received -> classified -> {organizer | event_scoped} ->
/// accepted | rejected`. The first failing check rejects it. Nothing is written.
#[derive(Clone)]
pub struct Authenticator {
    credentials: Arc<dyn CredentialStore>,
    events: Arc<dyn EventStore>,
}

impl Authenticator {
    pub fn new(credentials: Arc<dyn CredentialStore>, events: Arc<dyn EventStore>) -> Self {
        Self {
            credentials,
            events,
        }
    }

    #[instrument(skip_all, fields(path = request.path()))]
    pub async fn login(&self, request: LoginRequest) -> Result<RouteDescriptor, AccessError> {
        debug!(stage = "received");
        let outcome = match validate_login_request(&request) {
            Ok(()) => {
                debug!(stage = "classified");
                match request {
                    LoginRequest::Organizer { email, password } => {
                        self.organizer_path(&email, &password).await
                    }
                    LoginRequest::EventScoped {
                        role,
                        email,
                        event_id,
                        code,
                        ..
                    } => self.event_path(role, email, &event_id, &code).await,
                }
            }
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(descriptor) => info!(
                stage = "accepted",
                role = %descriptor.role,
                route = %descriptor.route(),
                "Login accepted"
            ),
            Err(e) => info!(stage = "rejected", reason = e.code(), "Login rejected"),
        }
        outcome
    }

    async fn organizer_path(
        &self,
        email: &str,
        password: &str,
    ) -> Result<RouteDescriptor, AccessError> {
        let organizer_id = self.credentials.verify_organizer(email, password).await?;
        Ok(RouteDescriptor::organizer(organizer_id))
    }

    /// Admission is gated by the code alone. The email is recorded as given.
    async fn event_path(
        &self,
        role: EventRole,
        email: String,
        event_id: &str,
        code: &str,
    ) -> Result<RouteDescriptor, AccessError> {
        // An id that does not parse cannot name an event.
        let event_id: EventId = event_id.parse().map_err(|_| AccessError::EventNotFound)?;
        let event = self
            .events
            .event(event_id)
            .await?
            .ok_or(AccessError::EventNotFound)?;

        let active = self.credentials.active_code(event.id, role).await?;
        match active {
            Some(active) if active.matches(code) => {}
            _ => return Err(AccessError::InvalidCode),
        }

        Ok(RouteDescriptor::attendee(
            event.id,
            role,
            normalise_email(&email),
        ))
    }
}
