use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ids::{EventId, OrganizerId, RoundId};
use crate::role::{EventRole, Role};

/// A registered organizer. The password hash stays inside the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    pub id: OrganizerId,
    /// Normalised (trimmed, lower-cased) email.
    pub email: String,
    /// Owned events in creation order.
    pub event_ids: Vec<EventId>,
    pub created_at: DateTime<Utc>,
}

/// A hackathon event. Its join codes live in the credential store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub organizer_id: OrganizerId,
    /// Rounds in insertion order.
    pub round_ids: Vec<RoundId>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(organizer_id: OrganizerId, name: String) -> Self {
        Self {
            id: EventId::new(),
            name,
            organizer_id,
            round_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, organizer_id: OrganizerId) -> bool {
        self.organizer_id == organizer_id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: RoundId,
    pub event_id: EventId,
    pub name: String,
    /// Zero-based index in the event's round sequence.
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

/// Who was admitted by a successful login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Subject {
    Organizer {
        #[serde(rename = "organizerId")]
        organizer_id: OrganizerId,
    },
    /// A panelist or participant. The email is self-asserted.
    #[serde(rename_all = "camelCase")]
    Attendee {
        event_id: EventId,
        role: EventRole,
        email: String,
    },
}

/// Surface the caller should route an admitted actor to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "eventId", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Destination {
    OrganizerDashboard,
    PanelistView(EventId),
    ParticipantView(EventId),
}

impl Destination {
    pub fn for_attendee(role: EventRole, event_id: EventId) -> Self {
        match role {
            EventRole::Panelist => Self::PanelistView(event_id),
            EventRole::Participant => Self::ParticipantView(event_id),
        }
    }

    /// Client-side route of the destination.
    pub fn path(&self) -> String {
        match self {
            Self::OrganizerDashboard => "/organizer".to_string(),
            Self::PanelistView(event_id) => format!("/panelist/{event_id}"),
            Self::ParticipantView(event_id) => format!("/event/{event_id}"),
        }
    }
}

/// Outcome of an accepted login. Not persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub role: Role,
    pub subject: Subject,
    pub destination: Destination,
}

impl RouteDescriptor {
    pub fn organizer(organizer_id: OrganizerId) -> Self {
        Self {
            role: Role::Organizer,
            subject: Subject::Organizer { organizer_id },
            destination: Destination::OrganizerDashboard,
        }
    }

    pub fn attendee(event_id: EventId, role: EventRole, email: String) -> Self {
        Self {
            role: role.into(),
            subject: Subject::Attendee {
                event_id,
                role,
                email,
            },
            destination: Destination::for_attendee(role, event_id),
        }
    }

    pub fn route(&self) -> String {
        self.destination.path()
    }
}
