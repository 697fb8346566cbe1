use std::fmt;

use serde::{Deserialize, Serialize};

/// Role an actor claims when logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Owns events and authenticates with email and password.
    Organizer,
    /// Judges an event. Admitted with the event's panelist code.
    Panelist,
    /// Competes in an event. Admitted with the event's participant code.
    /// The web client calls this role `USER`.
    #[serde(alias = "USER")]
    Participant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organizer => "ORGANIZER",
            Self::Panelist => "PANELIST",
            Self::Participant => "PARTICIPANT",
        }
    }

    /// The event-scoped half of this role, if any.
    pub fn event_role(&self) -> Option<EventRole> {
        match self {
            Self::Organizer => None,
            Self::Panelist => Some(EventRole::Panelist),
            Self::Participant => Some(EventRole::Participant),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles that enter an event through a join code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventRole {
    Panelist,
    #[serde(alias = "USER")]
    Participant,
}

impl EventRole {
    pub const ALL: [EventRole; 2] = [EventRole::Panelist, EventRole::Participant];

    pub fn as_str(&self) -> &'static str {
        Role::from(*self).as_str()
    }

    /// First character of every join code issued for this role.
    pub fn code_prefix(&self) -> char {
        match self {
            Self::Panelist => 'P',
            Self::Participant => 'U',
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Panelist => Self::Participant,
            Self::Participant => Self::Panelist,
        }
    }
}

impl From<EventRole> for Role {
    fn from(role: EventRole) -> Self {
        match role {
            EventRole::Panelist => Role::Panelist,
            EventRole::Participant => Role::Participant,
        }
    }
}

impl fmt::Display for EventRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
