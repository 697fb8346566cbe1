use std::fmt;

use serde::{Serialize, Serializer};

use super::hash::{CodeDigest, normalise};
use crate::role::EventRole;

/// An opaque join code bound to one (event, role) pair by the store.
#[derive(Clone, PartialEq, Eq)]
pub struct JoinCode {
    value: String,
    digest: CodeDigest,
}

impl JoinCode {
    pub fn new(value: impl AsRef<str>) -> Self {
        let value = normalise(value.as_ref());
        let digest = CodeDigest::compute(&value);
        Self { value, digest }
    }

    /// Plaintext code, for display to the owning organizer.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Constant-time check of a code submitted at login.
    pub fn matches(&self, candidate: &str) -> bool {
        self.digest == CodeDigest::compute(candidate)
    }

    pub fn fingerprint(&self) -> String {
        self.digest.fingerprint()
    }
}

impl fmt::Debug for JoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JoinCode({}..)", self.fingerprint())
    }
}

impl Serialize for JoinCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

/// Active codes of one event. Stored and replaced as a single value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventCodes {
    pub panelist: Option<JoinCode>,
    pub participant: Option<JoinCode>,
}

impl EventCodes {
    pub fn pair(panelist: JoinCode, participant: JoinCode) -> Self {
        Self {
            panelist: Some(panelist),
            participant: Some(participant),
        }
    }

    pub fn get(&self, role: EventRole) -> Option<&JoinCode> {
        match role {
            EventRole::Panelist => self.panelist.as_ref(),
            EventRole::Participant => self.participant.as_ref(),
        }
    }

    /// Replace the code for `role`, returning the superseded one.
    pub fn set(&mut self, role: EventRole, code: JoinCode) -> Option<JoinCode> {
        let slot = match role {
            EventRole::Panelist => &mut self.panelist,
            EventRole::Participant => &mut self.participant,
        };
        slot.replace(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &JoinCode> {
        self.panelist.iter().chain(self.participant.iter())
    }
}
