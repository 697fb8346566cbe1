use common::storage::EventCodes;
use common::{AccessError, Destination, Role, RouteDescriptor, Subject};
use serde::{Deserialize, Serialize};

use crate::auth::LoginRequest;
use crate::config::AuthConfig;

/// Organizer half of the web client's login body.
#[derive(Debug, Deserialize)]
pub struct OrganizerCredentials {
    pub email: String,
    pub password: String,
}

/// Panelist and participant half of the web client's login body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCredentials {
    pub email: String,
    pub password: String,
    pub event_id: String,
    pub code: String,
}

/// Login body as sent by the web client.
///
/// Organizers nest their credentials under `loginData`. Everyone else sends a
/// flat object with the event id and join code.
#[derive(Debug, Deserialize)]
#[serde(tag = "role")]
pub enum LoginPayload {
    #[serde(rename = "ORGANIZER")]
    Organizer {
        #[serde(rename = "loginData")]
        login_data: OrganizerCredentials,
    },
    #[serde(rename = "PANELIST")]
    Panelist(EventCredentials),
    #[serde(rename = "USER", alias = "PARTICIPANT")]
    Participant(EventCredentials),
}

impl From<LoginPayload> for LoginRequest {
    fn from(payload: LoginPayload) -> Self {
        use common::EventRole;

        let scoped = |role, c: EventCredentials| LoginRequest::EventScoped {
            role,
            email: c.email,
            password: c.password,
            event_id: c.event_id,
            code: c.code,
        };

        match payload {
            LoginPayload::Organizer { login_data } => LoginRequest::Organizer {
                email: login_data.email,
                password: login_data.password,
            },
            LoginPayload::Panelist(c) => scoped(EventRole::Panelist, c),
            LoginPayload::Participant(c) => scoped(EventRole::Participant, c),
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), AccessError> {
    let email = email.trim();
    let invalid = || AccessError::Validation("Email must be a valid address".into());

    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !domain.ends_with('.') => {
            Ok(())
        }
        _ => Err(invalid()),
    }
}

/// Organizer passwords at signup and on change.
pub fn validate_password(password: &str, auth: &AuthConfig) -> Result<(), AccessError> {
    let len = password.chars().count();
    if len < auth.min_password_len || len > auth.max_password_len {
        return Err(AccessError::Validation(format!(
            "Password must be {}-{} characters",
            auth.min_password_len, auth.max_password_len
        )));
    }
    Ok(())
}

/// Trim and check an event or round name (1-128 characters).
pub fn validate_name(name: &str, what: &str) -> Result<String, AccessError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 128 {
        return Err(AccessError::Validation(format!(
            "{what} name must be 1-128 characters"
        )));
    }
    Ok(name.to_string())
}

pub fn validate_login_request(request: &LoginRequest) -> Result<(), AccessError> {
    let (email, password) = request.credentials();
    validate_email(email)?;
    if password.is_empty() {
        return Err(AccessError::Validation("Password must not be empty".into()));
    }
    if let LoginRequest::EventScoped { event_id, code, .. } = request {
        if event_id.trim().is_empty() {
            return Err(AccessError::Validation("Event ID must not be empty".into()));
        }
        if code.trim().is_empty() {
            return Err(AccessError::Validation("Login code must not be empty".into()));
        }
    }
    Ok(())
}

/// Successful login response. `route` is where the client should navigate.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub role: Role,
    pub subject: Subject,
    pub destination: Destination,
    pub route: String,
}

impl From<RouteDescriptor> for LoginResponse {
    fn from(descriptor: RouteDescriptor) -> Self {
        Self {
            route: descriptor.route(),
            role: descriptor.role,
            subject: descriptor.subject,
            destination: descriptor.destination,
        }
    }
}

/// Both active join codes of an event, as shown on the organizer dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCodes {
    pub panelist_code: String,
    pub participant_code: String,
}

impl TryFrom<EventCodes> for JoinCodes {
    type Error = AccessError;

    fn try_from(codes: EventCodes) -> Result<Self, Self::Error> {
        match (codes.panelist, codes.participant) {
            (Some(panelist), Some(participant)) => Ok(Self {
                panelist_code: panelist.as_str().to_string(),
                participant_code: participant.as_str().to_string(),
            }),
            _ => Err(AccessError::NotFound(
                "No join codes have been generated for this event".into(),
            )),
        }
    }
}
