use serde::Serialize;

/// Structured error returned to the calling surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `DUPLICATE_IDENTITY`,
    /// `INVALID_CREDENTIALS`, `EVENT_NOT_FOUND`, `INVALID_CODE`,
    /// `UNAUTHORIZED`, `NOT_FOUND`, `VALIDATION_ERROR`, `INTERNAL_ERROR`.
    pub code: &'static str,
    /// Human-readable error description.
    pub message: String,
}

/// Errors of the access-control core. All are terminal for the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("An organizer with this email is already registered")]
    DuplicateIdentity,
    /// Unknown email and wrong password map to the same error.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Event not found")]
    EventNotFound,
    #[error("Invalid join code for this event")]
    InvalidCode,
    #[error("Not permitted to manage this event")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AccessError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateIdentity => "DUPLICATE_IDENTITY",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::InvalidCode => "INVALID_CODE",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert into the caller-facing body. Internal details are logged, not returned.
    pub fn into_body(self) -> ErrorBody {
        let code = self.code();
        let message = match self {
            Self::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "An unexpected error occurred".into()
            }
            other => other.to_string(),
        };
        ErrorBody { code, message }
    }
}

impl From<argon2::password_hash::Error> for AccessError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AccessError::Internal(format!("Password hash error: {err}"))
    }
}

impl From<argon2::Error> for AccessError {
    fn from(err: argon2::Error) -> Self {
        AccessError::Internal(format!("Argon2 parameter error: {err}"))
    }
}
