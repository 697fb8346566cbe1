//! Line-oriented JSON front end for [`AccessService`].
//!
//! Each input line is one [`Command`]; each output line is either
//! `{"ok": <result>}` or `{"error": {"code": .., "message": ..}}`.

use common::{AccessError, ErrorBody, EventId, OrganizerId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{LoginPayload, LoginResponse};
use crate::service::AccessService;

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Command {
    Register {
        email: String,
        password: String,
    },
    ChangePassword {
        organizer_id: OrganizerId,
        current_password: String,
        new_password: String,
    },
    Login(LoginPayload),
    CreateEvent {
        organizer_id: OrganizerId,
        name: String,
    },
    ListEvents {
        organizer_id: OrganizerId,
    },
    GetEvent {
        event_id: EventId,
    },
    CreateRound {
        organizer_id: OrganizerId,
        event_id: EventId,
        name: String,
    },
    ListRounds {
        event_id: EventId,
    },
    GenerateCodes {
        organizer_id: OrganizerId,
        event_id: EventId,
    },
    GetActiveCodes {
        organizer_id: OrganizerId,
        event_id: EventId,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    Ok(Value),
    Error(ErrorBody),
}

fn to_value<T: Serialize>(value: T) -> Result<Value, AccessError> {
    serde_json::to_value(value).map_err(|e| AccessError::Internal(e.to_string()))
}

pub async fn dispatch(service: &AccessService, command: Command) -> Result<Value, AccessError> {
    match command {
        Command::Register { email, password } => {
            to_value(service.register_organizer(&email, &password).await?)
        }
        Command::ChangePassword {
            organizer_id,
            current_password,
            new_password,
        } => {
            service
                .change_password(organizer_id, &current_password, &new_password)
                .await?;
            Ok(serde_json::json!({ "changed": true }))
        }
        Command::Login(payload) => {
            let descriptor = service.login(payload.into()).await?;
            to_value(LoginResponse::from(descriptor))
        }
        Command::CreateEvent { organizer_id, name } => {
            to_value(service.create_event(organizer_id, &name).await?)
        }
        Command::ListEvents { organizer_id } => {
            to_value(service.list_events(organizer_id).await?)
        }
        Command::GetEvent { event_id } => to_value(service.get_event(event_id).await?),
        Command::CreateRound {
            organizer_id,
            event_id,
            name,
        } => to_value(service.create_round(organizer_id, event_id, &name).await?),
        Command::ListRounds { event_id } => to_value(service.list_rounds(event_id).await?),
        Command::GenerateCodes {
            organizer_id,
            event_id,
        } => to_value(service.generate_codes(organizer_id, event_id).await?),
        Command::GetActiveCodes {
            organizer_id,
            event_id,
        } => to_value(service.active_codes(organizer_id, event_id).await?),
    }
}

/// Parse, dispatch and serialise one input line.
pub async fn handle_line(service: &AccessService, line: &str) -> String {
    let reply = match serde_json::from_str::<Command>(line) {
        Ok(command) => match dispatch(service, command).await {
            Ok(value) => Reply::Ok(value),
            Err(e) => Reply::Error(e.into_body()),
        },
        Err(e) => Reply::Error(AccessError::Validation(e.to_string()).into_body()),
    };

    serde_json::to_string(&reply).unwrap_or_else(|e| {
        tracing::error!("Failed to serialise reply: {}", e);
        r#"{"error":{"code":"INTERNAL_ERROR","message":"An unexpected error occurred"}}"#.into()
    })
}
