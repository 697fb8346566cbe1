use common::{AccessError, OrganizerId};
use tracing::{info, warn};

use crate::config::SeedConfig;
use crate::service::AccessService;

/// Create the bootstrap organizer named in `[seed]`, if any.
///
/// An already-registered email is left untouched. Returns the id of a newly
/// created organizer.
pub async fn seed_organizer(
    service: &AccessService,
    seed: &SeedConfig,
) -> Result<Option<OrganizerId>, AccessError> {
    let (email, password) = match (&seed.organizer_email, &seed.organizer_password) {
        (Some(email), Some(password)) => (email, password),
        (None, None) => return Ok(None),
        _ => {
            warn!("Seed organizer needs both organizer_email and organizer_password; skipping");
            return Ok(None);
        }
    };

    match service.register_organizer(email, password).await {
        Ok(organizer) => {
            info!(organizer_id = %organizer.id, email = %organizer.email, "Seeded organizer");
            Ok(Some(organizer.id))
        }
        Err(AccessError::DuplicateIdentity) => {
            info!(email = %email, "Seed organizer already present");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
