pub mod config;
pub mod error;
pub mod ids;
pub mod record;
pub mod role;
pub mod storage;

pub use error::{AccessError, ErrorBody};
pub use ids::{EventId, OrganizerId, RoundId};
pub use record::{Destination, Event, Organizer, RouteDescriptor, Round, Subject};
pub use role::{EventRole, Role};
