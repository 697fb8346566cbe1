pub mod auth;
pub mod codes;
pub mod config;
pub mod driver;
pub mod models;
pub mod registry;
pub mod seed;
pub mod service;

pub use auth::LoginRequest;
pub use config::AppConfig;
pub use service::AccessService;
