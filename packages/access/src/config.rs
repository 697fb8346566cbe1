use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::config::{AuthConfig, CodeConfig, LogConfig, SeedConfig};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub codes: CodeConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load from `config/config.toml` (or `$HACKGATE_CONFIG`) and `HACKGATE__*` env vars.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("HACKGATE_CONFIG").unwrap_or_else(|_| "config/config".to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            // Override from environment (e.g., HACKGATE__CODES__LENGTH)
            .add_source(Environment::with_prefix("HACKGATE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
