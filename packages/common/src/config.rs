use serde::Deserialize;

/// Shortest join-code body accepted. 32^6 is just over 10^9 values per role.
pub const MIN_CODE_LENGTH: usize = 6;

/// Join-code generation settings.
#[derive(Debug, Deserialize, Clone)]
pub struct CodeConfig {
    /// Characters after the role prefix. Default: 8.
    #[serde(default = "default_code_length")]
    pub length: usize,
    /// Fresh draws tried before giving up on a collision-free code. Default: 16.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_code_length() -> usize {
    8
}
fn default_max_attempts() -> u32 {
    16
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            length: default_code_length(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Organizer credential settings.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Default: 8.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
    /// Default: 128.
    #[serde(default = "default_max_password_len")]
    pub max_password_len: usize,
    /// Argon2 memory cost in KiB. Default: 19456 (19 MiB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,
    /// Argon2 time cost. Default: 2.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 lanes. Default: 1.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

fn default_min_password_len() -> usize {
    8
}
fn default_max_password_len() -> usize {
    128
}
fn default_argon2_memory_kib() -> u32 {
    19 * 1024
}
fn default_argon2_iterations() -> u32 {
    2
}
fn default_argon2_parallelism() -> u32 {
    1
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_len: default_min_password_len(),
            max_password_len: default_max_password_len(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

/// Optional organizer created on startup.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    pub organizer_email: Option<String>,
    pub organizer_password: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`. Default: "info".
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
