//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration.

use std::path::PathBuf;

use sueahhahn_shared::credential::CredentialConfig;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Directory holding `sueahhahn.db`.
    /// Env: `SUEAHHAHN_DATA_DIR`
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing survives the session.
    /// Env: `SUEAHHAHN_IN_MEMORY` (true/false)
    /// Default: `false`
    pub in_memory: bool,

    /// Argon2 cost for newly hashed passwords.
    /// Env: `SUEAHHAHN_ARGON2_MEMORY_KIB`, `SUEAHHAHN_ARGON2_TIME_COST`,
    /// `SUEAHHAHN_ARGON2_PARALLELISM`
    /// Default: the argon2 crate's recommended parameters.
    pub credentials: CredentialConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            in_memory: false,
            credentials: CredentialConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("SUEAHHAHN_DATA_DIR") {
            if !dir.trim().is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(val) = lookup("SUEAHHAHN_IN_MEMORY") {
            config.in_memory = val == "true" || val == "1";
        }

        if let Some(n) = parse_u32(&lookup, "SUEAHHAHN_ARGON2_MEMORY_KIB") {
            config.credentials.memory_kib = n;
        }
        if let Some(n) = parse_u32(&lookup, "SUEAHHAHN_ARGON2_TIME_COST") {
            config.credentials.time_cost = n;
        }
        if let Some(n) = parse_u32(&lookup, "SUEAHHAHN_ARGON2_PARALLELISM") {
            config.credentials.parallelism = n;
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

fn parse_u32(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u32> {
    let value = lookup(key)?;
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            tracing::warn!(key, value = %value, "Invalid value, using default");
            None
        }
    }
}
