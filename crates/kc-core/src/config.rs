//! Configuration management.
//!
//! Configuration is loaded from environment variables (and an optional `.env`
//! file) with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest accepted token lifespan, in seconds (ten years).
pub const MAX_TOKEN_LIFESPAN: i64 = 10 * 365 * 24 * 60 * 60;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Settings used when assembling example claim sets.
    pub issuance: IssuanceConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (e.g. `info`, `kc_protocol_oidc=debug`).
    pub level: String,
    /// Whether to emit ANSI colours.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
        }
    }
}

/// Token issuance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuanceConfig {
    /// Issuer URL written to the `iss` claim.
    pub issuer: String,
    /// Access token lifespan in seconds.
    pub access_token_lifespan: i64,
    /// ID token lifespan in seconds.
    pub id_token_lifespan: i64,
}

impl Default for IssuanceConfig {
    fn default() -> Self {
        Self {
            issuer: "http://localhost:8080/realms/master".to_string(),
            access_token_lifespan: 300, // 5 minutes
            id_token_lifespan: 300,     // 5 minutes
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is present but malformed.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let level = lookup("RUST_LOG").unwrap_or(defaults.logging.level);
        let ansi = lookup("KC_LOG_ANSI").map_or(defaults.logging.ansi, |v| {
            v.to_lowercase() != "false" && v != "0"
        });

        let issuer = lookup("KC_ISSUER").unwrap_or(defaults.issuance.issuer);
        let access_token_lifespan = parse_lifespan(
            "KC_ACCESS_TOKEN_LIFESPAN",
            lookup("KC_ACCESS_TOKEN_LIFESPAN"),
            defaults.issuance.access_token_lifespan,
        )?;
        let id_token_lifespan = parse_lifespan(
            "KC_ID_TOKEN_LIFESPAN",
            lookup("KC_ID_TOKEN_LIFESPAN"),
            defaults.issuance.id_token_lifespan,
        )?;

        Ok(Self {
            logging: LoggingConfig { level, ansi },
            issuance: IssuanceConfig {
                issuer,
                access_token_lifespan,
                id_token_lifespan,
            },
        })
    }
}

fn parse_lifespan(key: &str, value: Option<String>, default: i64) -> Result<i64> {
    let Some(raw) = value else {
        return Ok(default);
    };
    let seconds: i64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} must be an integer number of seconds")))?;
    if seconds <= 0 {
        return Err(Error::Config(format!("{key} must be positive")));
    }
    if seconds > MAX_TOKEN_LIFESPAN {
        return Err(Error::Config(format!(
            "{key} must not exceed {MAX_TOKEN_LIFESPAN} seconds"
        )));
    }
    Ok(seconds)
}
