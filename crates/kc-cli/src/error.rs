//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration or logging setup error.
    #[error(transparent)]
    Config(#[from] kc_core::Error),

    /// Mapper evaluation error.
    #[error("mapper error: {0}")]
    Oidc(#[from] kc_protocol_oidc::OidcError),

    /// Resource not found.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// Invalid fixture file.
    #[error("invalid fixture {path}: {source}")]
    Fixture {
        /// Fixture path.
        path: String,
        /// Parse error.
        source: serde_json::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
