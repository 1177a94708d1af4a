//! OIDC protocol error types.
//!
//! Errors raised while mapper instances contribute claims to a token. Any of
//! them aborts the assembly of that token.

use thiserror::Error;

/// OIDC protocol errors.
#[derive(Debug, Error)]
pub enum OidcError {
    /// A mapper instance carries configuration its mapper rejects.
    #[error("invalid mapper configuration: {0}")]
    InvalidMapperConfig(String),

    /// A claim path runs through an existing value that is not an object.
    #[error("claim '{0}' conflicts with an existing non-object claim")]
    ClaimConflict(String),

    /// The user session, its user, or the user's groups could not be resolved.
    #[error("user session error: {0}")]
    UserSession(String),
}

/// Result type for OIDC operations.
pub type OidcResult<T> = Result<T, OidcError>;
