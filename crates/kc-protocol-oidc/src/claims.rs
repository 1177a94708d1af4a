//! JWT claim types for OIDC tokens.
//!
//! Implements the claim sets protocol mappers write into:
//! - RFC 7519 (JSON Web Token)
//! - `OpenID` Connect Core 1.0
//!
//! `UserInfo` and introspection responses reuse [`AccessTokenClaims`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A claim set protocol mappers can write into.
///
/// Mapper-contributed claims live in a free-form section next to the
/// registered claims of the token.
pub trait ClaimSet {
    /// Returns the mapper-contributed claims.
    fn other_claims(&self) -> &HashMap<String, serde_json::Value>;

    /// Returns the mapper-contributed claims for modification.
    fn other_claims_mut(&mut self) -> &mut HashMap<String, serde_json::Value>;
}

/// Access token claims.
///
/// These claims are included in OAuth 2.0 access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    // === Standard JWT Claims (RFC 7519) ===
    /// Issuer - URL of the authorization server.
    pub iss: String,

    /// Subject - unique identifier for the user.
    pub sub: String,

    /// Audience - intended recipient(s) of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at time (Unix timestamp).
    pub iat: i64,

    /// JWT ID - unique identifier for the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    // === OIDC Standard Claims ===
    /// Authorized party - client ID that requested the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,

    /// Session ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    /// Scope - space-separated list of scopes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Token type (usually "Bearer").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,

    /// Preferred username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    /// Additional claims (for protocol mappers).
    #[serde(flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

impl AccessTokenClaims {
    /// Creates new access token claims.
    #[must_use]
    pub fn new(issuer: String, subject: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            iss: issuer,
            sub: subject,
            aud: None,
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            jti: Some(Uuid::now_v7().to_string()),
            azp: None,
            sid: None,
            scope: None,
            typ: Some("Bearer".to_string()),
            preferred_username: None,
            additional: HashMap::new(),
        }
    }

    /// Sets the authorized party (client ID).
    #[must_use]
    pub fn with_azp(mut self, client_id: impl Into<String>) -> Self {
        self.azp = Some(client_id.into());
        self
    }

    /// Sets the session ID.
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.sid = Some(session_id.into());
        self
    }

    /// Sets the preferred username.
    #[must_use]
    pub fn with_preferred_username(mut self, username: impl Into<String>) -> Self {
        self.preferred_username = Some(username.into());
        self
    }

    /// Adds a custom claim.
    #[must_use]
    pub fn with_claim(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.additional.insert(key.into(), value);
        self
    }
}

impl ClaimSet for AccessTokenClaims {
    fn other_claims(&self) -> &HashMap<String, serde_json::Value> {
        &self.additional
    }

    fn other_claims_mut(&mut self) -> &mut HashMap<String, serde_json::Value> {
        &mut self.additional
    }
}

/// ID token claims.
///
/// These claims are included in `OpenID` Connect ID tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    // === Required Claims ===
    /// Issuer - URL of the authorization server.
    pub iss: String,

    /// Subject - unique identifier for the user.
    pub sub: String,

    /// Audience - client ID that requested the token.
    pub aud: Audience,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at time (Unix timestamp).
    pub iat: i64,

    // === Conditionally Required Claims ===
    /// Authentication time (required if `max_age` was requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_time: Option<i64>,

    /// Nonce (required if provided in request).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    /// Authorized party.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,

    /// Session ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    /// Preferred username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    /// Additional claims.
    #[serde(flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

impl IdTokenClaims {
    /// Creates new ID token claims.
    #[must_use]
    pub fn new(
        issuer: String,
        subject: String,
        audience: impl Into<Audience>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            iss: issuer,
            sub: subject,
            aud: audience.into(),
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            auth_time: None,
            nonce: None,
            azp: None,
            sid: None,
            preferred_username: None,
            additional: HashMap::new(),
        }
    }

    /// Sets the session ID.
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.sid = Some(session_id.into());
        self
    }

    /// Sets the authorized party.
    #[must_use]
    pub fn with_azp(mut self, azp: impl Into<String>) -> Self {
        self.azp = Some(azp.into());
        self
    }
}

impl ClaimSet for IdTokenClaims {
    fn other_claims(&self) -> &HashMap<String, serde_json::Value> {
        &self.additional
    }

    fn other_claims_mut(&mut self) -> &mut HashMap<String, serde_json::Value> {
        &mut self.additional
    }
}

/// JWT audience claim (can be single string or array).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    /// Single audience.
    Single(String),
    /// Multiple audiences.
    Multiple(Vec<String>),
}

impl From<String> for Audience {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<&str> for Audience {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}
