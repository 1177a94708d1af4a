//! User/session provider contracts for protocol mappers.
//!
//! The host resolves the authenticated user session before token assembly
//! starts; mappers only read through these traits. Resolution faults surface
//! as [`OidcError::UserSession`] and are never recovered by a mapper.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kc_model::{Group, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OidcError, OidcResult};

/// Client attribute (and client-session note) enabling lightweight access tokens.
pub const USE_LIGHTWEIGHT_ACCESS_TOKEN_ENABLED: &str =
    "client.use.lightweight.access.token.enabled";

/// Read access to a user as seen by a mapper.
pub trait UserModel: Send + Sync {
    /// Returns the user's identifier.
    fn id(&self) -> String;

    /// Returns the username.
    fn username(&self) -> &str;

    /// Enumerates the user's group memberships in provider order.
    ///
    /// # Errors
    ///
    /// Returns an error if the memberships cannot be loaded.
    fn groups(&self) -> OidcResult<Box<dyn Iterator<Item = &Group> + '_>>;
}

/// Read access to the user session a token is issued for.
pub trait UserSessionModel: Send + Sync {
    /// Returns the session identifier.
    fn id(&self) -> &str;

    /// Resolves the session's user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be resolved.
    fn user(&self) -> OidcResult<&dyn UserModel>;

    /// Gets a session note.
    fn note(&self, name: &str) -> Option<&str>;
}

impl UserModel for User {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn groups(&self) -> OidcResult<Box<dyn Iterator<Item = &Group> + '_>> {
        Ok(Box::new(self.groups.iter()))
    }
}

/// An in-memory user session with its user already loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    /// Session ID.
    pub id: String,

    /// The authenticated user, if resolved.
    pub user: Option<User>,

    /// Session start time.
    pub started: DateTime<Utc>,

    /// Session notes (key-value pairs).
    #[serde(default)]
    pub notes: HashMap<String, String>,
}

impl UserSession {
    /// Creates a new session for a user.
    #[must_use]
    pub fn new(user: User) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            user: Some(user),
            started: Utc::now(),
            notes: HashMap::new(),
        }
    }

    /// Sets a session note.
    #[must_use]
    pub fn with_note(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.notes.insert(name.into(), value.into());
        self
    }
}

impl UserSessionModel for UserSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn user(&self) -> OidcResult<&dyn UserModel> {
        self.user
            .as_ref()
            .map(|u| u as &dyn UserModel)
            .ok_or_else(|| OidcError::UserSession(format!("session {} has no user", self.id)))
    }

    fn note(&self, name: &str) -> Option<&str> {
        self.notes.get(name).map(String::as_str)
    }
}

/// Client information for mappers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client ID.
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,

    /// OAuth `client_id`.
    pub client_id: String,

    /// Client attributes.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl ClientInfo {
    /// Creates a client with no attributes.
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            client_id: client_id.into(),
            attributes: HashMap::new(),
        }
    }

    /// Sets a client attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Gets a client attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
