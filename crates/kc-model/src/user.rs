//! User domain model.
//!
//! Users belong to a realm and carry an ordered list of group memberships.
//! The order is whatever the identity store enumerates; nothing here sorts or
//! deduplicates it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::group::Group;

/// An authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    // === Identity ===
    /// Unique identifier.
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    /// Unique username within the realm.
    pub username: String,
    /// Whether the user account is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    // === Profile ===
    /// User's email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// User's first name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// User's last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    // === Timestamps ===
    /// When the user was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    // === Custom Attributes ===
    /// Custom user attributes.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Vec<String>>,

    // === Memberships ===
    /// Groups the user is a direct member of, in store enumeration order.
    #[serde(default)]
    pub groups: Vec<Group>,
}

const fn default_enabled() -> bool {
    true
}

impl User {
    /// Creates a new user with the given username and no memberships.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            enabled: true,
            email: None,
            first_name: None,
            last_name: None,
            created_at: Utc::now(),
            attributes: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Adds a group membership at the end of the membership list.
    #[must_use]
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_no_groups() {
        let user = User::new("testuser");

        assert_eq!(user.username, "testuser");
        assert!(user.enabled);
        assert!(user.groups.is_empty());
    }

    #[test]
    fn memberships_keep_insertion_order() {
        let a = Group::with_id("a", "A");
        let b = Group::with_id("b", "B");
        let user = User::new("john").with_group(b).with_group(a);

        let ids: Vec<&str> = user.groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn fixture_deserializes_with_defaults() {
        let user: User = serde_json::from_str(
            r#"{"username": "alice", "groups": [{"id": "g1", "name": "one"}]}"#,
        )
        .unwrap();

        assert!(user.enabled);
        assert_eq!(user.groups.len(), 1);
        assert_eq!(user.groups[0].id, "g1");
    }
}
