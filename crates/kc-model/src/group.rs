//! Group domain model.
//!
//! Groups organise users into logical units. Groups can be hierarchical; the
//! identifier is the only attribute token mappers rely on to be stable.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A group a user can be a member of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    // === Identity ===
    /// Opaque, stable identifier, unique within the identity store.
    ///
    /// Locally created groups use a UUID; federated groups may carry
    /// provider-specific identifiers.
    pub id: String,
    /// Group name.
    pub name: String,

    // === Hierarchy ===
    /// Parent group ID (None for top-level groups).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    // === Timestamps ===
    /// When the group was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    // === Custom Attributes ===
    /// Custom group attributes.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Vec<String>>,
}

impl Group {
    /// Creates a top-level group with an existing identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            created_at: Utc::now(),
            attributes: HashMap::new(),
        }
    }
}
