//! Mapper instance configuration and option descriptors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TokenType;

/// Well-known configuration keys shared by OIDC mappers.
pub mod keys {
    /// Target claim name (dotted paths nest).
    pub const CLAIM_NAME: &str = "claim.name";
    /// Include in access tokens.
    pub const INCLUDE_IN_ACCESS_TOKEN: &str = "access.token.claim";
    /// Include in lightweight access tokens.
    pub const INCLUDE_IN_LIGHTWEIGHT_ACCESS_TOKEN: &str = "lightweight.claim";
    /// Include in ID tokens.
    pub const INCLUDE_IN_ID_TOKEN: &str = "id.token.claim";
    /// Include in `UserInfo` responses.
    pub const INCLUDE_IN_USERINFO: &str = "userinfo.token.claim";
    /// Include in introspection responses.
    pub const INCLUDE_IN_INTROSPECTION: &str = "introspection.token.claim";
    /// Emit the claim as a JSON array.
    pub const MULTIVALUED: &str = "multivalued";
    /// JSON type of the claim value.
    pub const JSON_TYPE: &str = "jsonType.label";
}

/// Protocol identifier for OIDC mappers.
pub const OIDC_PROTOCOL: &str = "openid-connect";

/// Claim value type for JSON serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimValueType {
    /// String value.
    #[default]
    String,
    /// Integer (long) value.
    Long,
    /// Integer value.
    Int,
    /// Boolean value.
    Boolean,
    /// JSON object or array.
    Json,
}

/// Configuration for a protocol mapper instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Unique identifier for this mapper instance.
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,

    /// Mapper name (user-defined).
    pub name: String,

    /// Protocol mapper type ID (e.g., `"group-id-mapper"`).
    pub mapper_type: String,

    /// Protocol (always `"openid-connect"` for OIDC).
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Whether to consent to this mapper.
    #[serde(default)]
    pub consent_required: bool,

    /// Consent text shown to users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_text: Option<String>,

    /// Configuration key-value pairs.
    #[serde(default)]
    pub config: HashMap<String, String>,
}

fn default_protocol() -> String {
    OIDC_PROTOCOL.to_string()
}

impl MapperConfig {
    /// Creates a new mapper configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, mapper_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            mapper_type: mapper_type.into(),
            protocol: default_protocol(),
            consent_required: false,
            consent_text: None,
            config: HashMap::new(),
        }
    }

    /// Sets a configuration value.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Gets a configuration value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    /// Reads a boolean flag.
    ///
    /// `None` when the key is absent; otherwise only the exact value `"true"`
    /// counts as set.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).map(|v| v == "true")
    }

    /// Gets the claim name to use in tokens.
    #[must_use]
    pub fn claim_name(&self) -> Option<&str> {
        self.get(keys::CLAIM_NAME)
    }

    /// Gets the JSON type for the claim value.
    #[must_use]
    pub fn json_type(&self) -> ClaimValueType {
        self.get(keys::JSON_TYPE)
            .and_then(|v| match v.to_lowercase().as_str() {
                "string" => Some(ClaimValueType::String),
                "long" => Some(ClaimValueType::Long),
                "int" => Some(ClaimValueType::Int),
                "boolean" => Some(ClaimValueType::Boolean),
                "json" => Some(ClaimValueType::Json),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Checks if the claim is multivalued.
    #[must_use]
    pub fn is_multivalued(&self) -> bool {
        self.flag(keys::MULTIVALUED).unwrap_or(false)
    }
}

/// Configuration property definition for mapper UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProperty {
    /// Property name (config key).
    pub name: String,

    /// Display label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Property type.
    pub property_type: ConfigPropertyType,

    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Whether the property is required.
    #[serde(default)]
    pub required: bool,
}

/// Configuration property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigPropertyType {
    /// Text input.
    String,
    /// Boolean checkbox (stored as the string `"true"` or `"false"`).
    Boolean,
}

impl ConfigProperty {
    /// Creates a new string property.
    #[must_use]
    pub fn string(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
            property_type: ConfigPropertyType::String,
            default_value: None,
            required: false,
        }
    }

    /// Creates a new boolean property.
    #[must_use]
    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
            property_type: ConfigPropertyType::Boolean,
            default_value: Some("false".to_string()),
            required: false,
        }
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    /// Whether this property is one of the token inclusion toggles.
    #[must_use]
    pub fn is_inclusion_toggle(&self) -> bool {
        self.property_type == ConfigPropertyType::Boolean
            && matches!(
                self.name.as_str(),
                keys::INCLUDE_IN_ACCESS_TOKEN
                    | keys::INCLUDE_IN_LIGHTWEIGHT_ACCESS_TOKEN
                    | keys::INCLUDE_IN_ID_TOKEN
                    | keys::INCLUDE_IN_USERINFO
                    | keys::INCLUDE_IN_INTROSPECTION
            )
    }
}

/// Declares the token claim name option.
#[must_use]
pub fn token_claim_name_property() -> ConfigProperty {
    ConfigProperty::string(keys::CLAIM_NAME, "Token Claim Name").with_help(
        "Name of the claim to insert into the token. This can be a fully qualified \
         name like 'address.street'; the value is then nested. Escape a literal dot \
         with a backslash, e.g. 'domain\\.com'.",
    )
}

/// Declares the inclusion toggles for the token types a mapper supports.
///
/// The access-token toggle is followed by its lightweight counterpart.
///
/// Declared defaults only seed the form of a newly created instance. They are
/// never consulted at issuance time: a toggle missing from a stored instance
/// resolves through [`claim::include_in`](super::claim::include_in), which
/// treats an absent ID-token or userinfo toggle as off.
#[must_use]
pub fn include_in_tokens_properties(supported: &[TokenType]) -> Vec<ConfigProperty> {
    let mut properties = Vec::new();

    if supported.contains(&TokenType::IdToken) {
        properties.push(
            ConfigProperty::boolean(keys::INCLUDE_IN_ID_TOKEN, "Add to ID token")
                .with_help("Should the claim be added to the ID token?")
                .with_default("true"),
        );
    }
    if supported.contains(&TokenType::AccessToken) {
        properties.push(
            ConfigProperty::boolean(keys::INCLUDE_IN_ACCESS_TOKEN, "Add to access token")
                .with_help("Should the claim be added to the access token?")
                .with_default("true"),
        );
        properties.push(
            ConfigProperty::boolean(
                keys::INCLUDE_IN_LIGHTWEIGHT_ACCESS_TOKEN,
                "Add to lightweight access token",
            )
            .with_help("Should the claim be added to the access token when the lightweight access token is used?"),
        );
    }
    if supported.contains(&TokenType::UserInfo) {
        properties.push(
            ConfigProperty::boolean(keys::INCLUDE_IN_USERINFO, "Add to userinfo")
                .with_help("Should the claim be added to the userinfo response?")
                .with_default("true"),
        );
    }
    if supported.contains(&TokenType::Introspection) {
        properties.push(
            ConfigProperty::boolean(keys::INCLUDE_IN_INTROSPECTION, "Add to token introspection")
                .with_help("Should the claim be added to the token introspection response?")
                .with_default("true"),
        );
    }

    properties
}
