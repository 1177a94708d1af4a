//! Protocol Mapper SPI for customizing token claims.
//!
//! ## Design
//!
//! The mapper system follows the SPI (Service Provider Interface) pattern:
//! - [`ProtocolMapper`] carries the metadata a mapper type exposes to the host
//! - [`OidcProtocolMapper`] adds the claim-producing capability
//! - [`MapperConfig`] provides configuration for each mapper instance
//! - [`ProtocolMapperRegistry`] routes mapper instances to implementations
//! - [`claim`] decides token inclusion and writes values into claim sets
//!
//! ## Example
//!
//! ```rust,ignore
//! use kc_protocol_oidc::mapper::{
//!     claim, ConfigProperty, MapperConfig, OidcProtocolMapper, ProtocolMapper, TokenType,
//! };
//! use kc_protocol_oidc::{ClaimSet, OidcResult, UserSessionModel};
//!
//! struct TenantMapper;
//!
//! impl ProtocolMapper for TenantMapper {
//!     fn id(&self) -> &'static str { "tenant-mapper" }
//!     fn display_name(&self) -> &'static str { "Tenant" }
//!     fn help_text(&self) -> &'static str { "Adds the tenant claim" }
//!     fn config_properties(&self) -> &[ConfigProperty] { &[] }
//!     fn supported_tokens(&self) -> &'static [TokenType] { &[TokenType::AccessToken] }
//! }
//!
//! impl OidcProtocolMapper for TenantMapper {
//!     fn set_claim(
//!         &self,
//!         claims: &mut dyn ClaimSet,
//!         config: &MapperConfig,
//!         _session: &dyn UserSessionModel,
//!     ) -> OidcResult<()> {
//!         claim::map_claim(claims, config, "acme".into())
//!     }
//! }
//! ```

pub mod claim;
pub mod config;
pub mod registry;

use serde::{Deserialize, Serialize};

use crate::claims::ClaimSet;
use crate::error::OidcResult;
use crate::session::{ClientInfo, USE_LIGHTWEIGHT_ACCESS_TOKEN_ENABLED, UserSessionModel};

pub use claim::AttributeValue;
pub use config::{
    ClaimValueType, ConfigProperty, ConfigPropertyType, MapperConfig, OIDC_PROTOCOL,
    include_in_tokens_properties, keys, token_claim_name_property,
};
pub use registry::ProtocolMapperRegistry;

/// Category shared by mappers that contribute token claims.
pub const TOKEN_MAPPER_CATEGORY: &str = "Token mapper";

/// Token variant a mapper can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Access token.
    AccessToken,
    /// ID token.
    IdToken,
    /// `UserInfo` response.
    UserInfo,
    /// Token introspection response.
    Introspection,
}

impl TokenType {
    /// All token variants, in issuance order.
    pub const ALL: [Self; 4] = [
        Self::AccessToken,
        Self::IdToken,
        Self::UserInfo,
        Self::Introspection,
    ];

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::IdToken => "id_token",
            Self::UserInfo => "userinfo",
            Self::Introspection => "introspection",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Describes the token being assembled for one issuance pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuanceContext {
    /// The token variant being produced.
    pub token_type: TokenType,

    /// Whether the access token is issued in lightweight mode.
    pub lightweight: bool,
}

impl IssuanceContext {
    /// Creates a context for a regular (non-lightweight) token.
    #[must_use]
    pub const fn new(token_type: TokenType) -> Self {
        Self {
            token_type,
            lightweight: false,
        }
    }

    /// Sets lightweight mode.
    ///
    /// Lightweight mode only exists for access tokens; it is ignored for
    /// every other variant.
    #[must_use]
    pub const fn with_lightweight(mut self, lightweight: bool) -> Self {
        self.lightweight = lightweight && matches!(self.token_type, TokenType::AccessToken);
        self
    }

    /// Resolves the context for a client and user session.
    ///
    /// Lightweight mode is on when either the client attribute or the session
    /// note `client.use.lightweight.access.token.enabled` is `"true"`.
    #[must_use]
    pub fn for_client(
        token_type: TokenType,
        client: &ClientInfo,
        session: &dyn UserSessionModel,
    ) -> Self {
        let enabled = client.attribute(USE_LIGHTWEIGHT_ACCESS_TOKEN_ENABLED) == Some("true")
            || session.note(USE_LIGHTWEIGHT_ACCESS_TOKEN_ENABLED) == Some("true");
        Self::new(token_type).with_lightweight(enabled)
    }

    /// Returns `true` for a lightweight access token.
    #[must_use]
    pub const fn is_lightweight_access_token(self) -> bool {
        self.lightweight && matches!(self.token_type, TokenType::AccessToken)
    }
}

/// Metadata a mapper type exposes for administrative listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperDescriptor {
    /// Mapper type ID.
    pub id: String,
    /// Display name.
    pub display_name: String,
    /// Help text.
    pub help_text: String,
    /// Category.
    pub category: String,
    /// Token variants the mapper can contribute to.
    pub supported_tokens: Vec<TokenType>,
    /// Declared configuration options.
    pub properties: Vec<ConfigProperty>,
}

/// Core trait for protocol mappers.
///
/// Protocol mappers customize the claims included in OIDC tokens.
/// Each mapper has a unique ID, display information, and configuration properties.
pub trait ProtocolMapper: Send + Sync {
    /// Returns the unique identifier for this mapper type.
    ///
    /// This ID is used to reference the mapper in configurations.
    /// Example: `"group-id-mapper"`
    fn id(&self) -> &'static str;

    /// Returns the display name for this mapper.
    ///
    /// Shown in admin UIs. Example: `"User Group IDs"`
    fn display_name(&self) -> &'static str;

    /// Returns the help text shown next to the mapper type.
    fn help_text(&self) -> &'static str;

    /// Returns the category for this mapper.
    ///
    /// Used for grouping in admin UIs.
    fn category(&self) -> &'static str {
        TOKEN_MAPPER_CATEGORY
    }

    /// Returns the configuration properties for this mapper.
    ///
    /// The list is built once and is identical across calls.
    fn config_properties(&self) -> &[ConfigProperty];

    /// Returns the token variants this mapper can contribute to.
    fn supported_tokens(&self) -> &'static [TokenType];

    /// Returns the priority for this mapper.
    ///
    /// Lower values execute first. Default is 0.
    fn priority(&self) -> i32 {
        0
    }

    /// Validates the mapper configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn validate_config(&self, _config: &MapperConfig) -> OidcResult<()> {
        Ok(())
    }

    /// Builds the metadata record for this mapper type.
    fn descriptor(&self) -> MapperDescriptor {
        MapperDescriptor {
            id: self.id().to_string(),
            display_name: self.display_name().to_string(),
            help_text: self.help_text().to_string(),
            category: self.category().to_string(),
            supported_tokens: self.supported_tokens().to_vec(),
            properties: self.config_properties().to_vec(),
        }
    }
}

/// Trait for mappers that contribute claims to OIDC tokens.
pub trait OidcProtocolMapper: ProtocolMapper {
    /// Computes the mapper's value and writes it into the claim set.
    ///
    /// Only called once the mapper is known to apply to the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be resolved or the claim cannot
    /// be written.
    fn set_claim(
        &self,
        claims: &mut dyn ClaimSet,
        config: &MapperConfig,
        session: &dyn UserSessionModel,
    ) -> OidcResult<()>;

    /// Contributes this mapper instance's claim to the token being assembled.
    ///
    /// Returns without side effects when the mapper does not support the
    /// token variant or the instance is not included in it.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`OidcProtocolMapper::set_claim`].
    fn populate_claim(
        &self,
        claims: &mut dyn ClaimSet,
        config: &MapperConfig,
        session: &dyn UserSessionModel,
        ctx: &IssuanceContext,
    ) -> OidcResult<()> {
        if !self.supported_tokens().contains(&ctx.token_type) {
            tracing::trace!(
                mapper = self.id(),
                token_type = %ctx.token_type,
                "token type not supported by mapper"
            );
            return Ok(());
        }

        if !claim::include_in(config, ctx) {
            tracing::debug!(
                mapper = self.id(),
                instance = %config.name,
                token_type = %ctx.token_type,
                lightweight = ctx.lightweight,
                "mapper not included in token"
            );
            return Ok(());
        }

        self.set_claim(claims, config, session)
    }
}
