//! # kc-protocol-oidc
//!
//! `OpenID` Connect claim sets and the protocol-mapper SPI for Keycloak Rust.
//!
//! Token assembly hands each configured mapper instance the claim set being
//! built, the user session and an [`IssuanceContext`]; mappers decide whether
//! they apply and write their claims through the shared claim writer.
//!
//! ## Modules
//!
//! - [`claims`] - JWT claim types for access and ID tokens
//! - [`error`] - Errors raised while mappers contribute claims
//! - [`mapper`] - Protocol mapper SPI, claim writer and registry
//! - [`session`] - User, session and client contracts read by mappers

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod claims;
pub mod error;
pub mod mapper;
pub mod session;

// Re-export commonly used types
pub use claims::{AccessTokenClaims, Audience, ClaimSet, IdTokenClaims};
pub use error::{OidcError, OidcResult};
pub use mapper::{
    AttributeValue, ClaimValueType, ConfigProperty, ConfigPropertyType, IssuanceContext,
    MapperConfig, MapperDescriptor, OidcProtocolMapper, ProtocolMapper, ProtocolMapperRegistry,
    TOKEN_MAPPER_CATEGORY, TokenType,
};
pub use session::{
    ClientInfo, USE_LIGHTWEIGHT_ACCESS_TOKEN_ENABLED, UserModel, UserSession, UserSessionModel,
};
