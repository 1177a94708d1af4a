//! Command implementations.

pub mod evaluate;
pub mod mappers;

pub use evaluate::run_evaluate;
pub use mappers::run_mappers;

use kc_protocol_oidc::ProtocolMapperRegistry;

/// Builds the registry of every mapper type shipped with the tool.
#[must_use]
pub fn registry() -> ProtocolMapperRegistry {
    let mut registry = ProtocolMapperRegistry::new();
    kc_mapper_group_id::register(&mut registry);
    registry
}
