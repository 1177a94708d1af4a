//! Registry routing mapper instances to mapper implementations.

use std::collections::HashMap;
use std::sync::Arc;

use super::{IssuanceContext, MapperConfig, MapperDescriptor, OidcProtocolMapper, ProtocolMapper};
use crate::claims::ClaimSet;
use crate::error::OidcResult;
use crate::session::UserSessionModel;

/// Registry for protocol mappers.
///
/// Manages registration and lookup of mapper implementations by type ID.
#[derive(Default)]
pub struct ProtocolMapperRegistry {
    /// Registered mappers by ID.
    mappers: HashMap<String, Arc<dyn OidcProtocolMapper>>,
}

impl ProtocolMapperRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapper, replacing any mapper with the same ID.
    pub fn register(&mut self, mapper: Arc<dyn OidcProtocolMapper>) {
        let id = mapper.id().to_string();
        if self.mappers.insert(id.clone(), mapper).is_some() {
            tracing::warn!(mapper = %id, "replaced previously registered protocol mapper");
        } else {
            tracing::debug!(mapper = %id, "registered protocol mapper");
        }
    }

    /// Gets a mapper by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn OidcProtocolMapper>> {
        self.mappers.get(id)
    }

    /// Returns all registered mapper IDs, sorted.
    #[must_use]
    pub fn mapper_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.mappers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the metadata of every registered mapper, sorted by ID.
    #[must_use]
    pub fn descriptors(&self) -> Vec<MapperDescriptor> {
        self.mapper_ids()
            .into_iter()
            .filter_map(|id| self.mappers.get(id))
            .map(|mapper| mapper.descriptor())
            .collect()
    }

    /// Number of registered mappers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// Whether no mapper is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Applies every configured mapper instance to a claim set.
    ///
    /// Instances run in mapper priority order; instances of equal priority
    /// keep their configured order. Instances whose mapper type is not
    /// registered are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first validation or mapping error.
    pub fn apply(
        &self,
        claims: &mut dyn ClaimSet,
        mapper_configs: &[MapperConfig],
        session: &dyn UserSessionModel,
        ctx: &IssuanceContext,
    ) -> OidcResult<()> {
        let mut resolved = Vec::with_capacity(mapper_configs.len());
        for config in mapper_configs {
            let Some(mapper) = self.mappers.get(&config.mapper_type) else {
                tracing::warn!(
                    mapper_type = %config.mapper_type,
                    instance = %config.name,
                    "skipping mapper instance with unknown mapper type"
                );
                continue;
            };
            mapper.validate_config(config)?;
            resolved.push((mapper, config));
        }

        resolved.sort_by_key(|(mapper, _)| mapper.priority());

        for (mapper, config) in resolved {
            mapper.populate_claim(claims, config, session, ctx)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for ProtocolMapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolMapperRegistry")
            .field("mappers", &self.mapper_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use kc_model::User;
    use serde_json::json;

    use super::*;
    use crate::claims::AccessTokenClaims;
    use crate::error::OidcError;
    use crate::mapper::{ConfigProperty, TokenType, claim, keys};
    use crate::session::UserSession;

    /// Writes a fixed value; `priority` controls ordering.
    struct FixedMapper {
        id: &'static str,
        value: &'static str,
        priority: i32,
    }

    impl ProtocolMapper for FixedMapper {
        fn id(&self) -> &'static str {
            self.id
        }

        fn display_name(&self) -> &'static str {
            "Fixed"
        }

        fn help_text(&self) -> &'static str {
            "Writes a fixed value"
        }

        fn config_properties(&self) -> &[ConfigProperty] {
            &[]
        }

        fn supported_tokens(&self) -> &'static [TokenType] {
            &TokenType::ALL
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn validate_config(&self, config: &MapperConfig) -> OidcResult<()> {
            if config.get("reject").is_some() {
                return Err(OidcError::InvalidMapperConfig(config.name.clone()));
            }
            Ok(())
        }
    }

    impl OidcProtocolMapper for FixedMapper {
        fn set_claim(
            &self,
            claims: &mut dyn ClaimSet,
            config: &MapperConfig,
            _session: &dyn UserSessionModel,
        ) -> OidcResult<()> {
            claim::map_claim(claims, config, self.value.into())
        }
    }

    fn registry() -> ProtocolMapperRegistry {
        let mut registry = ProtocolMapperRegistry::new();
        registry.register(Arc::new(FixedMapper {
            id: "late",
            value: "late",
            priority: 10,
        }));
        registry.register(Arc::new(FixedMapper {
            id: "early",
            value: "early",
            priority: -10,
        }));
        registry
    }

    fn claims() -> AccessTokenClaims {
        AccessTokenClaims::new(
            "https://auth.example.com".to_string(),
            "user123".to_string(),
            Utc::now() + Duration::hours(1),
        )
    }

    #[test]
    fn ids_are_sorted() {
        let registry = registry();
        assert_eq!(registry.mapper_ids(), vec!["early", "late"]);
        assert_eq!(registry.len(), 2);

        let descriptors = registry.descriptors();
        assert_eq!(descriptors[0].id, "early");
        assert_eq!(descriptors[1].category, "Token mapper");
    }

    #[test]
    fn apply_runs_in_priority_order() {
        let registry = registry();
        let session = UserSession::new(User::new("alice"));
        let configs = vec![
            MapperConfig::new("late", "late").with_config(keys::CLAIM_NAME, "winner"),
            MapperConfig::new("early", "early").with_config(keys::CLAIM_NAME, "winner"),
        ];
        let mut claims = claims();

        registry
            .apply(
                &mut claims,
                &configs,
                &session,
                &IssuanceContext::new(TokenType::AccessToken),
            )
            .unwrap();

        assert_eq!(claims.additional.get("winner"), Some(&json!("late")));
    }

    #[test]
    fn apply_skips_unknown_mapper_types() {
        let registry = registry();
        let session = UserSession::new(User::new("alice"));
        let configs = vec![
            MapperConfig::new("ghost", "not-registered").with_config(keys::CLAIM_NAME, "ghost"),
            MapperConfig::new("early", "early").with_config(keys::CLAIM_NAME, "known"),
        ];
        let mut claims = claims();

        registry
            .apply(
                &mut claims,
                &configs,
                &session,
                &IssuanceContext::new(TokenType::AccessToken),
            )
            .unwrap();

        assert!(!claims.additional.contains_key("ghost"));
        assert_eq!(claims.additional.get("known"), Some(&json!("early")));
    }

    #[test]
    fn apply_rejects_invalid_config_before_writing() {
        let registry = registry();
        let session = UserSession::new(User::new("alice"));
        let configs = vec![
            MapperConfig::new("ok", "early").with_config(keys::CLAIM_NAME, "ok"),
            MapperConfig::new("bad", "late").with_config("reject", "yes"),
        ];
        let mut claims = claims();

        let result = registry.apply(
            &mut claims,
            &configs,
            &session,
            &IssuanceContext::new(TokenType::AccessToken),
        );

        assert!(matches!(result, Err(OidcError::InvalidMapperConfig(_))));
        assert!(claims.additional.is_empty());
    }

    #[test]
    fn apply_honours_inclusion() {
        let registry = registry();
        let session = UserSession::new(User::new("alice"));
        let configs = vec![MapperConfig::new("early", "early").with_config(keys::CLAIM_NAME, "c")];
        let mut claims = claims();

        registry
            .apply(
                &mut claims,
                &configs,
                &session,
                &IssuanceContext::new(TokenType::IdToken),
            )
            .unwrap();

        assert!(claims.additional.is_empty());
    }
}
