//! The group ID mapper.

use std::sync::LazyLock;

use kc_protocol_oidc::mapper::{claim, include_in_tokens_properties, keys, token_claim_name_property};
use kc_protocol_oidc::{
    AttributeValue, ClaimSet, ConfigProperty, MapperConfig, OidcProtocolMapper, OidcResult,
    ProtocolMapper, TOKEN_MAPPER_CATEGORY, TokenType, UserSessionModel,
};

/// Mapper type ID.
pub const PROVIDER_ID: &str = "group-id-mapper";

static SUPPORTED_TOKENS: [TokenType; 4] = TokenType::ALL;

static CONFIG_PROPERTIES: LazyLock<Vec<ConfigProperty>> = LazyLock::new(|| {
    let mut properties = vec![token_claim_name_property()];
    properties.extend(include_in_tokens_properties(&SUPPORTED_TOKENS));
    properties
});

/// Maps the IDs of the user's groups to a multivalued claim.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupIdMapper;

impl GroupIdMapper {
    /// Creates a mapper instance configuration for this mapper type.
    ///
    /// Inclusion toggles are only written for the tokens requested; the
    /// others stay absent and resolve to their defaults.
    #[must_use]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn create(
        name: impl Into<String>,
        claim_name: impl Into<String>,
        consent_required: bool,
        consent_text: Option<String>,
        access_token: bool,
        id_token: bool,
        introspection: bool,
    ) -> MapperConfig {
        let mut config = MapperConfig::new(name, PROVIDER_ID);
        config.consent_required = consent_required;
        config.consent_text = consent_text;
        config
            .config
            .insert(keys::CLAIM_NAME.to_string(), claim_name.into());

        for (enabled, key) in [
            (access_token, keys::INCLUDE_IN_ACCESS_TOKEN),
            (id_token, keys::INCLUDE_IN_ID_TOKEN),
            (introspection, keys::INCLUDE_IN_INTROSPECTION),
        ] {
            if enabled {
                config.config.insert(key.to_string(), "true".to_string());
            }
        }

        config
    }
}

impl ProtocolMapper for GroupIdMapper {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn display_name(&self) -> &'static str {
        "User Group IDs"
    }

    fn help_text(&self) -> &'static str {
        "Map user's group IDs"
    }

    fn category(&self) -> &'static str {
        TOKEN_MAPPER_CATEGORY
    }

    fn config_properties(&self) -> &[ConfigProperty] {
        &CONFIG_PROPERTIES
    }

    fn supported_tokens(&self) -> &'static [TokenType] {
        &SUPPORTED_TOKENS
    }
}

impl OidcProtocolMapper for GroupIdMapper {
    fn set_claim(
        &self,
        claims: &mut dyn ClaimSet,
        config: &MapperConfig,
        session: &dyn UserSessionModel,
    ) -> OidcResult<()> {
        let user = session.user()?;
        let group_ids: Vec<String> = user.groups()?.map(|group| group.id.clone()).collect();

        tracing::debug!(
            mapper = PROVIDER_ID,
            instance = %config.name,
            user = user.username(),
            groups = group_ids.len(),
            "mapping group ids"
        );

        // The claim is a list whatever the stored instance says.
        let effective = config.clone().with_config(keys::MULTIVALUED, "true");
        claim::map_claim(claims, &effective, AttributeValue::Multiple(group_ids))
    }
}
