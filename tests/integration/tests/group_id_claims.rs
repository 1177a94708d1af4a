//! Group ID claims through token assembly.

use kc_integration_tests::{access_claims, id_claims, init_tracing, registry, session_with_groups};
use kc_mapper_group_id::{GroupIdMapper, PROVIDER_ID};
use kc_protocol_oidc::mapper::keys;
use kc_protocol_oidc::{
    ClientInfo, IssuanceContext, MapperConfig, OidcError, TokenType,
    USE_LIGHTWEIGHT_ACCESS_TOKEN_ENABLED,
};
use serde_json::json;

/// Tests that each token variant honours the flags set by `create`.
#[test]
fn test_created_instance_across_token_types() -> anyhow::Result<()> {
    init_tracing();
    let registry = registry();
    let session = session_with_groups(&["g-1", "g-2", "g-3"]);
    let mappers = vec![GroupIdMapper::create(
        "group ids",
        "group_ids",
        false,
        None,
        true,
        true,
        false,
    )];

    let mut access = access_claims(&session);
    registry.apply(
        &mut access,
        &mappers,
        &session,
        &IssuanceContext::new(TokenType::AccessToken),
    )?;
    assert_eq!(
        access.additional.get("group_ids"),
        Some(&json!(["g-1", "g-2", "g-3"]))
    );

    let mut id = id_claims(&session);
    registry.apply(
        &mut id,
        &mappers,
        &session,
        &IssuanceContext::new(TokenType::IdToken),
    )?;
    assert_eq!(
        id.additional.get("group_ids"),
        Some(&json!(["g-1", "g-2", "g-3"]))
    );

    // userinfo follows the ID token flag
    let mut userinfo = access_claims(&session);
    registry.apply(
        &mut userinfo,
        &mappers,
        &session,
        &IssuanceContext::new(TokenType::UserInfo),
    )?;
    assert!(userinfo.additional.contains_key("group_ids"));

    // introspection follows the access token flag
    let mut introspection = access_claims(&session);
    registry.apply(
        &mut introspection,
        &mappers,
        &session,
        &IssuanceContext::new(TokenType::Introspection),
    )?;
    assert!(introspection.additional.contains_key("group_ids"));

    Ok(())
}

/// Tests that an instance with no flags keeps the legacy access-token default only.
#[test]
fn test_unflagged_instance_defaults() -> anyhow::Result<()> {
    init_tracing();
    let registry = registry();
    let session = session_with_groups(&["g-1"]);
    let mappers = vec![MapperConfig::new("group ids", PROVIDER_ID)
        .with_config(keys::CLAIM_NAME, "group_ids")];

    let mut access = access_claims(&session);
    registry.apply(
        &mut access,
        &mappers,
        &session,
        &IssuanceContext::new(TokenType::AccessToken),
    )?;
    assert_eq!(access.additional.get("group_ids"), Some(&json!(["g-1"])));

    let mut id = id_claims(&session);
    registry.apply(
        &mut id,
        &mappers,
        &session,
        &IssuanceContext::new(TokenType::IdToken),
    )?;
    assert!(id.additional.is_empty());

    let mut userinfo = access_claims(&session);
    registry.apply(
        &mut userinfo,
        &mappers,
        &session,
        &IssuanceContext::new(TokenType::UserInfo),
    )?;
    assert!(userinfo.additional.is_empty());

    Ok(())
}

/// Tests lightweight mode enabled through the client attribute.
#[test]
fn test_lightweight_access_token_via_client() -> anyhow::Result<()> {
    init_tracing();
    let registry = registry();
    let session = session_with_groups(&["g-1"]);
    let client =
        ClientInfo::new("web-app").with_attribute(USE_LIGHTWEIGHT_ACCESS_TOKEN_ENABLED, "true");
    let ctx = IssuanceContext::for_client(TokenType::AccessToken, &client, &session);

    let regular = GroupIdMapper::create("regular", "regular", false, None, true, false, false);
    let lightweight = MapperConfig::new("lightweight", PROVIDER_ID)
        .with_config(keys::CLAIM_NAME, "lightweight")
        .with_config(keys::INCLUDE_IN_ACCESS_TOKEN, "false")
        .with_config(keys::INCLUDE_IN_LIGHTWEIGHT_ACCESS_TOKEN, "true");

    let mut claims = access_claims(&session);
    registry.apply(&mut claims, &[regular, lightweight], &session, &ctx)?;

    assert!(!claims.additional.contains_key("regular"));
    assert_eq!(claims.additional.get("lightweight"), Some(&json!(["g-1"])));

    Ok(())
}

/// Tests lightweight mode enabled through a session note.
#[test]
fn test_lightweight_access_token_via_session_note() -> anyhow::Result<()> {
    init_tracing();
    let registry = registry();
    let session =
        session_with_groups(&["g-1"]).with_note(USE_LIGHTWEIGHT_ACCESS_TOKEN_ENABLED, "true");
    let client = ClientInfo::new("web-app");
    let ctx = IssuanceContext::for_client(TokenType::AccessToken, &client, &session);
    let mappers = vec![GroupIdMapper::create(
        "group ids", "group_ids", false, None, true, true, true,
    )];

    let mut claims = access_claims(&session);
    registry.apply(&mut claims, &mappers, &session, &ctx)?;
    assert!(claims.additional.is_empty());

    // lightweight mode has no effect on ID tokens
    let ctx = IssuanceContext::for_client(TokenType::IdToken, &client, &session);
    let mut id = id_claims(&session);
    registry.apply(&mut id, &mappers, &session, &ctx)?;
    assert_eq!(id.additional.get("group_ids"), Some(&json!(["g-1"])));

    Ok(())
}

/// Tests several instances writing nested and empty claims.
#[test]
fn test_multiple_instances_and_empty_groups() -> anyhow::Result<()> {
    init_tracing();
    let registry = registry();
    let session = session_with_groups(&[]);
    let mappers = vec![
        GroupIdMapper::create("flat", "group_ids", false, None, true, false, false),
        GroupIdMapper::create("nested", "membership.ids", false, None, true, false, false),
    ];

    let mut claims = access_claims(&session);
    registry.apply(
        &mut claims,
        &mappers,
        &session,
        &IssuanceContext::new(TokenType::AccessToken),
    )?;

    let token = serde_json::to_value(&claims)?;
    assert_eq!(token["group_ids"], json!([]));
    assert_eq!(token["membership"], json!({"ids": []}));
    assert_eq!(token["azp"], "web-app");

    Ok(())
}

/// Tests that writing through an existing scalar claim fails the whole assembly.
#[test]
fn test_claim_conflict_is_reported() {
    init_tracing();
    let registry = registry();
    let session = session_with_groups(&["g-1"]);
    let mappers = vec![GroupIdMapper::create(
        "nested",
        "azp_groups.ids",
        false,
        None,
        true,
        false,
        false,
    )];

    let mut claims = access_claims(&session).with_claim("azp_groups", json!("taken"));
    let result = registry.apply(
        &mut claims,
        &mappers,
        &session,
        &IssuanceContext::new(TokenType::AccessToken),
    );

    assert!(matches!(result, Err(OidcError::ClaimConflict(_))));
}

/// Tests that two assemblies with the same inputs produce the same claims.
#[test]
fn test_assembly_is_idempotent() -> anyhow::Result<()> {
    init_tracing();
    let registry = registry();
    let session = session_with_groups(&["b", "a", "b"]);
    let mappers = vec![GroupIdMapper::create(
        "group ids", "group_ids", false, None, true, false, false,
    )];
    let ctx = IssuanceContext::new(TokenType::AccessToken);

    let mut first = access_claims(&session);
    let mut second = access_claims(&session);
    registry.apply(&mut first, &mappers, &session, &ctx)?;
    registry.apply(&mut second, &mappers, &session, &ctx)?;

    assert_eq!(first.additional, second.additional);
    assert_eq!(
        first.additional.get("group_ids"),
        Some(&json!(["b", "a", "b"]))
    );

    Ok(())
}
