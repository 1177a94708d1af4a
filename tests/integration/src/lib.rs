//! Shared fixtures for the end-to-end tests.

#![forbid(unsafe_code)]

use chrono::{Duration, Utc};
use kc_model::{Group, User};
use kc_protocol_oidc::{AccessTokenClaims, IdTokenClaims, ProtocolMapperRegistry, UserSession};

/// Issuer used by every test token.
pub const ISSUER: &str = "https://auth.example.com/realms/test";

/// Client the test tokens are issued to.
pub const CLIENT_ID: &str = "web-app";

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("kc_protocol_oidc=debug,kc_mapper_group_id=debug")
        .with_test_writer()
        .try_init();
}

/// A registry with the group ID mapper registered.
#[must_use]
pub fn registry() -> ProtocolMapperRegistry {
    let mut registry = ProtocolMapperRegistry::new();
    kc_mapper_group_id::register(&mut registry);
    registry
}

/// A session for `alice`, member of the given groups in that order.
#[must_use]
pub fn session_with_groups(ids: &[&str]) -> UserSession {
    let user = ids.iter().fold(User::new("alice"), |user, id| {
        user.with_group(Group::with_id(*id, format!("group-{id}")))
    });
    UserSession::new(user)
}

/// Fresh access token claims for a session.
#[must_use]
pub fn access_claims(session: &UserSession) -> AccessTokenClaims {
    AccessTokenClaims::new(
        ISSUER.to_string(),
        subject(session),
        Utc::now() + Duration::minutes(5),
    )
    .with_azp(CLIENT_ID)
    .with_session(session.id.as_str())
}

/// Fresh ID token claims for a session.
#[must_use]
pub fn id_claims(session: &UserSession) -> IdTokenClaims {
    IdTokenClaims::new(
        ISSUER.to_string(),
        subject(session),
        CLIENT_ID,
        Utc::now() + Duration::minutes(5),
    )
    .with_session(session.id.as_str())
}

fn subject(session: &UserSession) -> String {
    session
        .user
        .as_ref()
        .map(|user| user.id.to_string())
        .unwrap_or_default()
}
