//! Claim previews from fixture files.

use kc_cli::commands::evaluate::{evaluate, load_fixture};
use kc_core::Config;
use kc_integration_tests::{init_tracing, registry};
use kc_protocol_oidc::TokenType;
use serde_json::json;

const FIXTURE: &str = r#"{
    "client": {
        "client_id": "web-app",
        "attributes": {"client.use.lightweight.access.token.enabled": "false"}
    },
    "user": {
        "username": "alice",
        "groups": [
            {"id": "0b7a", "name": "engineering"},
            {"id": "5c21", "name": "oncall", "parent_id": "0b7a"}
        ]
    },
    "session_notes": {"AUTH_TIME": "1700000000"},
    "mappers": [
        {
            "name": "group ids",
            "mapper_type": "group-id-mapper",
            "config": {
                "claim.name": "groups.ids",
                "id.token.claim": "true",
                "lightweight.claim": "true"
            }
        }
    ]
}"#;

fn write_fixture(name: &str) -> anyhow::Result<std::path::PathBuf> {
    let path = std::env::temp_dir().join(format!("kc-{}-{name}.json", std::process::id()));
    std::fs::write(&path, FIXTURE)?;
    Ok(path)
}

/// Tests a preview driven by configuration read from the environment lookup.
#[test]
fn test_preview_uses_configured_issuer() -> anyhow::Result<()> {
    init_tracing();
    let path = write_fixture("issuer")?;
    let fixture = load_fixture(&path)?;
    let config = Config::from_lookup(|key| {
        (key == "KC_ISSUER").then(|| "https://sso.example.org/realms/acme".to_string())
    })?;

    let claims = evaluate(
        &fixture,
        &registry(),
        &config.issuance,
        TokenType::AccessToken,
        false,
    )?;

    assert_eq!(claims["iss"], "https://sso.example.org/realms/acme");
    assert_eq!(claims["groups"], json!({"ids": ["0b7a", "5c21"]}));
    let lifespan =
        claims["exp"].as_i64().unwrap_or_default() - claims["iat"].as_i64().unwrap_or_default();
    assert!((299..=301).contains(&lifespan));

    std::fs::remove_file(path)?;
    Ok(())
}

/// Tests that each token variant of a preview follows the instance flags.
#[test]
fn test_preview_token_variants() -> anyhow::Result<()> {
    init_tracing();
    let path = write_fixture("variants")?;
    let fixture = load_fixture(&path)?;
    let issuance = Config::default().issuance;
    let registry = registry();

    let id = evaluate(&fixture, &registry, &issuance, TokenType::IdToken, false)?;
    assert_eq!(id["aud"], "web-app");
    assert_eq!(id["groups"]["ids"], json!(["0b7a", "5c21"]));

    let userinfo = evaluate(&fixture, &registry, &issuance, TokenType::UserInfo, false)?;
    assert_eq!(userinfo["groups"]["ids"], json!(["0b7a", "5c21"]));

    let lightweight = evaluate(&fixture, &registry, &issuance, TokenType::AccessToken, true)?;
    assert_eq!(lightweight["groups"]["ids"], json!(["0b7a", "5c21"]));

    std::fs::remove_file(path)?;
    Ok(())
}

/// Tests that a missing fixture file is an I/O error.
#[test]
fn test_missing_fixture() {
    let result = load_fixture(std::path::Path::new("/nonexistent/kc-fixture.json"));
    assert!(matches!(result, Err(kc_cli::CliError::Io(_))));
}
