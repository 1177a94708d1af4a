//! Claim preview command.
//!
//! Runs the mapper instances of a fixture against its user and prints the
//! claims of the resulting token. Nothing is signed or issued.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use kc_core::IssuanceConfig;
use kc_model::User;
use kc_protocol_oidc::{
    AccessTokenClaims, ClientInfo, IdTokenClaims, IssuanceContext, MapperConfig,
    ProtocolMapperRegistry, TokenType, UserSession,
};
use serde::Deserialize;
use serde_json::Value;

use crate::cli::{EvaluateArgs, OutputFormat};
use crate::output::output_single;

/// Input of a claim preview.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// The client the token is issued to.
    pub client: ClientInfo,

    /// The authenticated user, with group memberships.
    pub user: User,

    /// Notes on the user session.
    #[serde(default)]
    pub session_notes: HashMap<String, String>,

    /// Mapper instances attached to the client.
    #[serde(default)]
    pub mappers: Vec<MapperConfig>,
}

impl Fixture {
    /// Builds the user session the mappers read.
    #[must_use]
    pub fn session(&self) -> UserSession {
        self.session_notes.iter().fold(
            UserSession::new(self.user.clone()),
            |session, (name, value)| session.with_note(name.clone(), value.clone()),
        )
    }
}

/// Runs the evaluate command.
///
/// # Errors
///
/// Returns an error if the fixture cannot be read or a mapper fails.
pub fn run_evaluate(
    args: EvaluateArgs,
    issuance: &IssuanceConfig,
    registry: &ProtocolMapperRegistry,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    let fixture = load_fixture(&args.fixture)?;
    let claims = evaluate(
        &fixture,
        registry,
        issuance,
        args.token.into(),
        args.lightweight,
    )?;
    output_single(&claims, output_format)
}

/// Reads a fixture file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_fixture(path: &Path) -> crate::CliResult<Fixture> {
    let content = std::fs::read_to_string(path)?;
    parse_fixture(&content, path)
}

fn parse_fixture(content: &str, path: &Path) -> crate::CliResult<Fixture> {
    serde_json::from_str(content).map_err(|source| crate::CliError::Fixture {
        path: path.display().to_string(),
        source,
    })
}

/// Computes the expiry of a token issued at `issued_at`.
///
/// # Errors
///
/// Returns a configuration error if the lifespan does not fit a timestamp.
pub fn expires_at(issued_at: DateTime<Utc>, lifespan: i64) -> crate::CliResult<DateTime<Utc>> {
    TimeDelta::try_seconds(lifespan)
        .and_then(|delta| issued_at.checked_add_signed(delta))
        .ok_or_else(|| {
            kc_core::Error::Config(format!("token lifespan of {lifespan}s is out of range")).into()
        })
}

/// Assembles the claims of one token variant for a fixture.
///
/// Lightweight mode follows the client attribute and session notes of the
/// fixture; `force_lightweight` turns it on regardless.
///
/// # Errors
///
/// Returns an error if a mapper fails or a configured lifespan is out of
/// range.
pub fn evaluate(
    fixture: &Fixture,
    registry: &ProtocolMapperRegistry,
    issuance: &IssuanceConfig,
    token_type: TokenType,
    force_lightweight: bool,
) -> crate::CliResult<Value> {
    let session = fixture.session();
    let mut ctx = IssuanceContext::for_client(token_type, &fixture.client, &session);
    if force_lightweight {
        ctx = ctx.with_lightweight(true);
    }

    tracing::debug!(
        token_type = %token_type,
        lightweight = ctx.lightweight,
        mappers = fixture.mappers.len(),
        "evaluating fixture"
    );

    let now = Utc::now();
    let subject = fixture.user.id.to_string();
    let client_id = fixture.client.client_id.as_str();

    let claims = if token_type == TokenType::IdToken {
        let mut claims = IdTokenClaims::new(
            issuance.issuer.clone(),
            subject,
            client_id,
            expires_at(now, issuance.id_token_lifespan)?,
        )
        .with_azp(client_id)
        .with_session(session.id.as_str());
        claims.preferred_username = Some(fixture.user.username.clone());

        registry.apply(&mut claims, &fixture.mappers, &session, &ctx)?;
        serde_json::to_value(&claims)?
    } else {
        let mut claims = AccessTokenClaims::new(
            issuance.issuer.clone(),
            subject,
            expires_at(now, issuance.access_token_lifespan)?,
        )
        .with_azp(client_id)
        .with_session(session.id.as_str())
        .with_preferred_username(fixture.user.username.as_str());

        registry.apply(&mut claims, &fixture.mappers, &session, &ctx)?;
        serde_json::to_value(&claims)?
    };

    Ok(claims)
}
