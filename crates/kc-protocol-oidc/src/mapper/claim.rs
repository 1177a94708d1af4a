//! Claim writer shared by OIDC mappers.
//!
//! Two concerns live here:
//!
//! - **Inclusion**: whether a mapper instance contributes to the token variant
//!   currently being assembled ([`include_in`]).
//! - **Placement**: converting a mapped value and merging it into a
//!   [`ClaimSet`] under the configured claim name ([`map_claim`]).

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::config::{ClaimValueType, MapperConfig, keys};
use super::{IssuanceContext, TokenType};
use crate::claims::ClaimSet;
use crate::error::{OidcError, OidcResult};

/// Decides whether a mapper instance applies to the token being assembled.
///
/// Access tokens issued in lightweight mode only honour the lightweight
/// toggle; the instance's own access-token toggle is ignored there.
#[must_use]
pub fn include_in(config: &MapperConfig, ctx: &IssuanceContext) -> bool {
    if ctx.is_lightweight_access_token() {
        return include_in_lightweight_access_token(config);
    }

    match ctx.token_type {
        TokenType::AccessToken => include_in_access_token(config),
        TokenType::IdToken => include_in_id_token(config),
        TokenType::UserInfo => include_in_userinfo(config),
        TokenType::Introspection => include_in_introspection(config),
    }
}

/// Access-token inclusion.
///
/// Instances created before the toggle existed carry no value for it and keep
/// contributing to access tokens: an absent toggle means `true`.
#[must_use]
pub fn include_in_access_token(config: &MapperConfig) -> bool {
    config.flag(keys::INCLUDE_IN_ACCESS_TOKEN).unwrap_or(true)
}

/// Lightweight access-token inclusion. Absent means `false`.
#[must_use]
pub fn include_in_lightweight_access_token(config: &MapperConfig) -> bool {
    config
        .flag(keys::INCLUDE_IN_LIGHTWEIGHT_ACCESS_TOKEN)
        .unwrap_or(false)
}

/// ID-token inclusion. Absent means `false`.
#[must_use]
pub fn include_in_id_token(config: &MapperConfig) -> bool {
    config.flag(keys::INCLUDE_IN_ID_TOKEN).unwrap_or(false)
}

/// `UserInfo` inclusion. Absent follows the ID-token toggle.
#[must_use]
pub fn include_in_userinfo(config: &MapperConfig) -> bool {
    config
        .flag(keys::INCLUDE_IN_USERINFO)
        .unwrap_or_else(|| include_in_id_token(config))
}

/// Introspection inclusion. Absent follows the access-token toggle.
#[must_use]
pub fn include_in_introspection(config: &MapperConfig) -> bool {
    config
        .flag(keys::INCLUDE_IN_INTROSPECTION)
        .unwrap_or_else(|| include_in_access_token(config))
}

/// A raw value produced by a mapper, before JSON conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A single value.
    Single(String),
    /// An ordered list of values.
    Multiple(Vec<String>),
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

/// Resolves the claim name for a mapper instance.
///
/// Falls back to the instance name when `claim.name` is absent or empty.
#[must_use]
pub fn resolve_claim_name(config: &MapperConfig) -> &str {
    config
        .claim_name()
        .filter(|name| !name.is_empty())
        .unwrap_or(config.name.as_str())
}

/// Writes a mapped value into a claim set.
///
/// The value is converted according to the instance's `jsonType.label` and
/// `multivalued` options. A multi-valued value written as multivalued always
/// produces a JSON array, even when empty. The last path segment overwrites
/// whatever was there.
///
/// # Errors
///
/// Returns [`OidcError::ClaimConflict`] if an intermediate path segment
/// already holds a non-object value.
pub fn map_claim(
    claims: &mut dyn ClaimSet,
    config: &MapperConfig,
    value: AttributeValue,
) -> OidcResult<()> {
    let claim_name = resolve_claim_name(config);
    if claim_name.is_empty() {
        tracing::debug!(mapper = %config.id, "no claim name resolved, skipping");
        return Ok(());
    }

    let Some(json) = to_json_value(config, value) else {
        return Ok(());
    };

    let path = split_claim_path(claim_name);
    if set_claim_path(claims.other_claims_mut(), &path, json) {
        Ok(())
    } else {
        Err(OidcError::ClaimConflict(claim_name.to_string()))
    }
}

fn to_json_value(config: &MapperConfig, value: AttributeValue) -> Option<Value> {
    let claim_type = config.json_type();
    let multivalued = config.is_multivalued();

    match value {
        AttributeValue::Multiple(values) if multivalued => Some(Value::Array(
            values
                .iter()
                .map(|v| convert_single_value(v, claim_type))
                .collect(),
        )),
        AttributeValue::Multiple(values) => {
            if values.len() > 1 {
                tracing::warn!(
                    mapper = %config.name,
                    count = values.len(),
                    "multiple values for a single-valued claim, using the first"
                );
            }
            values.first().map(|v| convert_single_value(v, claim_type))
        }
        AttributeValue::Single(v) if multivalued => {
            Some(Value::Array(vec![convert_single_value(&v, claim_type)]))
        }
        AttributeValue::Single(v) => Some(convert_single_value(&v, claim_type)),
    }
}

/// Converts a single string value to a JSON value based on the claim type.
///
/// Values that fail to convert are kept as strings.
#[must_use]
pub fn convert_single_value(value: &str, claim_type: ClaimValueType) -> Value {
    match claim_type {
        ClaimValueType::String => Value::String(value.to_string()),
        ClaimValueType::Long | ClaimValueType::Int => value.parse::<i64>().map_or_else(
            |_| Value::String(value.to_string()),
            |n| Value::Number(n.into()),
        ),
        ClaimValueType::Boolean => value
            .parse::<bool>()
            .map_or_else(|_| Value::String(value.to_string()), Value::Bool),
        ClaimValueType::Json => {
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
        }
    }
}

/// Splits a claim name on unescaped dots; `\.` stands for a literal dot.
fn split_claim_path(name: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                current.push('.');
                chars.next();
            }
            '.' => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}

/// Returns `false` when the path runs through a non-object value.
fn set_claim_path(claims: &mut HashMap<String, Value>, path: &[String], value: Value) -> bool {
    match path {
        [] => true,
        [last] => {
            claims.insert(last.clone(), value);
            true
        }
        [head, rest @ ..] => {
            let entry = claims
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            set_nested(entry, rest, value)
        }
    }
}

fn set_nested(target: &mut Value, path: &[String], value: Value) -> bool {
    let Value::Object(map) = target else {
        return false;
    };

    match path {
        [] => true,
        [last] => {
            map.insert(last.clone(), value);
            true
        }
        [head, rest @ ..] => {
            let entry = map
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            set_nested(entry, rest, value)
        }
    }
}
