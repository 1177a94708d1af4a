//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kc_protocol_oidc::TokenType;

/// Keycloak mapper tool - inspect protocol mappers and preview their claims.
#[derive(Debug, Parser)]
#[command(name = "kc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Token issuer used for previews (overrides `KC_ISSUER`).
    #[arg(long)]
    pub issuer: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Protocol mapper commands.
    #[command(subcommand)]
    Mappers(MappersCommand),

    /// Preview the claims the mappers of a fixture produce.
    Evaluate(EvaluateArgs),
}

/// Protocol mapper commands.
#[derive(Debug, Subcommand)]
pub enum MappersCommand {
    /// List registered mapper types.
    List,

    /// Show the configuration options of a mapper type.
    Show {
        /// Mapper type ID.
        id: String,
    },
}

/// Arguments of the `evaluate` command.
#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Fixture file (JSON) holding the client, user, session notes and mappers.
    pub fixture: PathBuf,

    /// Token variant to assemble.
    #[arg(short, long, value_enum, default_value = "access")]
    pub token: TokenArg,

    /// Force lightweight access-token mode.
    #[arg(long)]
    pub lightweight: bool,
}

/// Token variant selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TokenArg {
    /// Access token.
    Access,
    /// ID token.
    Id,
    /// `UserInfo` response.
    Userinfo,
    /// Token introspection response.
    Introspection,
}

impl From<TokenArg> for TokenType {
    fn from(arg: TokenArg) -> Self {
        match arg {
            TokenArg::Access => Self::AccessToken,
            TokenArg::Id => Self::IdToken,
            TokenArg::Userinfo => Self::UserInfo,
            TokenArg::Introspection => Self::Introspection,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// YAML-like format.
    Yaml,
}
