//! # kc-cli
//!
//! Command-line tool for inspecting protocol mappers.
//!
//! This crate provides:
//! - Listing of the registered mapper types and their configuration options
//! - Claim previews: running the mappers of a fixture against a user and
//!   printing the claims they would add to a token

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use error::{CliError, CliResult};
