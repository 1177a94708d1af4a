//! # kc-core
//!
//! Core utilities, configuration, and error handling shared by the
//! protocol-mapper crates and the `kc` tool.
//!
//! ## Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Shared error type
//! - [`logging`] - `tracing` subscriber setup

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, IssuanceConfig, LoggingConfig, MAX_TOKEN_LIFESPAN};
pub use error::{Error, Result};
