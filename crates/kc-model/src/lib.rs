//! # kc-model
//!
//! Domain models consumed by protocol mappers.
//!
//! Only the parts of the identity store that token mappers read are modelled
//! here: the [`User`] and the [`Group`]s it is a member of.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod group;
pub mod user;

pub use group::Group;
pub use user::User;
