//! End-to-End Integration Tests
//!
//! These tests run token assembly through the mapper registry the way an
//! issuing endpoint would, with the group ID mapper registered.

mod cli_preview;
mod group_id_claims;
