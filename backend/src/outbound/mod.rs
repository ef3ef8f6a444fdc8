//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: Backend A and the user directory, PostgreSQL through
//!   Diesel
//! - **tenant**: Backend B, a PostgREST-style HTTP API reached with the
//!   caller's own credential
//! - **identity**: bearer credential verification against the identity
//!   provider
//!
//! Adapters are thin translators between domain types and wire or row
//! representations. They contain no routing decisions.

pub mod identity;
pub mod persistence;
pub mod tenant;
