//! Identity-provider adapters.

mod http_verifier;

pub use http_verifier::{HttpTokenVerifier, IdentityProviderConfig};
