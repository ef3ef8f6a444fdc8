//! In-memory doubles for integration and handler tests.
//!
//! [`InMemoryPrivilegedStore`] serves every row to every caller, like the
//! privileged database connection. [`InMemoryTenantStore`] emulates
//! row-level security: each credential is registered against exactly one
//! subject, reads only see that subject's rows and writes stamped with any
//! other owner are rejected. [`StaticIdentityProvider`] stands in for both
//! identity ports.

mod identity;
mod memory_ports;
mod memory_store;

pub use identity::StaticIdentityProvider;
pub use memory_store::{InMemoryPrivilegedStore, InMemoryTenantStore, MemoryScope, MemoryStore};
