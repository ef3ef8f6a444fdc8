//! Role-aware data routing for the assistant backend.
//!
//! Regular users are served by a tenant store that enforces row-level
//! security with their forwarded credential; administrators are served by a
//! privileged store. Business logic sees neither: it talks to per-request
//! [`domain::adapters::Adapters`].

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::{Trace, TraceId};
