//! Domain layer: identities, records, ports and role-aware routing.
//!
//! Nothing in here talks to a database or the network directly. Store and
//! identity-provider adapters live under `outbound` and are injected
//! through the traits in [`ports`].
//!
//! Public surface:
//! - [`RequestContext`]: the per-request identity descriptor.
//! - [`routing::RoutingFacade`]: one method per data operation, dispatched
//!   by role.
//! - [`adapters::Adapters`]: per-request, per-domain views of the facade.
//! - [`IdentityResolver`]: credential to descriptor.
//! - [`DomainError`] / [`ErrorCode`]: transport-agnostic failures.

pub mod adapters;
pub mod context;
pub mod error;
pub mod identity;
mod identity_resolver;
pub mod ports;
pub mod records;
pub mod routing;

pub use self::context::{AdminIdentity, Principal, RequestContext, TenantIdentity};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::identity::{
    AccessToken, IdentityValidationError, NumericUserId, OwnerKey, Role, SubjectId,
};
pub use self::identity_resolver::IdentityResolver;

/// Result alias for domain-level operations.
///
/// # Examples
/// ```
/// use assistant_backend::domain::{DomainError, DomainResult};
///
/// fn lookup() -> DomainResult<u64> {
///     Err(DomainError::not_found("no such goal"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, DomainError>;
