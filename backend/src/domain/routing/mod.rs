//! Role-aware routing facade.
//!
//! One method per logical data operation. Each call inspects the request
//! context, dispatches to the privileged or tenant store, and normalises
//! the result into canonical record shape. Two rules hold for every
//! operation:
//!
//! - The backend is a function of the caller's role alone
//!   ([`select_backend`]).
//! - On the tenant path the owner is always the caller, whatever target id
//!   was supplied ([`resolve_effective_owner`]).
//!
//! The facade keeps no state between calls. Store failures are wrapped in
//! [`RoutingError`] and propagated, never retried or swallowed.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use super::context::{Principal, RequestContext};
use super::error::DomainError;
use super::identity::{NumericUserId, OwnerKey, Role};
use super::ports::{
    BackendKind, PrivilegedAccess, PrivilegedBackend, StoreError, TenantBackend, TenantSession,
};
use super::records::Stored;
use super::records::goals::GoalProgressEntry;
use super::records::learning::VocabularyItem;

/// Dispatch an operation whose owner is supplied by the caller.
///
/// The closure-like tail is expanded once per backend with `$store`,
/// `$access` and `$owner` bound to that backend's types.
macro_rules! route_owned {
    (
        $facade:expr, $ctx:expr, $operation:literal, $supplied:expr,
        |$store:ident, $access:ident, $owner:ident| $call:expr
    ) => {{
        match $crate::domain::routing::resolve_effective_owner($ctx, $supplied) {
            $crate::domain::routing::EffectiveOwner::Target(target) => {
                let $store = $facade.privileged.as_ref();
                let $access = &$crate::domain::ports::PrivilegedAccess::grant();
                let $owner = &target;
                $crate::domain::routing::finish(
                    $operation,
                    $crate::domain::ports::BackendKind::Privileged,
                    $call.await,
                )
            }
            $crate::domain::routing::EffectiveOwner::Caller(session) => {
                let $store = $facade.tenant.as_ref();
                let $access = &session;
                let $owner = session.subject();
                $crate::domain::routing::finish(
                    $operation,
                    $crate::domain::ports::BackendKind::Tenant,
                    $call.await,
                )
            }
        }
    }};
}

/// Dispatch an operation addressed by record id or with no owner at all.
macro_rules! route_scoped {
    (
        $facade:expr, $ctx:expr, $operation:literal,
        |$store:ident, $access:ident| $call:expr
    ) => {{
        match $crate::domain::routing::select_route($ctx) {
            $crate::domain::routing::Route::Privileged(granted) => {
                let $store = $facade.privileged.as_ref();
                let $access = &granted;
                $crate::domain::routing::finish(
                    $operation,
                    $crate::domain::ports::BackendKind::Privileged,
                    $call.await,
                )
            }
            $crate::domain::routing::Route::Tenant(session) => {
                let $store = $facade.tenant.as_ref();
                let $access = &session;
                $crate::domain::routing::finish(
                    $operation,
                    $crate::domain::ports::BackendKind::Tenant,
                    $call.await,
                )
            }
        }
    }};
}

mod budget;
mod conversations;
mod debt;
mod goals;
mod iot;
mod learning;
mod notifications;
mod profiles;
mod translation;

/// Default number of snapshots returned by `get_budget_snapshots`.
pub const DEFAULT_SNAPSHOT_LIMIT: u32 = 12;
/// Default number of rows returned by history and conversation listings.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Result alias for facade operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

/// A store failure tagged with the logical operation that hit it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("database operation failed: {operation}")]
pub struct RoutingError {
    operation: &'static str,
    backend: BackendKind,
    source: StoreError,
}

impl RoutingError {
    /// Wrap `source` for `operation` on `backend`.
    #[must_use]
    pub const fn new(operation: &'static str, backend: BackendKind, source: StoreError) -> Self {
        Self {
            operation,
            backend,
            source,
        }
    }

    /// Name of the facade operation that failed.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Backend that reported the failure.
    #[must_use]
    pub const fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Underlying store error, for classification.
    #[must_use]
    pub const fn store_error(&self) -> &StoreError {
        &self.source
    }
}

impl From<RoutingError> for DomainError {
    fn from(value: RoutingError) -> Self {
        let message = value.to_string();
        let error = match value.source {
            StoreError::Configuration { .. } | StoreError::Connection { .. } => {
                Self::service_unavailable(message)
            }
            StoreError::Rejected { .. } => Self::unauthorized(message),
            StoreError::Query { .. } | StoreError::Decode { .. } => Self::internal(message),
        };
        error.with_details(json!({
            "operation": value.operation,
            "backend": value.backend,
        }))
    }
}

/// Backend serving a role. Depends on nothing else.
///
/// # Examples
/// ```
/// use assistant_backend::domain::Role;
/// use assistant_backend::domain::ports::BackendKind;
/// use assistant_backend::domain::routing::select_backend;
///
/// assert_eq!(select_backend(Role::Admin), BackendKind::Privileged);
/// assert_eq!(select_backend(Role::User), BackendKind::Tenant);
/// ```
#[must_use]
pub const fn select_backend(role: Role) -> BackendKind {
    match role {
        Role::Admin => BackendKind::Privileged,
        Role::User => BackendKind::Tenant,
    }
}

/// Owner an owned operation will actually act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectiveOwner {
    /// Administrator call: the supplied numeric id, unfiltered.
    Target(NumericUserId),
    /// Regular-user call: always the caller, via their own session.
    Caller(TenantSession),
}

impl EffectiveOwner {
    /// Backend this owner is served by.
    #[must_use]
    pub const fn backend(&self) -> BackendKind {
        match self {
            Self::Target(_) => BackendKind::Privileged,
            Self::Caller(_) => BackendKind::Tenant,
        }
    }

    /// Owner key in canonical form.
    #[must_use]
    pub fn owner_key(&self) -> OwnerKey {
        match self {
            Self::Target(id) => OwnerKey::from(*id),
            Self::Caller(session) => OwnerKey::from(session.subject().clone()),
        }
    }
}

/// Resolve the owner for an operation given the caller-supplied target.
///
/// Administrators may name any numeric id. For regular users the supplied
/// id is ignored and the caller's own subject is used; this is the only
/// place that override happens.
#[must_use]
pub fn resolve_effective_owner(ctx: &RequestContext, supplied: NumericUserId) -> EffectiveOwner {
    match ctx.principal() {
        Principal::Admin(_) => EffectiveOwner::Target(supplied),
        Principal::User(identity) => {
            if supplied != identity.numeric_id() {
                debug!(
                    supplied = %supplied,
                    caller = %identity.subject(),
                    "tenant call named another owner; serving the caller's own rows"
                );
            }
            EffectiveOwner::Caller(TenantSession::for_identity(identity))
        }
    }
}

pub(crate) enum Route {
    Privileged(PrivilegedAccess),
    Tenant(TenantSession),
}

pub(crate) fn select_route(ctx: &RequestContext) -> Route {
    match ctx.principal() {
        Principal::Admin(_) => Route::Privileged(PrivilegedAccess::grant()),
        Principal::User(identity) => Route::Tenant(TenantSession::for_identity(identity)),
    }
}

/// Log the dispatch, normalise the value and tag any error.
pub(crate) fn finish<T: Normalize>(
    operation: &'static str,
    backend: BackendKind,
    outcome: Result<T, StoreError>,
) -> RoutingResult<T::Output> {
    match outcome {
        Ok(value) => {
            debug!(operation, backend = %backend, "data operation routed");
            Ok(value.normalize())
        }
        Err(source) => {
            debug!(operation, backend = %backend, error = %source, "data operation failed");
            Err(RoutingError::new(operation, backend, source))
        }
    }
}

/// Conversion of a store result into the shape returned to callers.
pub trait Normalize {
    /// Canonical shape.
    type Output;

    /// Perform the conversion.
    fn normalize(self) -> Self::Output;
}

impl<T, O: Into<OwnerKey>> Normalize for Stored<T, O> {
    type Output = Stored<T, OwnerKey>;

    fn normalize(self) -> Self::Output {
        self.into_record()
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    type Output = Vec<T::Output>;

    fn normalize(self) -> Self::Output {
        self.into_iter().map(Normalize::normalize).collect()
    }
}

impl<T: Normalize> Normalize for Option<T> {
    type Output = Option<T::Output>;

    fn normalize(self) -> Self::Output {
        self.map(Normalize::normalize)
    }
}

macro_rules! already_canonical {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Normalize for $ty {
                type Output = Self;

                fn normalize(self) -> Self::Output {
                    self
                }
            }
        )+
    };
}

already_canonical!((), bool, u64, GoalProgressEntry, VocabularyItem);

/// Role-aware entry point for every data operation.
///
/// Holds the two injected stores; cloning is two reference-count bumps.
#[derive(Clone)]
pub struct RoutingFacade {
    privileged: Arc<dyn PrivilegedBackend>,
    tenant: Arc<dyn TenantBackend>,
}

impl RoutingFacade {
    /// Build a facade over the given stores.
    pub fn new(privileged: Arc<dyn PrivilegedBackend>, tenant: Arc<dyn TenantBackend>) -> Self {
        Self { privileged, tenant }
    }
}

impl std::fmt::Debug for RoutingFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingFacade").finish_non_exhaustive()
    }
}

#[cfg(test)]
fn scope_backend<S: super::ports::AccessScope>() -> BackendKind {
    S::BACKEND
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccessToken, SubjectId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn admin() -> RequestContext {
        RequestContext::admin(
            SubjectId::new("admin-1").expect("subject"),
            NumericUserId::new(1).expect("id"),
        )
    }

    #[fixture]
    fn user() -> RequestContext {
        RequestContext::user(
            SubjectId::new("user-42").expect("subject"),
            NumericUserId::new(42).expect("id"),
            AccessToken::new("jwt-42").expect("token"),
        )
    }

    fn id(value: i64) -> NumericUserId {
        NumericUserId::new(value).expect("id")
    }

    #[rstest]
    #[case(1)]
    #[case(42)]
    #[case(999)]
    fn admins_act_on_the_supplied_owner(admin: RequestContext, #[case] supplied: i64) {
        assert_eq!(
            resolve_effective_owner(&admin, id(supplied)),
            EffectiveOwner::Target(id(supplied))
        );
    }

    #[rstest]
    #[case(42)]
    #[case(7)]
    #[case(999)]
    fn users_always_act_on_themselves(user: RequestContext, #[case] supplied: i64) {
        let effective = resolve_effective_owner(&user, id(supplied));

        let EffectiveOwner::Caller(session) = &effective else {
            panic!("tenant callers must resolve to their own session");
        };
        assert_eq!(session.subject().as_str(), "user-42");
        assert_eq!(Some(session.token()), user.access_token());
        assert_eq!(
            effective.owner_key(),
            OwnerKey::from(SubjectId::new("user-42").expect("subject"))
        );
    }

    #[rstest]
    fn backend_selection_matches_route_and_owner_resolution(
        admin: RequestContext,
        user: RequestContext,
    ) {
        for ctx in [admin, user] {
            let expected = select_backend(ctx.role());
            let routed = match select_route(&ctx) {
                Route::Privileged(_) => scope_backend::<PrivilegedAccess>(),
                Route::Tenant(_) => scope_backend::<TenantSession>(),
            };
            assert_eq!(routed, expected);
            for supplied in [1, 42, 999] {
                assert_eq!(resolve_effective_owner(&ctx, id(supplied)).backend(), expected);
            }
        }
    }

    #[rstest]
    #[case(StoreError::configuration("missing url"), crate::domain::ErrorCode::ServiceUnavailable)]
    #[case(StoreError::connection("refused"), crate::domain::ErrorCode::ServiceUnavailable)]
    #[case(StoreError::rejected("jwt expired"), crate::domain::ErrorCode::Unauthorized)]
    #[case(StoreError::query("constraint"), crate::domain::ErrorCode::InternalError)]
    fn routing_errors_classify_by_source(
        #[case] source: StoreError,
        #[case] expected: crate::domain::ErrorCode,
    ) {
        let error = RoutingError::new("get_user_goals", BackendKind::Tenant, source);
        assert_eq!(error.to_string(), "database operation failed: get_user_goals");

        let domain = DomainError::from(error);
        assert_eq!(domain.code(), expected);
        assert_eq!(
            domain.details().and_then(|d| d.get("operation")),
            Some(&json!("get_user_goals"))
        );
    }

    #[rstest]
    fn finish_tags_failures_with_the_operation() {
        let outcome: Result<bool, StoreError> = Err(StoreError::query("boom"));
        let error = finish("mark_notification_as_read", BackendKind::Privileged, outcome)
            .expect_err("failure propagates");

        assert_eq!(error.operation(), "mark_notification_as_read");
        assert_eq!(error.backend(), BackendKind::Privileged);
        assert_eq!(error.store_error(), &StoreError::query("boom"));
    }
}
