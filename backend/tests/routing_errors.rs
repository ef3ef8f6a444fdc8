//! Failure propagation through the routing facade.

mod support;

use std::sync::Arc;

use assistant_backend::domain::ports::{BackendKind, StoreError};
use assistant_backend::domain::routing::RoutingFacade;
use assistant_backend::domain::{DomainError, ErrorCode};
use assistant_backend::outbound::persistence::{DieselPrivilegedStore, LazyDbPool};
use assistant_backend::outbound::tenant::{PostgrestConfig, PostgrestTenantStore};
use assistant_backend::test_support::{InMemoryPrivilegedStore, InMemoryTenantStore};
use rstest::{fixture, rstest};

use support::{World, admin, id, user};

#[fixture]
fn world() -> World {
    World::new()
}

#[rstest]
#[case::unavailable(StoreError::connection("connection refused"), ErrorCode::ServiceUnavailable)]
#[case::misconfigured(StoreError::configuration("no URL"), ErrorCode::ServiceUnavailable)]
#[case::rejected(StoreError::rejected("JWT expired"), ErrorCode::Unauthorized)]
#[case::query(StoreError::query("syntax error"), ErrorCode::InternalError)]
#[case::decode(StoreError::decode("unexpected column"), ErrorCode::InternalError)]
#[tokio::test]
async fn tenant_failures_carry_the_operation_name(
    world: World,
    #[case] failure: StoreError,
    #[case] code: ErrorCode,
) {
    world.tenant.fail_next(failure.clone());

    let err = world
        .adapters(world.user_a())
        .goals
        .get_user_goals(id(10))
        .await
        .expect_err("failure propagates");

    assert_eq!(err.operation(), "get_user_goals");
    assert_eq!(err.backend(), BackendKind::Tenant);
    assert_eq!(err.store_error(), &failure);
    assert_eq!(err.to_string(), "database operation failed: get_user_goals");
    assert_eq!(DomainError::from(err).code(), code);
}

#[rstest]
#[tokio::test]
async fn privileged_failures_are_tagged_with_their_backend(world: World) {
    world
        .privileged
        .fail_next(StoreError::query("duplicate key"));

    let err = world
        .adapters(admin())
        .notifications
        .get_unread_notification_count(id(3))
        .await
        .expect_err("failure propagates");

    assert_eq!(err.backend(), BackendKind::Privileged);
    assert_eq!(err.operation(), "get_unread_notification_count");
    assert_eq!(world.tenant.call_count(), 0);
}

#[rstest]
#[tokio::test]
async fn a_failure_does_not_poison_later_calls(world: World) {
    let adapters = world.adapters(world.user_a());
    world
        .tenant
        .fail_next(StoreError::connection("reset by peer"));

    let first = adapters.conversations.get_user_conversations(id(10), None).await;
    let second = adapters.conversations.get_user_conversations(id(10), None).await;

    assert!(first.is_err());
    assert_eq!(second.map(|rows| rows.len()), Ok(0));
}

#[rstest]
#[tokio::test]
async fn unrecognised_credentials_are_rejected_by_the_tenant_store(world: World) {
    let forged = user("user-a", 10, "forged-token");

    let err = world
        .adapters(forged)
        .budget
        .get_user_budget_categories(id(10), None)
        .await
        .expect_err("store rejects the credential");

    assert!(matches!(err.store_error(), StoreError::Rejected { .. }));
    assert_eq!(DomainError::from(err).code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn unconfigured_tenant_store_fails_only_tenant_calls() {
    let tenant = PostgrestTenantStore::new(PostgrestConfig::new(None, None))
        .expect("client builds without a URL");
    let facade = RoutingFacade::new(Arc::new(InMemoryPrivilegedStore::new()), Arc::new(tenant));
    let ctx_user = user("user-a", 10, support::USER_A_TOKEN);

    let tenant_result = facade.get_user_goals(&ctx_user, id(10)).await;
    let admin_result = facade.get_user_goals(&admin(), id(10)).await;

    let err = tenant_result.expect_err("no tenant URL");
    assert!(matches!(err.store_error(), StoreError::Configuration { .. }));
    assert_eq!(admin_result.map(|goals| goals.len()), Ok(0));
}

#[rstest]
#[tokio::test]
async fn unconfigured_privileged_store_fails_only_admin_calls(world: World) {
    let privileged = DieselPrivilegedStore::new(LazyDbPool::new(None));
    let tenant = Arc::new(InMemoryTenantStore::new());
    tenant.register_credential(support::USER_A_TOKEN, support::subject("user-a"));
    let facade = RoutingFacade::new(Arc::new(privileged), tenant);

    let admin_result = facade.get_user_debts(&admin(), id(5), false).await;
    let tenant_result = facade.get_user_debts(&world.user_a(), id(5), false).await;

    let err = admin_result.expect_err("no database URL");
    assert!(matches!(err.store_error(), StoreError::Configuration { .. }));
    let domain = DomainError::from(err);
    assert_eq!(domain.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(
        domain.details().and_then(|d| d.get("backend")).and_then(|b| b.as_str()),
        Some("privileged")
    );
    assert_eq!(tenant_result.map(|debts| debts.len()), Ok(0));
}
