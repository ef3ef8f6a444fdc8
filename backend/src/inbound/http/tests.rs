//! Endpoint tests over the in-memory stores.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::state::HttpState;
use super::{API_V1, configure_api};
use crate::domain::ports::StoreError;
use crate::domain::routing::RoutingFacade;
use crate::domain::{IdentityResolver, NumericUserId, Role, SubjectId};
use crate::test_support::{InMemoryPrivilegedStore, InMemoryTenantStore, StaticIdentityProvider};

const USER_TOKEN: &str = "jwt-42";
const ADMIN_TOKEN: &str = "admin-jwt";

struct Harness {
    privileged: Arc<InMemoryPrivilegedStore>,
    tenant: Arc<InMemoryTenantStore>,
    state: HttpState,
}

fn subject(value: &str) -> SubjectId {
    SubjectId::new(value).expect("subject")
}

fn id(value: i64) -> NumericUserId {
    NumericUserId::new(value).expect("id")
}

#[fixture]
fn harness() -> Harness {
    let privileged = Arc::new(InMemoryPrivilegedStore::new());
    let tenant = Arc::new(InMemoryTenantStore::new());
    tenant.register_credential(USER_TOKEN, subject("user-42"));
    let provider = Arc::new(
        StaticIdentityProvider::default()
            .with_user(USER_TOKEN, subject("user-42"), id(42), Role::User)
            .with_user(ADMIN_TOKEN, subject("admin-1"), id(1), Role::Admin),
    );
    let state = HttpState::new(
        RoutingFacade::new(privileged.clone(), tenant.clone()),
        IdentityResolver::new(provider.clone(), provider),
    );
    Harness {
        privileged,
        tenant,
        state,
    }
}

async fn send(
    harness: &Harness,
    request: actix_test::TestRequest,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(harness.state.clone()))
            .service(web::scope(API_V1).configure(configure_api)),
    )
    .await;
    let with_auth = match token {
        Some(value) => request.insert_header((AUTHORIZATION, format!("Bearer {value}"))),
        None => request,
    };
    let response = actix_test::call_service(&app, with_auth.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn get(uri: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::get().uri(uri)
}

fn post(uri: &str, body: &Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri(uri).set_json(body)
}

#[rstest]
#[actix_web::test]
async fn anonymous_requests_are_unauthorised(harness: Harness) {
    let (status, body) = send(&harness, get("/api/v1/goals"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(harness.tenant.call_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn tenant_creates_are_stamped_with_the_caller(harness: Harness) {
    let body = json!({ "name": "Rent", "type": "expense", "userId": 7 });

    let (status, created) = send(
        &harness,
        post("/api/v1/budget/categories", &body),
        Some(USER_TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["userId"], "user-42");
    assert_eq!(created["name"], "Rent");
    assert_eq!(created["type"], "expense");
    assert_eq!(harness.privileged.call_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn tenant_reads_ignore_the_supplied_owner(harness: Harness) {
    let body = json!({ "name": "Groceries", "type": "expense" });
    send(&harness, post("/api/v1/budget/categories", &body), Some(USER_TOKEN)).await;

    let (status, listed) = send(
        &harness,
        get("/api/v1/budget/categories?userId=999"),
        Some(USER_TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = listed.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.first().map(|row| &row["userId"]), Some(&json!("user-42")));
}

#[rstest]
#[actix_web::test]
async fn admins_act_on_the_named_owner(harness: Harness) {
    let body = json!({ "name": "Trip", "goalType": "savings", "targetAmountCents": 200000, "userId": 7 });
    let (status, created) = send(&harness, post("/api/v1/goals", &body), Some(ADMIN_TOKEN)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["userId"], "7");

    let (_, for_seven) = send(&harness, get("/api/v1/goals?userId=7"), Some(ADMIN_TOKEN)).await;
    let (_, for_self) = send(&harness, get("/api/v1/goals"), Some(ADMIN_TOKEN)).await;

    assert_eq!(for_seven.as_array().map(Vec::len), Some(1));
    assert_eq!(for_self.as_array().map(Vec::len), Some(0));
    assert_eq!(harness.tenant.call_count(), 0);
}

#[rstest]
#[case("/api/v1/debts", 1)]
#[case("/api/v1/debts?includeInactive=true", 2)]
#[actix_web::test]
async fn debt_listing_hides_inactive_by_default(
    harness: Harness,
    #[case] uri: &str,
    #[case] expected: usize,
) {
    let ctx = crate::domain::RequestContext::admin(subject("admin-1"), id(1));
    let adapters = harness.state.adapters(ctx);
    for status in ["active", "paid_off"] {
        let draft = serde_json::from_value(json!({
            "name": "Card",
            "debtType": "credit_card",
            "originalBalanceCents": 100_000,
            "currentBalanceCents": 50_000,
            "interestRateBps": 1875,
            "minimumPaymentCents": 2_500,
            "status": status,
        }))
        .expect("debt draft");
        adapters
            .debt
            .add_debt(&crate::domain::records::OwnedDraft::new(id(1), draft))
            .await
            .expect("debt stored");
    }

    let (status, listed) = send(&harness, get(uri), Some(ADMIN_TOKEN)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(expected));
}

#[rstest]
#[actix_web::test]
async fn unread_count_is_wrapped_in_an_object(harness: Harness) {
    let (status, body) = send(
        &harness,
        get("/api/v1/notifications/unread-count"),
        Some(USER_TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "count": 0 }));
}

#[rstest]
#[actix_web::test]
async fn store_outages_surface_as_service_unavailable(harness: Harness) {
    harness
        .tenant
        .fail_next(StoreError::connection("connection refused"));

    let (status, body) = send(&harness, get("/api/v1/goals"), Some(USER_TOKEN)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "database operation failed: get_user_goals");
    assert_eq!(body["details"]["backend"], "tenant");
}

#[rstest]
#[actix_web::test]
async fn malformed_payloads_are_rejected_before_routing(harness: Harness) {
    let body = json!({ "name": "Rent", "type": "sideways" });

    let (status, _) = send(
        &harness,
        post("/api/v1/budget/categories", &body),
        Some(USER_TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(harness.tenant.call_count(), 0);
}
