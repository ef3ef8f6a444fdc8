//! Request context extractors.
//!
//! [`MaybeContext`] resolves the caller for public endpoints and never
//! fails. [`Authenticated`] is used by protected endpoints and answers
//! `401 Unauthorized` when no descriptor can be formed. Both read the bearer
//! credential from the `Authorization` header and resolve it through the
//! [`IdentityResolver`](crate::domain::IdentityResolver) held in
//! [`HttpState`].

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::error;

use crate::domain::adapters::Adapters;
use crate::domain::context::RequestContext;
use crate::domain::{AccessToken, DomainError, NumericUserId};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Bearer credential carried by `req`, if any.
///
/// The scheme is matched case-insensitively and the token is trimmed; an
/// empty token counts as absent.
#[must_use]
pub fn bearer_token(req: &HttpRequest) -> Option<AccessToken> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    AccessToken::new(token).ok()
}

fn http_state(req: &HttpRequest) -> Result<web::Data<HttpState>, DomainError> {
    req.app_data::<web::Data<HttpState>>().cloned().ok_or_else(|| {
        error!("HttpState is not registered as application data");
        DomainError::internal("request context is unavailable")
    })
}

/// Resolved caller for endpoints that also serve anonymous requests.
#[derive(Debug, Clone)]
pub struct MaybeContext(pub Option<RequestContext>);

impl FromRequest for MaybeContext {
    type Error = DomainError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let lookup = http_state(req);
        Box::pin(async move {
            let state = lookup?;
            Ok(Self(state.resolver().resolve(token).await))
        })
    }
}

/// Resolved caller for protected endpoints.
#[derive(Debug, Clone)]
pub struct Authenticated {
    adapters: Adapters,
}

impl Authenticated {
    /// Domain adapters bound to the caller.
    #[must_use]
    pub const fn adapters(&self) -> &Adapters {
        &self.adapters
    }

    /// The caller's descriptor.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        self.adapters.context()
    }

    /// Owner a request names, defaulting to the caller's own numeric id.
    #[must_use]
    pub fn target(&self, supplied: Option<NumericUserId>) -> NumericUserId {
        supplied.unwrap_or_else(|| self.context().numeric_id())
    }
}

impl FromRequest for Authenticated {
    type Error = DomainError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let lookup = http_state(req);
        Box::pin(async move {
            let state = lookup?;
            let ctx = state
                .resolver()
                .resolve(token)
                .await
                .ok_or_else(|| DomainError::unauthorized("authentication required"))?;
            Ok(Self {
                adapters: state.adapters(ctx),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::routing::RoutingFacade;
    use crate::domain::{IdentityResolver, Role, SubjectId};
    use crate::test_support::{InMemoryPrivilegedStore, InMemoryTenantStore, StaticIdentityProvider};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;

    fn state() -> HttpState {
        let provider = Arc::new(
            StaticIdentityProvider::default()
                .with_user(
                    "jwt-42",
                    SubjectId::new("user-42").expect("subject"),
                    NumericUserId::new(42).expect("id"),
                    Role::User,
                )
                .with_user(
                    "admin-jwt",
                    SubjectId::new("admin-1").expect("subject"),
                    NumericUserId::new(1).expect("id"),
                    Role::Admin,
                ),
        );
        HttpState::new(
            RoutingFacade::new(
                Arc::new(InMemoryPrivilegedStore::new()),
                Arc::new(InMemoryTenantStore::new()),
            ),
            IdentityResolver::new(provider.clone(), provider),
        )
    }

    async fn describe_maybe(maybe: MaybeContext) -> HttpResponse {
        match maybe.0 {
            Some(ctx) => HttpResponse::Ok().body(format!("{}:{}", ctx.role(), ctx.subject())),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    async fn describe_authenticated(auth: Authenticated) -> HttpResponse {
        HttpResponse::Ok().body(auth.context().numeric_id().to_string())
    }

    async fn call(uri: &str, authorization: Option<&str>) -> (StatusCode, String) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .route("/maybe", web::get().to(describe_maybe))
                .route("/protected", web::get().to(describe_authenticated)),
        )
        .await;
        let mut req = actix_test::TestRequest::get().uri(uri);
        if let Some(value) = authorization {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let res = actix_test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body = actix_test::read_body(res).await;
        (status, String::from_utf8(body.to_vec()).expect("utf8 body"))
    }

    #[rstest]
    #[case("Bearer jwt-42", Some("jwt-42"))]
    #[case("bearer   jwt-42  ", Some("jwt-42"))]
    #[case("BEARER jwt-42", Some("jwt-42"))]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("Bearer    ", None)]
    #[case("Bearer", None)]
    fn bearer_tokens_are_extracted(#[case] header: &str, #[case] expected: Option<&str>) {
        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, header))
            .to_http_request();

        let token = bearer_token(&req);

        assert_eq!(token.as_ref().map(AccessToken::expose), expected);
    }

    #[rstest]
    fn missing_header_yields_no_token() {
        let req = actix_test::TestRequest::default().to_http_request();
        assert!(bearer_token(&req).is_none());
    }

    #[rstest]
    #[case(None, "anonymous")]
    #[case(Some("Bearer unknown"), "anonymous")]
    #[case(Some("Bearer jwt-42"), "user:user-42")]
    #[case(Some("Bearer admin-jwt"), "admin:admin-1")]
    #[actix_web::test]
    async fn maybe_context_never_fails(#[case] header: Option<&str>, #[case] expected: &str) {
        let (status, body) = call("/maybe", header).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Bearer unknown"))]
    #[actix_web::test]
    async fn authenticated_rejects_anonymous_callers(#[case] header: Option<&str>) {
        let (status, body) = call("/protected", header).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("authentication required"));
    }

    #[rstest]
    #[actix_web::test]
    async fn authenticated_binds_adapters_to_the_caller() {
        let (status, body) = call("/protected", Some("Bearer jwt-42")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_state_is_an_internal_error() {
        let app =
            actix_test::init_service(App::new().route("/maybe", web::get().to(describe_maybe))).await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/maybe").to_request())
            .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
