//! Reqwest transport for the tenant REST endpoint.
//!
//! Every call forwards the caller's bearer credential together with the
//! project's anonymous API key, so the store's row-level policies decide
//! which rows are visible. The adapter holds no credential of its own that
//! could widen that view.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_RANGE, HeaderMap};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{StoreError, StoreResult, TenantSession};

const API_KEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "Prefer";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the tenant store.
#[derive(Clone)]
pub struct PostgrestConfig {
    rest_url: Option<Url>,
    anon_key: Option<String>,
    timeout: Duration,
}

impl PostgrestConfig {
    /// Settings with a 10 s request timeout. Either value may be absent; the
    /// store then fails each call with a configuration error.
    pub fn new(rest_url: Option<Url>, anon_key: Option<String>) -> Self {
        Self {
            rest_url,
            anon_key,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for PostgrestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgrestConfig")
            .field("rest_url", &self.rest_url)
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

struct Endpoint {
    rest_url: Url,
    anon_key: String,
}

impl Endpoint {
    fn table_url(&self, table: &str) -> StoreResult<Url> {
        let mut url = self.rest_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::configuration("tenant REST URL cannot be a base"))?
            .pop_if_empty()
            .push(table);
        Ok(url)
    }
}

/// Tenant store speaking the PostgREST dialect over HTTP.
#[derive(Clone)]
pub struct PostgrestTenantStore {
    client: Client,
    endpoint: Option<Arc<Endpoint>>,
}

impl PostgrestTenantStore {
    /// Build the store and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: PostgrestConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = match (config.rest_url, config.anon_key) {
            (Some(rest_url), Some(anon_key)) => Some(Arc::new(Endpoint { rest_url, anon_key })),
            _ => None,
        };
        Ok(Self { client, endpoint })
    }

    /// Whether both the URL and the API key are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    fn endpoint(&self) -> StoreResult<&Endpoint> {
        self.endpoint
            .as_deref()
            .ok_or_else(|| StoreError::configuration("tenant REST URL or API key is not configured"))
    }

    fn request(
        &self,
        method: Method,
        session: &TenantSession,
        table: &str,
        query: &Query,
    ) -> StoreResult<RequestBuilder> {
        let endpoint = self.endpoint()?;
        let url = endpoint.table_url(table)?;
        debug!(%method, table, "tenant store request");
        Ok(self
            .client
            .request(method, url)
            .header(API_KEY_HEADER, endpoint.anon_key.as_str())
            .bearer_auth(session.token().expose())
            .header(ACCEPT, "application/json")
            .query(query.params()))
    }

    async fn send(request: RequestBuilder) -> StoreResult<(HeaderMap, Vec<u8>)> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok((headers, body.to_vec()))
    }

    /// Rows of `table` visible to the session and matching `query`.
    pub(super) async fn select<R: DeserializeOwned>(
        &self,
        session: &TenantSession,
        table: &str,
        query: &Query,
    ) -> StoreResult<Vec<R>> {
        let request = self.request(Method::GET, session, table, query)?;
        let (_, body) = Self::send(request).await?;
        decode(&body)
    }

    /// First visible row matching `query`.
    pub(super) async fn select_one<R: DeserializeOwned>(
        &self,
        session: &TenantSession,
        table: &str,
        query: Query,
    ) -> StoreResult<Option<R>> {
        let rows = self.select(session, table, &query.limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one row and return it as stored.
    pub(super) async fn insert<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        session: &TenantSession,
        table: &str,
        body: &B,
    ) -> StoreResult<R> {
        let request = self
            .request(Method::POST, session, table, &Query::new())?
            .header(PREFER_HEADER, "return=representation")
            .json(body);
        let (_, response) = Self::send(request).await?;
        decode::<Vec<R>>(&response)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::decode("insert returned no row"))
    }

    /// Update matching rows and return them as stored.
    pub(super) async fn update<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        session: &TenantSession,
        table: &str,
        query: &Query,
        body: &B,
    ) -> StoreResult<Vec<R>> {
        let request = self
            .request(Method::PATCH, session, table, query)?
            .header(PREFER_HEADER, "return=representation")
            .json(body);
        let (_, response) = Self::send(request).await?;
        decode(&response)
    }

    /// Delete matching rows.
    pub(super) async fn delete(
        &self,
        session: &TenantSession,
        table: &str,
        query: &Query,
    ) -> StoreResult<()> {
        let request = self
            .request(Method::DELETE, session, table, query)?
            .header(PREFER_HEADER, "return=minimal");
        Self::send(request).await.map(|_| ())
    }

    /// Number of matching rows, read from the `Content-Range` header.
    pub(super) async fn count(
        &self,
        session: &TenantSession,
        table: &str,
        query: &Query,
    ) -> StoreResult<u64> {
        let request = self
            .request(Method::HEAD, session, table, query)?
            .header(PREFER_HEADER, "count=exact");
        let (headers, _) = Self::send(request).await?;
        headers
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| StoreError::decode("count response carried no total"))
    }
}

impl fmt::Debug for PostgrestTenantStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgrestTenantStore")
            .field(
                "rest_url",
                &self.endpoint.as_ref().map(|endpoint| endpoint.rest_url.as_str()),
            )
            .finish_non_exhaustive()
    }
}

/// Horizontal filters, ordering and limits in PostgREST query syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn eq(mut self, column: &'static str, value: impl fmt::Display) -> Self {
        self.params.push((column, format!("eq.{value}")));
        self
    }

    pub(super) fn gte(mut self, column: &'static str, value: chrono::DateTime<chrono::Utc>) -> Self {
        self.params.push((column, format!("gte.{}", value.to_rfc3339())));
        self
    }

    pub(super) fn lte(mut self, column: &'static str, value: chrono::DateTime<chrono::Utc>) -> Self {
        self.params.push((column, format!("lte.{}", value.to_rfc3339())));
        self
    }

    /// Restrict to rows owned by `owner`.
    pub(super) fn owned_by(self, owner: &SubjectId) -> Self {
        self.eq("user_id", owner)
    }

    pub(super) fn order(mut self, spec: &'static str) -> Self {
        self.params.push(("order", spec.to_owned()));
        self
    }

    pub(super) fn limit(mut self, limit: impl fmt::Display) -> Self {
        self.params.push(("limit", limit.to_string()));
        self
    }

    fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> StoreResult<T> {
    serde_json::from_slice(body)
        .map_err(|error| StoreError::decode(format!("invalid tenant store payload: {error}")))
}

fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

fn map_transport_error(error: reqwest::Error) -> StoreError {
    StoreError::connection(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StoreError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::rejected(message),
        _ if status.is_client_error() => StoreError::query(message),
        _ => StoreError::connection(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network transport helpers.

    use super::*;
    use crate::domain::identity::{AccessToken, NumericUserId};
    use crate::domain::{Principal, RequestContext};
    use rstest::rstest;

    fn session() -> TenantSession {
        let ctx = RequestContext::user(
            SubjectId::new("user-42").expect("subject"),
            NumericUserId::new(42).expect("id"),
            AccessToken::new("token-42").expect("token"),
        );
        match ctx.principal() {
            Principal::User(identity) => TenantSession::for_identity(identity),
            Principal::Admin(_) => panic!("expected a user context"),
        }
    }

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, "Rejected")]
    #[case::forbidden(StatusCode::FORBIDDEN, "Rejected")]
    #[case::bad_request(StatusCode::BAD_REQUEST, "Query")]
    #[case::conflict(StatusCode::CONFLICT, "Query")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Connection")]
    #[case::unavailable(StatusCode::SERVICE_UNAVAILABLE, "Connection")]
    fn maps_http_statuses_to_store_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, br#"{"message":"permission denied"}"#);
        let matched = match expected {
            "Rejected" => matches!(error, StoreError::Rejected { .. }),
            "Query" => matches!(error, StoreError::Query { .. }),
            "Connection" => matches!(error, StoreError::Connection { .. }),
            _ => false,
        };
        assert!(matched, "{status} should map to {expected}, got {error:?}");
    }

    #[rstest]
    #[case("0-4/5", Some(5))]
    #[case("*/0", Some(0))]
    #[case("0-0/*", None)]
    #[case("garbage", None)]
    fn reads_totals_from_content_range(#[case] header: &str, #[case] total: Option<u64>) {
        assert_eq!(parse_content_range_total(header), total);
    }

    #[rstest]
    #[case("https://tenant.example/rest/v1")]
    #[case("https://tenant.example/rest/v1/")]
    fn table_urls_append_one_segment(#[case] base: &str) {
        let endpoint = Endpoint {
            rest_url: Url::parse(base).expect("url"),
            anon_key: "anon".to_owned(),
        };
        let url = endpoint.table_url("debts").expect("table url");
        assert_eq!(url.as_str(), "https://tenant.example/rest/v1/debts");
    }

    #[rstest]
    fn queries_use_postgrest_operators() {
        let owner = SubjectId::new("user-42").expect("subject");
        let query = Query::new()
            .owned_by(&owner)
            .eq("status", "active")
            .order("created_at.desc,id.desc")
            .limit(50);
        assert_eq!(
            query.params(),
            [
                ("user_id", "eq.user-42".to_owned()),
                ("status", "eq.active".to_owned()),
                ("order", "created_at.desc,id.desc".to_owned()),
                ("limit", "50".to_owned()),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn unconfigured_store_fails_with_configuration_error() {
        let store =
            PostgrestTenantStore::new(PostgrestConfig::new(None, None)).expect("client builds");
        assert!(!store.is_configured());

        let error = store
            .select::<serde_json::Value>(&session(), "debts", &Query::new())
            .await
            .expect_err("unconfigured store must fail");
        assert!(matches!(error, StoreError::Configuration { .. }));
    }

    #[rstest]
    fn debug_output_redacts_the_api_key() {
        let config = PostgrestConfig::new(
            Some(Url::parse("https://tenant.example/rest/v1").expect("url")),
            Some("very-secret".to_owned()),
        );
        assert!(!format!("{config:?}").contains("very-secret"));
    }
}
