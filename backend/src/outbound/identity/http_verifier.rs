//! Reqwest-backed bearer credential verification.
//!
//! Asks the identity provider who a credential belongs to by calling its
//! `user` endpoint with the credential itself. A refused credential is a
//! normal outcome (`None`), not an error.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::domain::identity::{AccessToken, SubjectId};
use crate::domain::ports::{IdentityError, TokenVerifier};

const USER_PATH_SEGMENT: &str = "user";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Identity provider endpoint settings.
#[derive(Clone)]
pub struct IdentityProviderConfig {
    base_url: Option<Url>,
    anon_key: Option<String>,
    timeout: Duration,
}

impl IdentityProviderConfig {
    /// Settings with a 5 s timeout. A missing URL makes every verification
    /// fail with a connection error.
    pub fn new(base_url: Option<Url>, anon_key: Option<String>) -> Self {
        Self {
            base_url,
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

impl fmt::Debug for IdentityProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityProviderConfig")
            .field("base_url", &self.base_url)
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct UserDto {
    id: String,
}

/// Verifies credentials against the identity provider over HTTP.
#[derive(Clone)]
pub struct HttpTokenVerifier {
    client: Client,
    user_url: Option<Url>,
    anon_key: Option<String>,
}

impl HttpTokenVerifier {
    /// Build the verifier and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: IdentityProviderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            user_url: config.base_url.and_then(user_endpoint),
            anon_key: config.anon_key,
        })
    }
}

impl fmt::Debug for HttpTokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTokenVerifier")
            .field("user_url", &self.user_url.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn verify(&self, token: &AccessToken) -> Result<Option<SubjectId>, IdentityError> {
        let url = self
            .user_url
            .clone()
            .ok_or_else(|| IdentityError::connection("identity provider URL is not configured"))?;
        let mut request = self
            .client
            .get(url)
            .bearer_auth(token.expose())
            .header(ACCEPT, "application/json");
        if let Some(anon_key) = &self.anon_key {
            request = request.header("apikey", anon_key.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|error| IdentityError::connection(error.to_string()))?;
        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            debug!(
                token = %token.fingerprint(),
                status = status.as_u16(),
                "identity provider refused credential"
            );
            return Ok(None);
        }
        let body = response
            .bytes()
            .await
            .map_err(|error| IdentityError::connection(error.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        parse_subject(body.as_ref()).map(Some)
    }
}

fn user_endpoint(mut base: Url) -> Option<Url> {
    base.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(USER_PATH_SEGMENT);
    Some(base)
}

fn map_status_error(status: StatusCode) -> IdentityError {
    let message = format!("status {}", status.as_u16());
    if status.is_client_error() {
        IdentityError::rejected(message)
    } else {
        IdentityError::connection(message)
    }
}

fn parse_subject(body: &[u8]) -> Result<SubjectId, IdentityError> {
    let user: UserDto = serde_json::from_slice(body)
        .map_err(|error| IdentityError::decode(format!("invalid user payload: {error}")))?;
    SubjectId::new(user.id).map_err(|error| IdentityError::decode(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://auth.example/auth/v1", "https://auth.example/auth/v1/user")]
    #[case("https://auth.example/auth/v1/", "https://auth.example/auth/v1/user")]
    fn user_endpoint_appends_one_segment(#[case] base: &str, #[case] expected: &str) {
        let url = user_endpoint(Url::parse(base).expect("url")).expect("base URL");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn parses_subject_from_user_payload() {
        let subject = parse_subject(br#"{"id":"user-42","email":"a@example.com"}"#)
            .expect("payload decodes");
        assert_eq!(subject.as_str(), "user-42");
    }

    #[rstest]
    #[case::not_json(b"<html>".as_slice())]
    #[case::missing_id(br#"{"email":"a@example.com"}"#.as_slice())]
    #[case::blank_id(br#"{"id":"  "}"#.as_slice())]
    fn malformed_payloads_are_decode_errors(#[case] body: &[u8]) {
        assert!(matches!(parse_subject(body), Err(IdentityError::Decode { .. })));
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, true)]
    #[case(StatusCode::BAD_GATEWAY, false)]
    fn unexpected_statuses_are_classified(#[case] status: StatusCode, #[case] rejected: bool) {
        let error = map_status_error(status);
        assert_eq!(matches!(error, IdentityError::Rejected { .. }), rejected);
    }

    #[rstest]
    #[tokio::test]
    async fn unconfigured_verifier_reports_connection_error() {
        let verifier = HttpTokenVerifier::new(IdentityProviderConfig::new(None, None))
            .expect("client builds");
        let token = AccessToken::new("token").expect("token");

        let error = verifier.verify(&token).await.expect_err("must fail");
        assert!(matches!(error, IdentityError::Connection { .. }));
    }
}
