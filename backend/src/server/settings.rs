//! Process settings loaded via OrthoConfig.
//!
//! Every backend setting is optional. A missing value is only reported when
//! a request first needs that backend.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// A setting that is present but cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid setting {name}: {message}")]
pub struct SettingsError {
    name: &'static str,
    message: String,
}

impl SettingsError {
    fn new(name: &'static str, message: impl ToString) -> Self {
        Self {
            name,
            message: message.to_string(),
        }
    }
}

/// Configuration values for the routing server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ASSISTANT")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Connection string for the privileged store.
    pub privileged_database_url: Option<String>,
    /// Upper bound on pooled privileged connections.
    pub privileged_pool_max_size: Option<u32>,
    /// Base URL of the tenant store's REST endpoint.
    pub tenant_rest_url: Option<String>,
    /// Anonymous API key sent alongside forwarded credentials.
    pub tenant_anon_key: Option<String>,
    /// Base URL of the identity provider.
    pub identity_url: Option<String>,
    /// Timeout applied to outbound HTTP calls and pool checkouts.
    pub request_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Address to bind, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|err| SettingsError::new("bind_addr", err))
    }

    /// Configured pool size, or ten connections.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.privileged_pool_max_size
            .unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Outbound timeout, ten seconds unless configured.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Parsed tenant REST URL, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the value is not an absolute URL.
    pub fn tenant_rest_url(&self) -> Result<Option<Url>, SettingsError> {
        parse_url("tenant_rest_url", self.tenant_rest_url.as_deref())
    }

    /// Parsed identity provider URL, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the value is not an absolute URL.
    pub fn identity_url(&self) -> Result<Option<Url>, SettingsError> {
        parse_url("identity_url", self.identity_url.as_deref())
    }
}

fn parse_url(name: &'static str, raw: Option<&str>) -> Result<Option<Url>, SettingsError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| Url::parse(value).map_err(|err| SettingsError::new(name, err)))
        .transpose()
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "ASSISTANT_BIND_ADDR",
        "ASSISTANT_PRIVILEGED_DATABASE_URL",
        "ASSISTANT_PRIVILEGED_POOL_MAX_SIZE",
        "ASSISTANT_TENANT_REST_URL",
        "ASSISTANT_TENANT_ANON_KEY",
        "ASSISTANT_IDENTITY_URL",
        "ASSISTANT_REQUEST_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert!(settings.privileged_database_url.is_none());
        assert_eq!(settings.tenant_rest_url(), Ok(None));
        assert_eq!(settings.identity_url(), Ok(None));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("ASSISTANT_BIND_ADDR", "127.0.0.1:9000"),
            (
                "ASSISTANT_PRIVILEGED_DATABASE_URL",
                "postgres://localhost/assistant",
            ),
            ("ASSISTANT_PRIVILEGED_POOL_MAX_SIZE", "4"),
            ("ASSISTANT_TENANT_REST_URL", "https://tenant.example/rest/v1"),
            ("ASSISTANT_TENANT_ANON_KEY", "anon"),
            ("ASSISTANT_IDENTITY_URL", "https://tenant.example/auth/v1"),
            ("ASSISTANT_REQUEST_TIMEOUT_SECS", "3"),
        ]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9000)))
        );
        assert_eq!(settings.pool_max_size(), 4);
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
        assert_eq!(settings.tenant_anon_key.as_deref(), Some("anon"));
        assert_eq!(
            settings
                .tenant_rest_url()
                .ok()
                .flatten()
                .map(|url| url.path().to_owned()),
            Some("/rest/v1".to_owned())
        );
        assert!(settings.identity_url().ok().flatten().is_some());
    }

    #[rstest]
    #[case("ASSISTANT_BIND_ADDR", "not-an-address")]
    #[case("ASSISTANT_TENANT_REST_URL", "relative/path")]
    #[case("ASSISTANT_IDENTITY_URL", "::")]
    fn malformed_values_are_reported(#[case] name: &str, #[case] value: &str) {
        let _guard = lock_env(env_with(&[(name, value)]));

        let settings = load_from_empty_args();
        let failed = settings.bind_addr().is_err()
            || settings.tenant_rest_url().is_err()
            || settings.identity_url().is_err();

        assert!(failed);
    }

    #[rstest]
    fn blank_urls_count_as_absent() {
        let _guard = lock_env(env_with(&[("ASSISTANT_TENANT_REST_URL", "   ")]));

        assert_eq!(load_from_empty_args().tenant_rest_url(), Ok(None));
    }
}
