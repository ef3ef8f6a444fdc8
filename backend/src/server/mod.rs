//! Server construction and middleware wiring.

mod settings;

pub use settings::{AppSettings, SettingsError};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use thiserror::Error;
use tracing::{info, warn};

use crate::Trace;
use crate::domain::IdentityResolver;
use crate::domain::routing::RoutingFacade;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{API_V1, configure_api};
use crate::outbound::identity::{HttpTokenVerifier, IdentityProviderConfig};
use crate::outbound::persistence::{
    DieselPrivilegedStore, DieselUserDirectory, LazyDbPool, PoolConfig,
};
use crate::outbound::tenant::{PostgrestConfig, PostgrestTenantStore};

/// Failures while assembling the server.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A configured value could not be parsed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// An outbound HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// Binding the listener failed.
    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// Wire both backends and the identity resolver from `settings`.
///
/// Nothing is contacted here. Unconfigured backends fail the first call that
/// needs them with a configuration error.
///
/// # Errors
///
/// Returns [`StartupError`] when a URL is malformed or an HTTP client cannot
/// be built.
pub fn build_http_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    let timeout = settings.request_timeout();

    let pool_config = settings.privileged_database_url.as_deref().map(|url| {
        PoolConfig::new(url)
            .with_max_size(settings.pool_max_size())
            .with_connection_timeout(timeout)
    });
    if pool_config.is_none() {
        warn!("no privileged database URL configured; admin requests will fail");
    }
    let pool = LazyDbPool::new(pool_config);

    let tenant_url = settings.tenant_rest_url()?;
    if tenant_url.is_none() {
        warn!("no tenant REST URL configured; user requests will fail");
    }
    let tenant = PostgrestTenantStore::new(
        PostgrestConfig::new(tenant_url, settings.tenant_anon_key.clone()).with_timeout(timeout),
    )?;

    let verifier = HttpTokenVerifier::new(
        IdentityProviderConfig::new(settings.identity_url()?, settings.tenant_anon_key.clone())
            .with_timeout(timeout),
    )?;

    let facade = RoutingFacade::new(
        Arc::new(DieselPrivilegedStore::new(pool.clone())),
        Arc::new(tenant),
    );
    let resolver = IdentityResolver::new(
        Arc::new(verifier),
        Arc::new(DieselUserDirectory::new(pool)),
    );
    Ok(HttpState::new(facade, resolver))
}

/// Application with tracing, the versioned API and the health probes.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope(API_V1).configure(configure_api))
        .service(ready)
        .service(live)
}

/// Construct the HTTP server from loaded settings.
///
/// The returned [`Server`] must be awaited to drive the listener. Readiness
/// is marked once the socket is bound.
///
/// # Errors
///
/// Returns [`StartupError`] when settings are malformed or binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &AppSettings,
) -> Result<Server, StartupError> {
    let bind_addr = settings.bind_addr()?;
    let http_state = web::Data::new(build_http_state(settings)?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;

    fn unconfigured() -> AppSettings {
        AppSettings {
            bind_addr: None,
            privileged_database_url: None,
            privileged_pool_max_size: None,
            tenant_rest_url: None,
            tenant_anon_key: None,
            identity_url: None,
            request_timeout_secs: None,
        }
    }

    #[rstest]
    fn unconfigured_backends_still_build() {
        assert!(build_http_state(&unconfigured()).is_ok());
    }

    #[rstest]
    fn malformed_urls_fail_startup() {
        let settings = AppSettings {
            tenant_rest_url: Some("not a url".to_owned()),
            ..unconfigured()
        };

        assert!(matches!(
            build_http_state(&settings),
            Err(StartupError::Settings(_))
        ));
    }

    #[rstest]
    #[actix_web::test]
    async fn app_serves_probes_and_guards_the_api() {
        let state = build_http_state(&unconfigured()).expect("state");
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let app = actix_test::init_service(build_app(health, web::Data::new(state))).await;

        let probe =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        let api =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/v1/goals").to_request())
                .await;

        assert_eq!(probe.status(), StatusCode::OK);
        assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
        assert!(api.headers().contains_key("trace-id"));
    }
}
