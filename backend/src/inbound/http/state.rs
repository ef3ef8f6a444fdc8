//! Shared HTTP adapter state.
//!
//! Handlers and extractors reach the routing facade and the identity
//! resolver through `web::Data<HttpState>`, so they depend on domain types
//! only and stay testable with in-memory stores.

use crate::domain::IdentityResolver;
use crate::domain::adapters::Adapters;
use crate::domain::context::RequestContext;
use crate::domain::routing::RoutingFacade;

/// Dependency bundle for HTTP handlers.
#[derive(Debug, Clone)]
pub struct HttpState {
    facade: RoutingFacade,
    resolver: IdentityResolver,
}

impl HttpState {
    /// Bundle the facade and resolver.
    #[must_use]
    pub const fn new(facade: RoutingFacade, resolver: IdentityResolver) -> Self {
        Self { facade, resolver }
    }

    /// Resolver used by the request extractors.
    #[must_use]
    pub const fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    /// Bind every domain adapter to `ctx`.
    #[must_use]
    pub fn adapters(&self, ctx: RequestContext) -> Adapters {
        Adapters::for_context(&self.facade, ctx)
    }
}
