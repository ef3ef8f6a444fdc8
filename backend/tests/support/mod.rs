//! Shared fixtures for routing integration tests.
//!
//! Builds a facade over the in-memory stores with a small cast of callers:
//! two regular users whose credentials the tenant store recognises and one
//! administrator.

use std::sync::Arc;

use assistant_backend::domain::adapters::Adapters;
use assistant_backend::domain::records::OwnedDraft;
use assistant_backend::domain::routing::RoutingFacade;
use assistant_backend::domain::{AccessToken, NumericUserId, RequestContext, SubjectId};
use assistant_backend::test_support::{InMemoryPrivilegedStore, InMemoryTenantStore};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const USER_A_TOKEN: &str = "jwt-user-a";
pub const USER_B_TOKEN: &str = "jwt-user-b";

pub fn subject(value: &str) -> SubjectId {
    SubjectId::new(value).expect("valid subject")
}

pub fn id(value: i64) -> NumericUserId {
    NumericUserId::new(value).expect("positive id")
}

pub fn user(name: &str, numeric_id: i64, token: &str) -> RequestContext {
    RequestContext::user(
        subject(name),
        id(numeric_id),
        AccessToken::new(token).expect("token"),
    )
}

pub fn admin() -> RequestContext {
    RequestContext::admin(subject("admin-1"), id(1))
}

/// Deserialize a draft from JSON, as the HTTP layer would.
pub fn draft<D: DeserializeOwned>(owner: i64, fields: Value) -> OwnedDraft<D> {
    OwnedDraft::new(
        id(owner),
        serde_json::from_value(fields).expect("draft fields"),
    )
}

pub struct World {
    pub privileged: Arc<InMemoryPrivilegedStore>,
    pub tenant: Arc<InMemoryTenantStore>,
    pub facade: RoutingFacade,
}

impl World {
    pub fn new() -> Self {
        let privileged = Arc::new(InMemoryPrivilegedStore::new());
        let tenant = Arc::new(InMemoryTenantStore::new());
        tenant.register_credential(USER_A_TOKEN, subject("user-a"));
        tenant.register_credential(USER_B_TOKEN, subject("user-b"));
        let facade = RoutingFacade::new(privileged.clone(), tenant.clone());
        Self {
            privileged,
            tenant,
            facade,
        }
    }

    pub fn user_a(&self) -> RequestContext {
        user("user-a", 10, USER_A_TOKEN)
    }

    pub fn user_b(&self) -> RequestContext {
        user("user-b", 20, USER_B_TOKEN)
    }

    pub fn adapters(&self, ctx: RequestContext) -> Adapters {
        Adapters::for_context(&self.facade, ctx)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
