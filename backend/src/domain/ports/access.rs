//! Access scopes: proof of which store a call is allowed to reach.
//!
//! Every store operation takes an access scope as its first argument.
//! [`PrivilegedAccess`] can only be minted inside this crate by the routing
//! facade, so nothing outside the router can reach the privileged store.
//! [`TenantSession`] bundles the caller's subject with the credential that
//! the tenant store's row-level policies evaluate.

use std::fmt;

use serde::Serialize;

use crate::domain::context::TenantIdentity;
use crate::domain::identity::{AccessToken, NumericUserId, OwnerKey, SubjectId};
use crate::domain::records::Stored;

/// Which physical store served a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Backend A.
    Privileged,
    /// Backend B.
    Tenant,
}

impl BackendKind {
    /// Stable label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Privileged => "privileged",
            Self::Tenant => "tenant",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability handed to store adapters for one call.
pub trait AccessScope: Send + Sync + 'static {
    /// Owner key representation used by the store.
    type Owner: Clone + PartialEq + fmt::Debug + Into<OwnerKey> + Send + Sync + 'static;

    /// Store this scope grants access to.
    const BACKEND: BackendKind;
}

/// A record in the owner representation of scope `S`.
pub type Owned<T, S> = Stored<T, <S as AccessScope>::Owner>;

/// Unrestricted access to the privileged store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivilegedAccess {
    _granted: (),
}

impl PrivilegedAccess {
    pub(crate) const fn grant() -> Self {
        Self { _granted: () }
    }
}

impl AccessScope for PrivilegedAccess {
    type Owner = NumericUserId;

    const BACKEND: BackendKind = BackendKind::Privileged;
}

/// Per-call tenant credential and the subject it authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantSession {
    subject: SubjectId,
    token: AccessToken,
}

impl TenantSession {
    pub(crate) fn for_identity(identity: &TenantIdentity) -> Self {
        Self {
            subject: identity.subject().clone(),
            token: identity.token().clone(),
        }
    }

    /// Subject the credential authenticates.
    #[must_use]
    pub const fn subject(&self) -> &SubjectId {
        &self.subject
    }

    /// Credential to forward.
    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }
}

impl AccessScope for TenantSession {
    type Owner = SubjectId;

    const BACKEND: BackendKind = BackendKind::Tenant;
}
