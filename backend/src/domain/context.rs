//! Per-request identity descriptor threaded through the routing layer.
//!
//! A [`RequestContext`] is built once per inbound request, never mutated and
//! dropped when the request completes. The role is a closed variant: a
//! [`Principal::User`] always carries the bearer credential the tenant store
//! needs, while a [`Principal::Admin`] never carries one because the
//! privileged store trusts the server's own connection.

use super::identity::{AccessToken, NumericUserId, Role, SubjectId};

/// Administrative identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    subject: SubjectId,
    numeric_id: NumericUserId,
}

impl AdminIdentity {
    /// Identity-provider subject of the administrator.
    #[must_use]
    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    /// Privileged-store surrogate key of the administrator.
    #[must_use]
    pub const fn numeric_id(&self) -> NumericUserId {
        self.numeric_id
    }
}

/// Regular end-user identity together with its forwarded credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantIdentity {
    subject: SubjectId,
    numeric_id: NumericUserId,
    token: AccessToken,
}

impl TenantIdentity {
    /// Identity-provider subject; the owner key of every tenant row.
    #[must_use]
    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    /// Directory surrogate key, used to recognise the caller's own id.
    #[must_use]
    pub const fn numeric_id(&self) -> NumericUserId {
        self.numeric_id
    }

    /// Credential forwarded to the tenant store.
    #[must_use]
    pub fn token(&self) -> &AccessToken {
        &self.token
    }
}

/// Who is calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Served by the privileged store.
    Admin(AdminIdentity),
    /// Served by the tenant store with row-level security.
    User(TenantIdentity),
}

/// Immutable per-request context descriptor.
///
/// # Examples
/// ```
/// use assistant_backend::domain::{AccessToken, NumericUserId, RequestContext, Role, SubjectId};
///
/// let ctx = RequestContext::user(
///     SubjectId::new("user-42").expect("subject"),
///     NumericUserId::new(42).expect("id"),
///     AccessToken::new("jwt").expect("token"),
/// );
/// assert_eq!(ctx.role(), Role::User);
/// assert!(ctx.access_token().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    principal: Principal,
}

impl RequestContext {
    /// Descriptor for an administrative identity.
    #[must_use]
    pub const fn admin(subject: SubjectId, numeric_id: NumericUserId) -> Self {
        Self {
            principal: Principal::Admin(AdminIdentity {
                subject,
                numeric_id,
            }),
        }
    }

    /// Descriptor for a regular user holding a bearer credential.
    #[must_use]
    pub const fn user(subject: SubjectId, numeric_id: NumericUserId, token: AccessToken) -> Self {
        Self {
            principal: Principal::User(TenantIdentity {
                subject,
                numeric_id,
                token,
            }),
        }
    }

    /// The resolved principal.
    #[must_use]
    pub const fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Role derived from the principal variant.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self.principal {
            Principal::Admin(_) => Role::Admin,
            Principal::User(_) => Role::User,
        }
    }

    /// Identity-provider subject of the caller.
    #[must_use]
    pub const fn subject(&self) -> &SubjectId {
        match &self.principal {
            Principal::Admin(identity) => &identity.subject,
            Principal::User(identity) => &identity.subject,
        }
    }

    /// Directory surrogate key of the caller.
    #[must_use]
    pub const fn numeric_id(&self) -> NumericUserId {
        match &self.principal {
            Principal::Admin(identity) => identity.numeric_id,
            Principal::User(identity) => identity.numeric_id,
        }
    }

    /// Bearer credential, present exactly when the caller is a regular user.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        match &self.principal {
            Principal::Admin(_) => None,
            Principal::User(identity) => Some(&identity.token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn subject() -> SubjectId {
        SubjectId::new("user-42").expect("subject")
    }

    #[fixture]
    fn numeric_id() -> NumericUserId {
        NumericUserId::new(42).expect("numeric id")
    }

    #[rstest]
    fn admin_contexts_carry_no_credential(subject: SubjectId, numeric_id: NumericUserId) {
        let ctx = RequestContext::admin(subject.clone(), numeric_id);

        assert_eq!(ctx.role(), Role::Admin);
        assert!(ctx.access_token().is_none());
        assert_eq!(ctx.subject(), &subject);
        assert_eq!(ctx.numeric_id(), numeric_id);
    }

    #[rstest]
    fn user_contexts_always_carry_their_credential(
        subject: SubjectId,
        numeric_id: NumericUserId,
    ) {
        let token = AccessToken::new("jwt-42").expect("token");
        let ctx = RequestContext::user(subject, numeric_id, token.clone());

        assert_eq!(ctx.role(), Role::User);
        assert_eq!(ctx.access_token(), Some(&token));
        let Principal::User(identity) = ctx.principal() else {
            panic!("expected a tenant principal");
        };
        assert_eq!(identity.token(), &token);
    }
}
