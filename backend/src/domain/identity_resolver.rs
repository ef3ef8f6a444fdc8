//! Context resolution: bearer credential to request descriptor.
//!
//! The resolver asks the identity provider who a credential belongs to, then
//! asks the user directory for that subject's numeric id and role. Any
//! failure along the way yields an unauthenticated result; the decision to
//! reject an anonymous call belongs to the protected entry point.

use std::sync::Arc;

use tracing::{debug, warn};

use super::context::RequestContext;
use super::identity::{AccessToken, Role};
use super::ports::{IdentityError, TokenVerifier, UserDirectory};

/// Builds [`RequestContext`] values from inbound credentials.
#[derive(Clone)]
pub struct IdentityResolver {
    verifier: Arc<dyn TokenVerifier>,
    directory: Arc<dyn UserDirectory>,
}

impl IdentityResolver {
    /// Create a resolver over the given identity ports.
    pub fn new(verifier: Arc<dyn TokenVerifier>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            verifier,
            directory,
        }
    }

    /// Resolve a descriptor, swallowing lookup failures.
    ///
    /// Returns `None` when no credential was presented, when the provider
    /// refuses it, when the subject is unknown, or when either lookup fails.
    pub async fn resolve(&self, token: Option<AccessToken>) -> Option<RequestContext> {
        let token = token?;
        let fingerprint = token.fingerprint();
        match self.try_resolve(token).await {
            Ok(ctx) => ctx,
            Err(error) => {
                warn!(%error, token = %fingerprint, "identity resolution failed; treating as anonymous");
                None
            }
        }
    }

    /// Resolve a descriptor, surfacing lookup failures.
    pub async fn try_resolve(
        &self,
        token: AccessToken,
    ) -> Result<Option<RequestContext>, IdentityError> {
        let Some(subject) = self.verifier.verify(&token).await? else {
            debug!(token = %token.fingerprint(), "identity provider refused the credential");
            return Ok(None);
        };
        let Some(entry) = self.directory.find_by_subject(&subject).await? else {
            debug!(subject = %subject, "authenticated subject has no directory entry");
            return Ok(None);
        };

        let ctx = match entry.role {
            Role::Admin => RequestContext::admin(subject, entry.numeric_id),
            Role::User => RequestContext::user(subject, entry.numeric_id, token),
        };
        debug!(subject = %ctx.subject(), role = %ctx.role(), "request context resolved");
        Ok(Some(ctx))
    }
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::{NumericUserId, SubjectId};
    use crate::domain::ports::{DirectoryEntry, MockTokenVerifier, MockUserDirectory};
    use rstest::rstest;

    fn token(value: &str) -> AccessToken {
        AccessToken::new(value).expect("token")
    }

    fn subject(value: &str) -> SubjectId {
        SubjectId::new(value).expect("subject")
    }

    fn entry(id: i64, role: Role) -> DirectoryEntry {
        DirectoryEntry {
            numeric_id: NumericUserId::new(id).expect("id"),
            role,
        }
    }

    fn resolver(verifier: MockTokenVerifier, directory: MockUserDirectory) -> IdentityResolver {
        IdentityResolver::new(Arc::new(verifier), Arc::new(directory))
    }

    #[tokio::test]
    async fn missing_credential_is_anonymous_without_lookups() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().never();
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_subject().never();

        assert!(resolver(verifier, directory).resolve(None).await.is_none());
    }

    #[tokio::test]
    async fn user_role_keeps_the_forwarded_credential() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .returning(|_| Ok(Some(subject("user-42"))));
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_subject()
            .times(1)
            .returning(|_| Ok(Some(entry(42, Role::User))));

        let ctx = resolver(verifier, directory)
            .resolve(Some(token("jwt-42")))
            .await
            .expect("context");

        assert_eq!(ctx.role(), Role::User);
        assert_eq!(ctx.subject().as_str(), "user-42");
        assert_eq!(ctx.numeric_id().get(), 42);
        assert_eq!(ctx.access_token().map(AccessToken::expose), Some("jwt-42"));
    }

    #[tokio::test]
    async fn admin_role_drops_the_credential() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Ok(Some(subject("admin-1"))));
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_subject()
            .returning(|_| Ok(Some(entry(1, Role::Admin))));

        let ctx = resolver(verifier, directory)
            .resolve(Some(token("jwt-admin")))
            .await
            .expect("context");

        assert_eq!(ctx.role(), Role::Admin);
        assert!(ctx.access_token().is_none());
    }

    #[tokio::test]
    async fn refused_credential_skips_the_directory() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().returning(|_| Ok(None));
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_subject().never();

        let outcome = resolver(verifier, directory)
            .try_resolve(token("expired"))
            .await
            .expect("lookup succeeds");
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn unknown_subject_is_anonymous() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Ok(Some(subject("ghost"))));
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_subject().returning(|_| Ok(None));

        assert!(
            resolver(verifier, directory)
                .resolve(Some(token("jwt")))
                .await
                .is_none()
        );
    }

    #[rstest]
    #[case(IdentityError::connection("provider down"))]
    #[case(IdentityError::rejected("bad api key"))]
    #[case(IdentityError::decode("not json"))]
    #[tokio::test]
    async fn lookup_failures_are_swallowed(#[case] failure: IdentityError) {
        let mut verifier = MockTokenVerifier::new();
        let surfaced = failure.clone();
        verifier
            .expect_verify()
            .returning(move |_| Err(failure.clone()));
        let directory = MockUserDirectory::new();
        let resolver = resolver(verifier, directory);

        assert!(resolver.resolve(Some(token("jwt"))).await.is_none());
        let error = resolver
            .try_resolve(token("jwt"))
            .await
            .expect_err("strict resolution surfaces the failure");
        assert_eq!(error, surfaced);
    }
}
