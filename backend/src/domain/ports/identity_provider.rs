//! Ports used by the context resolver to establish who is calling.

use async_trait::async_trait;

use crate::domain::identity::{AccessToken, NumericUserId, Role, SubjectId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while verifying credentials or looking up identities.
    pub enum IdentityError {
        /// The identity provider or directory could not be reached.
        Connection { message: String } =>
            "identity lookup connection failed: {message}",
        /// The provider refused the request for a reason other than a bad
        /// credential.
        Rejected { message: String } =>
            "identity provider rejected the request: {message}",
        /// The provider's answer could not be interpreted.
        Decode { message: String } =>
            "identity provider returned an unreadable answer: {message}",
    }
}

/// Directory record for a known subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Privileged-store surrogate key.
    pub numeric_id: NumericUserId,
    /// Assigned role.
    pub role: Role,
}

/// Verifies bearer credentials with the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Subject authenticated by `token`, or `None` when the provider does
    /// not accept it.
    async fn verify(&self, token: &AccessToken) -> Result<Option<SubjectId>, IdentityError>;
}

/// Maps identity-provider subjects onto directory entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Directory entry for `subject`, or `None` when unknown.
    async fn find_by_subject(
        &self,
        subject: &SubjectId,
    ) -> Result<Option<DirectoryEntry>, IdentityError>;
}
