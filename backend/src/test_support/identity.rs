//! Static identity doubles.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::identity::{AccessToken, NumericUserId, Role, SubjectId};
use crate::domain::ports::{DirectoryEntry, IdentityError, TokenVerifier, UserDirectory};

/// Fixed credential table answering both identity ports.
///
/// # Examples
/// ```
/// use assistant_backend::domain::{NumericUserId, Role, SubjectId};
/// use assistant_backend::test_support::StaticIdentityProvider;
///
/// let provider = StaticIdentityProvider::default().with_user(
///     "jwt-42",
///     SubjectId::new("user-42").expect("subject"),
///     NumericUserId::new(42).expect("id"),
///     Role::User,
/// );
/// # let _ = provider;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    tokens: HashMap<String, SubjectId>,
    directory: HashMap<SubjectId, DirectoryEntry>,
}

impl StaticIdentityProvider {
    /// Accept `token` for `subject` and list the subject in the directory.
    #[must_use]
    pub fn with_user(
        mut self,
        token: &str,
        subject: SubjectId,
        numeric_id: NumericUserId,
        role: Role,
    ) -> Self {
        self.tokens.insert(token.to_owned(), subject.clone());
        self.directory
            .insert(subject, DirectoryEntry { numeric_id, role });
        self
    }

    /// Accept `token` for a subject the directory does not know.
    #[must_use]
    pub fn with_unlisted_subject(mut self, token: &str, subject: SubjectId) -> Self {
        self.tokens.insert(token.to_owned(), subject);
        self
    }
}

#[async_trait]
impl TokenVerifier for StaticIdentityProvider {
    async fn verify(&self, token: &AccessToken) -> Result<Option<SubjectId>, IdentityError> {
        Ok(self.tokens.get(token.expose()).cloned())
    }
}

#[async_trait]
impl UserDirectory for StaticIdentityProvider {
    async fn find_by_subject(
        &self,
        subject: &SubjectId,
    ) -> Result<Option<DirectoryEntry>, IdentityError> {
        Ok(self.directory.get(subject).copied())
    }
}
