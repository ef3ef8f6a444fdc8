//! Directory lookups against the privileged `users` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{DirectoryEntry, IdentityError, StoreResult, UserDirectory};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, store_to_identity_error};
use super::models::{UserRow, owner_from_column};
use super::pool::LazyDbPool;
use super::schema::users;

/// Resolves identity-provider subjects to numeric ids and roles.
#[derive(Debug, Clone)]
pub struct DieselUserDirectory {
    pool: LazyDbPool,
}

impl DieselUserDirectory {
    /// Create a directory over the given pool.
    pub fn new(pool: LazyDbPool) -> Self {
        Self { pool }
    }

    async fn lookup(&self, subject: &SubjectId) -> StoreResult<Option<DirectoryEntry>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::open_id.eq(subject.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            debug!(%subject, "subject not present in directory");
            return Ok(None);
        };
        Ok(Some(DirectoryEntry {
            numeric_id: owner_from_column(row.id)?,
            role: row.role()?,
        }))
    }
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_by_subject(
        &self,
        subject: &SubjectId,
    ) -> Result<Option<DirectoryEntry>, IdentityError> {
        self.lookup(subject).await.map_err(store_to_identity_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::pool::PoolConfig;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn unconfigured_directory_reports_connection_failure() {
        let directory = DieselUserDirectory::new(LazyDbPool::new(None));
        let subject = SubjectId::new("subject-1").expect("valid subject");

        let error = directory
            .find_by_subject(&subject)
            .await
            .expect_err("lookup without a database must fail");

        assert!(matches!(error, IdentityError::Connection { .. }));
    }

    #[rstest]
    fn directory_construction_does_not_touch_the_database() {
        let pool = LazyDbPool::new(Some(PoolConfig::new("postgres://127.0.0.1:1/none")));
        let directory = DieselUserDirectory::new(pool);
        assert!(format!("{directory:?}").contains("initialised: false"));
    }
}
