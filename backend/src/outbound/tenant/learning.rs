//! Vocabulary catalogue and per-user progress on the tenant store.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{LearningStore, Owned, StoreResult, TenantSession};
use crate::domain::records::RecordId;
use crate::domain::records::learning::{
    Difficulty, UserVocabulary, VocabularyEnrolment, VocabularyItem,
};

use super::client::{PostgrestTenantStore, Query};
use super::dto::{
    Columns as _, InsertDto, ReviewChanges, RowDto, UserVocabularyColumns, VocabularyItemColumns,
};
use super::tables::{USER_VOCABULARY, VOCABULARY_ITEMS};

type ProgressRow = RowDto<UserVocabularyColumns>;

#[async_trait]
impl LearningStore<TenantSession> for PostgrestTenantStore {
    async fn list_vocabulary(
        &self,
        session: &TenantSession,
        language: &str,
        difficulty: Option<Difficulty>,
    ) -> StoreResult<Vec<VocabularyItem>> {
        let mut query = Query::new().eq("language", language).order("id.asc");
        if let Some(difficulty) = difficulty {
            query = query.eq("difficulty", difficulty);
        }
        Ok(self
            .select::<VocabularyItemColumns>(session, VOCABULARY_ITEMS, &query)
            .await?
            .into_iter()
            .map(VocabularyItemColumns::into_domain)
            .collect())
    }

    async fn list_user_vocabulary(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        language: Option<&str>,
    ) -> StoreResult<Vec<Owned<UserVocabulary, TenantSession>>> {
        let mut query = Query::new().owned_by(owner).order("id.asc");
        if let Some(language) = language {
            query = query.eq("language", language);
        }
        self.select::<ProgressRow>(session, USER_VOCABULARY, &query)
            .await?
            .into_iter()
            .map(ProgressRow::into_record)
            .collect()
    }

    async fn enrol_vocabulary(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        enrolment: &VocabularyEnrolment,
    ) -> StoreResult<Owned<UserVocabulary, TenantSession>> {
        let progress = UserVocabulary::enrol(enrolment, Utc::now());
        let body = InsertDto::<UserVocabularyColumns>::new(owner, progress);
        self.insert::<_, ProgressRow>(session, USER_VOCABULARY, &body)
            .await?
            .into_record()
    }

    async fn record_review(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        vocabulary_item_id: RecordId,
        correct: bool,
    ) -> StoreResult<Option<Owned<UserVocabulary, TenantSession>>> {
        let lookup = Query::new()
            .owned_by(owner)
            .eq("vocabulary_item_id", vocabulary_item_id);
        let Some(row) = self
            .select_one::<ProgressRow>(session, USER_VOCABULARY, lookup)
            .await?
        else {
            return Ok(None);
        };

        let mut record = row.into_record()?;
        record.fields.apply_review(correct, Utc::now());
        let query = Query::new().eq("id", record.id).owned_by(owner);
        self.update::<_, ProgressRow>(
            session,
            USER_VOCABULARY,
            &query,
            &ReviewChanges::from(&record.fields),
        )
        .await?
        .into_iter()
        .next()
        .map(ProgressRow::into_record)
        .transpose()
    }
}
