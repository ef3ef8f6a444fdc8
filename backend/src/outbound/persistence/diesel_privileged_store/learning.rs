//! Vocabulary catalogue and per-user progress on the privileged store.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::identity::NumericUserId;
use crate::domain::ports::{LearningStore, Owned, PrivilegedAccess, StoreResult};
use crate::domain::records::RecordId;
use crate::domain::records::learning::{
    Difficulty, UserVocabulary, VocabularyEnrolment, VocabularyItem,
};

use super::super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::super::models::{NewUserVocabularyRow, UserVocabularyRow, VocabularyItemRow};
use super::super::schema::{user_vocabulary, vocabulary_items};
use super::DieselPrivilegedStore;

#[async_trait]
impl LearningStore<PrivilegedAccess> for DieselPrivilegedStore {
    async fn list_vocabulary(
        &self,
        _access: &PrivilegedAccess,
        language: &str,
        difficulty: Option<Difficulty>,
    ) -> StoreResult<Vec<VocabularyItem>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = vocabulary_items::table
            .filter(vocabulary_items::language.eq(language))
            .order(vocabulary_items::id.asc())
            .select(VocabularyItemRow::as_select())
            .into_boxed();
        if let Some(difficulty) = difficulty {
            query = query.filter(vocabulary_items::difficulty.eq(difficulty.as_str()));
        }
        query
            .load::<VocabularyItemRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(VocabularyItemRow::into_item)
            .collect()
    }

    async fn list_user_vocabulary(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        language: Option<&str>,
    ) -> StoreResult<Vec<Owned<UserVocabulary, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = user_vocabulary::table
            .filter(user_vocabulary::user_id.eq(owner.get()))
            .order(user_vocabulary::id.asc())
            .select(UserVocabularyRow::as_select())
            .into_boxed();
        if let Some(language) = language {
            query = query.filter(user_vocabulary::language.eq(language));
        }
        query
            .load::<UserVocabularyRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(UserVocabularyRow::into_record)
            .collect()
    }

    async fn enrol_vocabulary(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        enrolment: &VocabularyEnrolment,
    ) -> StoreResult<Owned<UserVocabulary, PrivilegedAccess>> {
        let progress = UserVocabulary::enrol(enrolment, Utc::now());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(user_vocabulary::table)
            .values(&NewUserVocabularyRow::new(*owner, &progress))
            .returning(UserVocabularyRow::as_returning())
            .get_result::<UserVocabularyRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn record_review(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        vocabulary_item_id: RecordId,
        correct: bool,
    ) -> StoreResult<Option<Owned<UserVocabulary, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = user_vocabulary::table
            .filter(user_vocabulary::user_id.eq(owner.get()))
            .filter(user_vocabulary::vocabulary_item_id.eq(vocabulary_item_id.get()));
        diesel::update(target)
            .set((
                user_vocabulary::times_reviewed.eq(user_vocabulary::times_reviewed + 1),
                user_vocabulary::correct_count
                    .eq(user_vocabulary::correct_count + i32::from(correct)),
                user_vocabulary::last_reviewed.eq(Some(Utc::now())),
            ))
            .returning(UserVocabularyRow::as_returning())
            .get_result::<UserVocabularyRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(UserVocabularyRow::into_record)
            .transpose()
    }
}
