//! Saved translations and their categories on the tenant store.

use async_trait::async_trait;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{Owned, StoreResult, TenantSession, TranslationStore};
use crate::domain::records::RecordId;
use crate::domain::records::translation::{SavedTranslation, TranslationCategory};

use super::client::{PostgrestTenantStore, Query};
use super::dto::{InsertDto, RowDto, SavedTranslationColumns, TranslationCategoryColumns};
use super::tables::{SAVED_TRANSLATIONS, TRANSLATION_CATEGORIES};

type TranslationRow = RowDto<SavedTranslationColumns>;
type CategoryRow = RowDto<TranslationCategoryColumns>;

#[async_trait]
impl TranslationStore<TenantSession> for PostgrestTenantStore {
    async fn insert_translation(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        translation: &SavedTranslation,
    ) -> StoreResult<Owned<SavedTranslation, TenantSession>> {
        let body = InsertDto::<SavedTranslationColumns>::new(owner, translation.clone());
        self.insert::<_, TranslationRow>(session, SAVED_TRANSLATIONS, &body)
            .await?
            .into_record()
    }

    async fn list_translations(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        category_id: Option<RecordId>,
    ) -> StoreResult<Vec<Owned<SavedTranslation, TenantSession>>> {
        let mut query = Query::new().owned_by(owner).order("created_at.desc,id.desc");
        if let Some(category_id) = category_id {
            query = query.eq("category_id", category_id);
        }
        self.select::<TranslationRow>(session, SAVED_TRANSLATIONS, &query)
            .await?
            .into_iter()
            .map(TranslationRow::into_record)
            .collect()
    }

    async fn delete_translation(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        id: RecordId,
    ) -> StoreResult<()> {
        let query = Query::new().eq("id", id).owned_by(owner);
        self.delete(session, SAVED_TRANSLATIONS, &query).await
    }

    async fn insert_translation_category(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        category: &TranslationCategory,
    ) -> StoreResult<Owned<TranslationCategory, TenantSession>> {
        let body = InsertDto::<TranslationCategoryColumns>::new(owner, category.clone());
        self.insert::<_, CategoryRow>(session, TRANSLATION_CATEGORIES, &body)
            .await?
            .into_record()
    }

    async fn list_translation_categories(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
    ) -> StoreResult<Vec<Owned<TranslationCategory, TenantSession>>> {
        let query = Query::new().owned_by(owner).order("name.asc,id.asc");
        self.select::<CategoryRow>(session, TRANSLATION_CATEGORIES, &query)
            .await?
            .into_iter()
            .map(CategoryRow::into_record)
            .collect()
    }
}
