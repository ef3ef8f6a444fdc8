//! Saved translations and their categories on the privileged store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::identity::NumericUserId;
use crate::domain::ports::{Owned, PrivilegedAccess, StoreResult, TranslationStore};
use crate::domain::records::RecordId;
use crate::domain::records::translation::{SavedTranslation, TranslationCategory};

use super::super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::super::models::{
    NewSavedTranslationRow, NewTranslationCategoryRow, SavedTranslationRow,
    TranslationCategoryRow,
};
use super::super::schema::{saved_translations, translation_categories};
use super::DieselPrivilegedStore;

#[async_trait]
impl TranslationStore<PrivilegedAccess> for DieselPrivilegedStore {
    async fn insert_translation(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        translation: &SavedTranslation,
    ) -> StoreResult<Owned<SavedTranslation, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(saved_translations::table)
            .values(&NewSavedTranslationRow::new(*owner, translation))
            .returning(SavedTranslationRow::as_returning())
            .get_result::<SavedTranslationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_translations(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        category_id: Option<RecordId>,
    ) -> StoreResult<Vec<Owned<SavedTranslation, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = saved_translations::table
            .filter(saved_translations::user_id.eq(owner.get()))
            .order((
                saved_translations::created_at.desc(),
                saved_translations::id.desc(),
            ))
            .select(SavedTranslationRow::as_select())
            .into_boxed();
        if let Some(category_id) = category_id {
            query = query.filter(saved_translations::category_id.eq(category_id.get()));
        }
        query
            .load::<SavedTranslationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(SavedTranslationRow::into_record)
            .collect()
    }

    async fn delete_translation(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        id: RecordId,
    ) -> StoreResult<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(
            saved_translations::table
                .filter(saved_translations::id.eq(id.get()))
                .filter(saved_translations::user_id.eq(owner.get())),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn insert_translation_category(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        category: &TranslationCategory,
    ) -> StoreResult<Owned<TranslationCategory, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(translation_categories::table)
            .values(&NewTranslationCategoryRow {
                user_id: owner.get(),
                name: &category.name,
                icon: category.icon.as_deref(),
            })
            .returning(TranslationCategoryRow::as_returning())
            .get_result::<TranslationCategoryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_translation_categories(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
    ) -> StoreResult<Vec<Owned<TranslationCategory, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        translation_categories::table
            .filter(translation_categories::user_id.eq(owner.get()))
            .order((translation_categories::name.asc(), translation_categories::id.asc()))
            .select(TranslationCategoryRow::as_select())
            .load::<TranslationCategoryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(TranslationCategoryRow::into_record)
            .collect()
    }
}
