//! Port for the phrasebook.

use async_trait::async_trait;

use crate::domain::records::RecordId;
use crate::domain::records::translation::{SavedTranslation, TranslationCategory};

use super::{AccessScope, Owned, StoreResult};

/// Phrasebook persistence for one access scope.
#[async_trait]
pub trait TranslationStore<S: AccessScope>: Send + Sync {
    /// Save a translation for `owner`.
    async fn insert_translation(
        &self,
        access: &S,
        owner: &S::Owner,
        translation: &SavedTranslation,
    ) -> StoreResult<Owned<SavedTranslation, S>>;

    /// Translations owned by `owner`, optionally in one category, newest first.
    async fn list_translations(
        &self,
        access: &S,
        owner: &S::Owner,
        category_id: Option<RecordId>,
    ) -> StoreResult<Vec<Owned<SavedTranslation, S>>>;

    /// Delete one of `owner`'s translations.
    async fn delete_translation(
        &self,
        access: &S,
        owner: &S::Owner,
        id: RecordId,
    ) -> StoreResult<()>;

    /// Create a phrasebook category for `owner`.
    async fn insert_translation_category(
        &self,
        access: &S,
        owner: &S::Owner,
        category: &TranslationCategory,
    ) -> StoreResult<Owned<TranslationCategory, S>>;

    /// Categories owned by `owner`.
    async fn list_translation_categories(
        &self,
        access: &S,
        owner: &S::Owner,
    ) -> StoreResult<Vec<Owned<TranslationCategory, S>>>;
}
