//! Translation adapter.

use crate::domain::identity::NumericUserId;
use crate::domain::records::translation::{SavedTranslation, TranslationCategory};
use crate::domain::records::{OwnedDraft, Record, RecordId};

define_adapter! {
    /// Phrasebook operations for one request.
    TranslationAdapter
}

impl TranslationAdapter {
    delegate_to_facade! {
        fn save_translation(&self, payload: &OwnedDraft<SavedTranslation>) -> Record<SavedTranslation>;
        fn get_saved_translations(&self, user_id: NumericUserId, category_id: Option<RecordId>) -> Vec<Record<SavedTranslation>>;
        fn delete_saved_translation(&self, user_id: NumericUserId, id: RecordId) -> ();
        fn create_translation_category(&self, payload: &OwnedDraft<TranslationCategory>) -> Record<TranslationCategory>;
        fn get_translation_categories(&self, user_id: NumericUserId) -> Vec<Record<TranslationCategory>>;
    }
}
