//! Vocabulary learning adapter.

use crate::domain::identity::NumericUserId;
use crate::domain::records::learning::{
    Difficulty, UserVocabulary, VocabularyEnrolment, VocabularyItem,
};
use crate::domain::records::{OwnedDraft, Record, RecordId};

define_adapter! {
    /// Language-learning operations for one request.
    LearningAdapter
}

impl LearningAdapter {
    delegate_to_facade! {
        /// Shared catalogue; identical for every caller of the same backend.
        fn get_vocabulary_items(&self, language: &str, difficulty: Option<Difficulty>) -> Vec<VocabularyItem>;
        fn get_user_vocabulary(&self, user_id: NumericUserId, language: Option<&str>) -> Vec<Record<UserVocabulary>>;
        fn add_vocabulary_item(&self, payload: &OwnedDraft<VocabularyEnrolment>) -> Record<UserVocabulary>;
        fn update_vocabulary_progress(&self, user_id: NumericUserId, vocabulary_item_id: RecordId, correct: bool) -> Option<Record<UserVocabulary>>;
    }
}
