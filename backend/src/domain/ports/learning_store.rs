//! Port for the vocabulary catalogue and per-user progress.

use async_trait::async_trait;

use crate::domain::records::RecordId;
use crate::domain::records::learning::{
    Difficulty, UserVocabulary, VocabularyEnrolment, VocabularyItem,
};

use super::{AccessScope, Owned, StoreResult};

/// Learning persistence for one access scope.
#[async_trait]
pub trait LearningStore<S: AccessScope>: Send + Sync {
    /// Catalogue entries for a language, optionally of one difficulty.
    async fn list_vocabulary(
        &self,
        access: &S,
        language: &str,
        difficulty: Option<Difficulty>,
    ) -> StoreResult<Vec<VocabularyItem>>;

    /// Progress rows owned by `owner`, optionally for one language.
    async fn list_user_vocabulary(
        &self,
        access: &S,
        owner: &S::Owner,
        language: Option<&str>,
    ) -> StoreResult<Vec<Owned<UserVocabulary, S>>>;

    /// Start tracking a catalogue word for `owner`.
    async fn enrol_vocabulary(
        &self,
        access: &S,
        owner: &S::Owner,
        enrolment: &VocabularyEnrolment,
    ) -> StoreResult<Owned<UserVocabulary, S>>;

    /// Record one review; `None` when `owner` is not tracking the word.
    async fn record_review(
        &self,
        access: &S,
        owner: &S::Owner,
        vocabulary_item_id: RecordId,
        correct: bool,
    ) -> StoreResult<Option<Owned<UserVocabulary, S>>>;
}
