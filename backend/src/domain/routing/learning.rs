//! Language-learning operations.

use crate::domain::context::RequestContext;
use crate::domain::identity::NumericUserId;
use crate::domain::ports::LearningStore;
use crate::domain::records::learning::{
    Difficulty, UserVocabulary, VocabularyEnrolment, VocabularyItem,
};
use crate::domain::records::{OwnedDraft, Record, RecordId};

use super::{RoutingFacade, RoutingResult};

impl RoutingFacade {
    /// Shared catalogue words for a language.
    pub async fn get_vocabulary_items(
        &self,
        ctx: &RequestContext,
        language: &str,
        difficulty: Option<Difficulty>,
    ) -> RoutingResult<Vec<VocabularyItem>> {
        route_scoped!(self, ctx, "get_vocabulary_items",
            |store, access| store.list_vocabulary(access, language, difficulty))
    }

    /// Words `user_id` is tracking.
    pub async fn get_user_vocabulary(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        language: Option<&str>,
    ) -> RoutingResult<Vec<Record<UserVocabulary>>> {
        route_owned!(self, ctx, "get_user_vocabulary", user_id,
            |store, access, owner| store.list_user_vocabulary(access, owner, language))
    }

    /// Start tracking a word.
    pub async fn add_vocabulary_item(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<VocabularyEnrolment>,
    ) -> RoutingResult<Record<UserVocabulary>> {
        route_owned!(self, ctx, "add_vocabulary_item", payload.user_id,
            |store, access, owner| store.enrol_vocabulary(access, owner, &payload.draft))
    }

    /// Count a review of a tracked word.
    pub async fn update_vocabulary_progress(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        vocabulary_item_id: RecordId,
        correct: bool,
    ) -> RoutingResult<Option<Record<UserVocabulary>>> {
        route_owned!(self, ctx, "update_vocabulary_progress", user_id,
            |store, access, owner| store.record_review(access, owner, vocabulary_item_id, correct))
    }
}
