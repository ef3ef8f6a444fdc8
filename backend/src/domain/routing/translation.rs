//! Phrasebook operations.

use crate::domain::context::RequestContext;
use crate::domain::identity::NumericUserId;
use crate::domain::ports::TranslationStore;
use crate::domain::records::translation::{SavedTranslation, TranslationCategory};
use crate::domain::records::{OwnedDraft, Record, RecordId};

use super::{RoutingFacade, RoutingResult};

impl RoutingFacade {
    /// Keep a translation.
    pub async fn save_translation(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<SavedTranslation>,
    ) -> RoutingResult<Record<SavedTranslation>> {
        route_owned!(self, ctx, "save_translation", payload.user_id,
            |store, access, owner| store.insert_translation(access, owner, &payload.draft))
    }

    /// Saved translations, optionally in one category.
    pub async fn get_saved_translations(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        category_id: Option<RecordId>,
    ) -> RoutingResult<Vec<Record<SavedTranslation>>> {
        route_owned!(self, ctx, "get_saved_translations", user_id,
            |store, access, owner| store.list_translations(access, owner, category_id))
    }

    /// Remove a saved translation.
    pub async fn delete_saved_translation(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        id: RecordId,
    ) -> RoutingResult<()> {
        route_owned!(self, ctx, "delete_saved_translation", user_id,
            |store, access, owner| store.delete_translation(access, owner, id))
    }

    /// Create a phrasebook category.
    pub async fn create_translation_category(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<TranslationCategory>,
    ) -> RoutingResult<Record<TranslationCategory>> {
        route_owned!(self, ctx, "create_translation_category", payload.user_id,
            |store, access, owner| store.insert_translation_category(access, owner, &payload.draft))
    }

    /// Phrasebook categories.
    pub async fn get_translation_categories(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
    ) -> RoutingResult<Vec<Record<TranslationCategory>>> {
        route_owned!(self, ctx, "get_translation_categories", user_id,
            |store, access, owner| store.list_translation_categories(access, owner))
    }
}
