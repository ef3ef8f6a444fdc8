//! Personality profile operations.

use crate::domain::context::RequestContext;
use crate::domain::identity::NumericUserId;
use crate::domain::ports::ProfileStore;
use crate::domain::records::profiles::{ProfilePatch, UserProfile};
use crate::domain::records::{OwnedDraft, Record};

use super::{RoutingFacade, RoutingResult};

impl RoutingFacade {
    /// The profile of `user_id`, `None` when none exists yet.
    pub async fn get_user_profile(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
    ) -> RoutingResult<Option<Record<UserProfile>>> {
        route_owned!(self, ctx, "get_user_profile", user_id,
            |store, access, owner| store.find_profile(access, owner))
    }

    /// Create a profile.
    pub async fn create_user_profile(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<UserProfile>,
    ) -> RoutingResult<Record<UserProfile>> {
        route_owned!(self, ctx, "create_user_profile", payload.user_id,
            |store, access, owner| store.insert_profile(access, owner, &payload.draft))
    }

    /// Update the profile of `user_id`.
    pub async fn update_user_profile(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        patch: &ProfilePatch,
    ) -> RoutingResult<Option<Record<UserProfile>>> {
        route_owned!(self, ctx, "update_user_profile", user_id,
            |store, access, owner| store.update_profile(access, owner, patch))
    }
}
