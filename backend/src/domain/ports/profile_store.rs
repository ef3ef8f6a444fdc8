//! Port for assistant personality profiles.

use async_trait::async_trait;

use crate::domain::records::profiles::{ProfilePatch, UserProfile};

use super::{AccessScope, Owned, StoreResult};

/// Profile persistence for one access scope. One profile per owner.
#[async_trait]
pub trait ProfileStore<S: AccessScope>: Send + Sync {
    /// The profile of `owner`, `None` when none exists.
    async fn find_profile(
        &self,
        access: &S,
        owner: &S::Owner,
    ) -> StoreResult<Option<Owned<UserProfile, S>>>;

    /// Create the profile of `owner`.
    async fn insert_profile(
        &self,
        access: &S,
        owner: &S::Owner,
        profile: &UserProfile,
    ) -> StoreResult<Owned<UserProfile, S>>;

    /// Apply `patch` to the profile of `owner`; `None` when none exists.
    async fn update_profile(
        &self,
        access: &S,
        owner: &S::Owner,
        patch: &ProfilePatch,
    ) -> StoreResult<Option<Owned<UserProfile, S>>>;
}
