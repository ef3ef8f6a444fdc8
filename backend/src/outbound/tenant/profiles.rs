//! Personality profiles on the tenant store.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{Owned, ProfileStore, StoreResult, TenantSession};
use crate::domain::records::profiles::{ProfilePatch, UserProfile};

use super::client::{PostgrestTenantStore, Query};
use super::dto::{InsertDto, ProfileChanges, RowDto, UserProfileColumns};
use super::tables::USER_PROFILES;

type ProfileRow = RowDto<UserProfileColumns>;

#[async_trait]
impl ProfileStore<TenantSession> for PostgrestTenantStore {
    async fn find_profile(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
    ) -> StoreResult<Option<Owned<UserProfile, TenantSession>>> {
        self.select_one::<ProfileRow>(session, USER_PROFILES, Query::new().owned_by(owner))
            .await?
            .map(ProfileRow::into_record)
            .transpose()
    }

    async fn insert_profile(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        profile: &UserProfile,
    ) -> StoreResult<Owned<UserProfile, TenantSession>> {
        let body = InsertDto::<UserProfileColumns>::new(owner, profile.clone());
        self.insert::<_, ProfileRow>(session, USER_PROFILES, &body)
            .await?
            .into_record()
    }

    async fn update_profile(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        patch: &ProfilePatch,
    ) -> StoreResult<Option<Owned<UserProfile, TenantSession>>> {
        let query = Query::new().owned_by(owner);
        let changes = ProfileChanges::new(patch, Utc::now());
        self.update::<_, ProfileRow>(session, USER_PROFILES, &query, &changes)
            .await?
            .into_iter()
            .next()
            .map(ProfileRow::into_record)
            .transpose()
    }
}
