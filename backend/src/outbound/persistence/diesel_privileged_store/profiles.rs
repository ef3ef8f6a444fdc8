//! Personality profiles on the privileged store.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::identity::NumericUserId;
use crate::domain::ports::{Owned, PrivilegedAccess, ProfileStore, StoreResult};
use crate::domain::records::profiles::{ProfilePatch, UserProfile};

use super::super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::super::models::{NewUserProfileRow, UserProfileRow, UserProfileUpdate};
use super::super::schema::user_profiles;
use super::DieselPrivilegedStore;

#[async_trait]
impl ProfileStore<PrivilegedAccess> for DieselPrivilegedStore {
    async fn find_profile(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
    ) -> StoreResult<Option<Owned<UserProfile, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        user_profiles::table
            .filter(user_profiles::user_id.eq(owner.get()))
            .select(UserProfileRow::as_select())
            .first::<UserProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(UserProfileRow::into_record)
            .transpose()
    }

    async fn insert_profile(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        profile: &UserProfile,
    ) -> StoreResult<Owned<UserProfile, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(user_profiles::table)
            .values(&NewUserProfileRow::new(*owner, profile))
            .returning(UserProfileRow::as_returning())
            .get_result::<UserProfileRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn update_profile(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        patch: &ProfilePatch,
    ) -> StoreResult<Option<Owned<UserProfile, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(user_profiles::table.filter(user_profiles::user_id.eq(owner.get())))
            .set(&UserProfileUpdate::new(patch, Utc::now()))
            .returning(UserProfileRow::as_returning())
            .get_result::<UserProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(UserProfileRow::into_record)
            .transpose()
    }
}
