//! Notifications on the privileged store.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::identity::NumericUserId;
use crate::domain::ports::{NotificationStore, Owned, PrivilegedAccess, StoreError, StoreResult};
use crate::domain::records::RecordId;
use crate::domain::records::notifications::{
    NOTIFICATION_LIST_LIMIT, Notification, NotificationDraft,
};

use super::super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::super::models::{NewNotificationRow, NotificationRow, flag_to_column};
use super::super::schema::fact_update_notifications as notifications;
use super::DieselPrivilegedStore;

const SET: i32 = flag_to_column(true);
const UNSET: i32 = flag_to_column(false);

#[async_trait]
impl NotificationStore<PrivilegedAccess> for DieselPrivilegedStore {
    async fn insert_notification(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        draft: &NotificationDraft,
    ) -> StoreResult<Owned<Notification, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(notifications::table)
            .values(&NewNotificationRow {
                user_id: owner.get(),
                title: &draft.title,
                message: &draft.message,
                is_read: UNSET,
                is_dismissed: UNSET,
            })
            .returning(NotificationRow::as_returning())
            .get_result::<NotificationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_notifications(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        include_read: bool,
    ) -> StoreResult<Vec<Owned<Notification, PrivilegedAccess>>> {
        let limit = i64::try_from(NOTIFICATION_LIST_LIMIT).unwrap_or(i64::MAX);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = notifications::table
            .filter(notifications::user_id.eq(owner.get()))
            .filter(notifications::is_dismissed.eq(UNSET))
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .limit(limit)
            .select(NotificationRow::as_select())
            .into_boxed();
        if !include_read {
            query = query.filter(notifications::is_read.eq(UNSET));
        }
        query
            .load::<NotificationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(NotificationRow::into_record)
            .collect()
    }

    async fn count_unread(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
    ) -> StoreResult<u64> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count = notifications::table
            .filter(notifications::user_id.eq(owner.get()))
            .filter(notifications::is_read.eq(UNSET))
            .filter(notifications::is_dismissed.eq(UNSET))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|err| StoreError::decode(err.to_string()))
    }

    async fn mark_read(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        id: RecordId,
    ) -> StoreResult<bool> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            notifications::table
                .filter(notifications::id.eq(id.get()))
                .filter(notifications::user_id.eq(owner.get())),
        )
        .set((
            notifications::is_read.eq(SET),
            notifications::read_at.eq(Some(Utc::now())),
        ))
        .execute(&mut conn)
        .await
        .map(|rows| rows > 0)
        .map_err(map_diesel_error)
    }

    async fn dismiss(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        id: RecordId,
    ) -> StoreResult<bool> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            notifications::table
                .filter(notifications::id.eq(id.get()))
                .filter(notifications::user_id.eq(owner.get())),
        )
        .set((
            notifications::is_dismissed.eq(SET),
            notifications::dismissed_at.eq(Some(Utc::now())),
        ))
        .execute(&mut conn)
        .await
        .map(|rows| rows > 0)
        .map_err(map_diesel_error)
    }

    async fn delete_all_notifications(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
    ) -> StoreResult<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(notifications::table.filter(notifications::user_id.eq(owner.get())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
