//! Notifications on the tenant store.

use async_trait::async_trait;
use chrono::Utc;
use serde::de::IgnoredAny;
use serde_json::json;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{NotificationStore, Owned, StoreResult, TenantSession};
use crate::domain::records::RecordId;
use crate::domain::records::notifications::{
    NOTIFICATION_LIST_LIMIT, Notification, NotificationDraft,
};

use super::client::{PostgrestTenantStore, Query};
use super::dto::{InsertDto, NotificationColumns, RowDto};
use super::tables::NOTIFICATIONS;

type NotificationRow = RowDto<NotificationColumns>;

fn unread(owner: &SubjectId) -> Query {
    Query::new()
        .owned_by(owner)
        .eq("is_read", false)
        .eq("is_dismissed", false)
}

#[async_trait]
impl NotificationStore<TenantSession> for PostgrestTenantStore {
    async fn insert_notification(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        draft: &NotificationDraft,
    ) -> StoreResult<Owned<Notification, TenantSession>> {
        let body = InsertDto::<NotificationColumns>::new(owner, draft.clone().into_unread());
        self.insert::<_, NotificationRow>(session, NOTIFICATIONS, &body)
            .await?
            .into_record()
    }

    async fn list_notifications(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        include_read: bool,
    ) -> StoreResult<Vec<Owned<Notification, TenantSession>>> {
        let mut query = Query::new()
            .owned_by(owner)
            .eq("is_dismissed", false)
            .order("created_at.desc,id.desc")
            .limit(NOTIFICATION_LIST_LIMIT);
        if !include_read {
            query = query.eq("is_read", false);
        }
        self.select::<NotificationRow>(session, NOTIFICATIONS, &query)
            .await?
            .into_iter()
            .map(NotificationRow::into_record)
            .collect()
    }

    async fn count_unread(&self, session: &TenantSession, owner: &SubjectId) -> StoreResult<u64> {
        self.count(session, NOTIFICATIONS, &unread(owner)).await
    }

    async fn mark_read(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        id: RecordId,
    ) -> StoreResult<bool> {
        let query = Query::new().eq("id", id).owned_by(owner);
        let body = json!({ "is_read": true, "read_at": Utc::now() });
        let rows = self
            .update::<_, IgnoredAny>(session, NOTIFICATIONS, &query, &body)
            .await?;
        Ok(!rows.is_empty())
    }

    async fn dismiss(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        id: RecordId,
    ) -> StoreResult<bool> {
        let query = Query::new().eq("id", id).owned_by(owner);
        let body = json!({ "is_dismissed": true, "dismissed_at": Utc::now() });
        let rows = self
            .update::<_, IgnoredAny>(session, NOTIFICATIONS, &query, &body)
            .await?;
        Ok(!rows.is_empty())
    }

    async fn delete_all_notifications(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
    ) -> StoreResult<()> {
        self.delete(session, NOTIFICATIONS, &Query::new().owned_by(owner))
            .await
    }
}
