//! Notification operations.

use crate::domain::context::RequestContext;
use crate::domain::identity::NumericUserId;
use crate::domain::ports::NotificationStore;
use crate::domain::records::notifications::{Notification, NotificationDraft};
use crate::domain::records::{OwnedDraft, Record, RecordId};

use super::{RoutingFacade, RoutingResult};

impl RoutingFacade {
    /// Send a notification.
    pub async fn create_notification(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<NotificationDraft>,
    ) -> RoutingResult<Record<Notification>> {
        route_owned!(self, ctx, "create_notification", payload.user_id,
            |store, access, owner| store.insert_notification(access, owner, &payload.draft))
    }

    /// Undismissed notifications, newest first.
    pub async fn get_user_notifications(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        include_read: bool,
    ) -> RoutingResult<Vec<Record<Notification>>> {
        route_owned!(self, ctx, "get_user_notifications", user_id,
            |store, access, owner| store.list_notifications(access, owner, include_read))
    }

    /// Unread badge count.
    pub async fn get_unread_notification_count(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
    ) -> RoutingResult<u64> {
        route_owned!(self, ctx, "get_unread_notification_count", user_id,
            |store, access, owner| store.count_unread(access, owner))
    }

    /// Mark one notification read.
    pub async fn mark_notification_as_read(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        id: RecordId,
    ) -> RoutingResult<bool> {
        route_owned!(self, ctx, "mark_notification_as_read", user_id,
            |store, access, owner| store.mark_read(access, owner, id))
    }

    /// Dismiss one notification.
    pub async fn dismiss_notification(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        id: RecordId,
    ) -> RoutingResult<bool> {
        route_owned!(self, ctx, "dismiss_notification", user_id,
            |store, access, owner| store.dismiss(access, owner, id))
    }

    /// Clear every notification.
    pub async fn delete_all_user_notifications(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
    ) -> RoutingResult<()> {
        route_owned!(self, ctx, "delete_all_user_notifications", user_id,
            |store, access, owner| store.delete_all_notifications(access, owner))
    }
}
