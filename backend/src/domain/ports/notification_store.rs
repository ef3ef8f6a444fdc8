//! Port for in-app notifications.

use async_trait::async_trait;

use crate::domain::records::RecordId;
use crate::domain::records::notifications::{Notification, NotificationDraft};

use super::{AccessScope, Owned, StoreResult};

/// Notification persistence for one access scope.
#[async_trait]
pub trait NotificationStore<S: AccessScope>: Send + Sync {
    /// Create an unread notification for `owner`.
    async fn insert_notification(
        &self,
        access: &S,
        owner: &S::Owner,
        draft: &NotificationDraft,
    ) -> StoreResult<Owned<Notification, S>>;

    /// Undismissed notifications for `owner`, newest first, capped at
    /// [`NOTIFICATION_LIST_LIMIT`](crate::domain::records::notifications::NOTIFICATION_LIST_LIMIT).
    async fn list_notifications(
        &self,
        access: &S,
        owner: &S::Owner,
        include_read: bool,
    ) -> StoreResult<Vec<Owned<Notification, S>>>;

    /// Number of unread, undismissed notifications for `owner`.
    async fn count_unread(&self, access: &S, owner: &S::Owner) -> StoreResult<u64>;

    /// Mark as read; `false` when no matching row was visible.
    async fn mark_read(&self, access: &S, owner: &S::Owner, id: RecordId) -> StoreResult<bool>;

    /// Dismiss; `false` when no matching row was visible.
    async fn dismiss(&self, access: &S, owner: &S::Owner, id: RecordId) -> StoreResult<bool>;

    /// Remove every notification owned by `owner`.
    async fn delete_all_notifications(&self, access: &S, owner: &S::Owner) -> StoreResult<()>;
}
