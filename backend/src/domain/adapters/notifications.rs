//! Notification adapter.

use crate::domain::identity::NumericUserId;
use crate::domain::records::notifications::{Notification, NotificationDraft};
use crate::domain::records::{OwnedDraft, Record, RecordId};

define_adapter! {
    /// Notification operations for one request.
    NotificationAdapter
}

impl NotificationAdapter {
    delegate_to_facade! {
        fn create_notification(&self, payload: &OwnedDraft<NotificationDraft>) -> Record<Notification>;
        fn get_user_notifications(&self, user_id: NumericUserId, include_read: bool) -> Vec<Record<Notification>>;
        fn get_unread_notification_count(&self, user_id: NumericUserId) -> u64;
        fn mark_notification_as_read(&self, user_id: NumericUserId, id: RecordId) -> bool;
        fn dismiss_notification(&self, user_id: NumericUserId, id: RecordId) -> bool;
        fn delete_all_user_notifications(&self, user_id: NumericUserId) -> ();
    }
}
