//! In-app notifications about updated facts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Listings never return more than this many notifications.
pub const NOTIFICATION_LIST_LIMIT: usize = 50;

/// A notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the user has opened it.
    pub is_read: bool,
    /// When it was opened.
    pub read_at: Option<DateTime<Utc>>,
    /// Whether the user has dismissed it.
    pub is_dismissed: bool,
    /// When it was dismissed.
    pub dismissed_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Whether the notification belongs in a listing.
    #[must_use]
    pub const fn is_listed(&self, include_read: bool) -> bool {
        !self.is_dismissed && (include_read || !self.is_read)
    }

    /// Whether it counts towards the unread badge.
    #[must_use]
    pub const fn is_unread(&self) -> bool {
        !self.is_read && !self.is_dismissed
    }
}

/// Content of a new notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    /// Headline.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl NotificationDraft {
    /// An unread, undismissed notification with this content.
    #[must_use]
    pub fn into_unread(self) -> Notification {
        Notification {
            title: self.title,
            message: self.message,
            is_read: false,
            read_at: None,
            is_dismissed: false,
            dismissed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn notification(is_read: bool, is_dismissed: bool) -> Notification {
        Notification {
            is_read,
            is_dismissed,
            ..NotificationDraft {
                title: "Fact updated".to_owned(),
                message: "The capital moved".to_owned(),
            }
            .into_unread()
        }
    }

    #[rstest]
    #[case(false, false, false, true)]
    #[case(true, false, false, false)]
    #[case(true, false, true, true)]
    #[case(false, true, true, false)]
    fn listing_hides_dismissed_and_optionally_read(
        #[case] is_read: bool,
        #[case] is_dismissed: bool,
        #[case] include_read: bool,
        #[case] listed: bool,
    ) {
        assert_eq!(notification(is_read, is_dismissed).is_listed(include_read), listed);
    }

    #[rstest]
    fn dismissed_notifications_are_not_unread() {
        assert!(!notification(false, true).is_unread());
        assert!(notification(false, false).is_unread());
    }
}
