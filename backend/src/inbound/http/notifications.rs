//! Notification endpoints.

use actix_web::{get, web};
use serde::Serialize;

use super::ApiResult;
use super::context::Authenticated;
use super::payload::TargetQuery;

/// Response body for `GET /notifications/unread-count`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    /// Unread, undismissed notifications.
    pub count: u64,
}

/// Number of unread notifications for the named owner.
#[get("/notifications/unread-count")]
pub async fn unread_count(
    auth: Authenticated,
    query: web::Query<TargetQuery>,
) -> ApiResult<web::Json<UnreadCount>> {
    let owner = auth.target(query.into_inner().user_id);
    let count = auth
        .adapters()
        .notifications
        .get_unread_notification_count(owner)
        .await?;
    Ok(web::Json(UnreadCount { count }))
}
