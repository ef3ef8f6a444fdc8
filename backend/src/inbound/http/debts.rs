//! Debt endpoints.

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::NumericUserId;
use crate::domain::records::Record;
use crate::domain::records::debt::Debt;

use super::ApiResult;
use super::context::Authenticated;

/// Query string for `GET /debts`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtQuery {
    /// Supplied owner; the caller's own id when absent.
    pub user_id: Option<NumericUserId>,
    /// Include paid-off and closed debts.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Debts of the named owner, newest first.
#[get("/debts")]
pub async fn list_debts(
    auth: Authenticated,
    query: web::Query<DebtQuery>,
) -> ApiResult<web::Json<Vec<Record<Debt>>>> {
    let DebtQuery {
        user_id,
        include_inactive,
    } = query.into_inner();
    let debts = auth
        .adapters()
        .debt
        .get_user_debts(auth.target(user_id), include_inactive)
        .await?;
    Ok(web::Json(debts))
}
