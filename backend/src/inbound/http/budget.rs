//! Budget category endpoints.
//!
//! ```text
//! GET  /api/v1/budget/categories?userId=7&kind=expense
//! POST /api/v1/budget/categories {"name":"Rent","type":"expense","monthlyLimitCents":120000}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::NumericUserId;
use crate::domain::records::Record;
use crate::domain::records::budget::{BudgetCategory, CategoryKind};

use super::ApiResult;
use super::context::Authenticated;
use super::payload::DraftBody;

/// Query string for `GET /budget/categories`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    /// Supplied owner; the caller's own id when absent.
    pub user_id: Option<NumericUserId>,
    /// Restrict to income or expense categories.
    pub kind: Option<CategoryKind>,
}

/// Budget categories of the named owner.
#[get("/budget/categories")]
pub async fn list_budget_categories(
    auth: Authenticated,
    query: web::Query<CategoryQuery>,
) -> ApiResult<web::Json<Vec<Record<BudgetCategory>>>> {
    let CategoryQuery { user_id, kind } = query.into_inner();
    let categories = auth
        .adapters()
        .budget
        .get_user_budget_categories(auth.target(user_id), kind)
        .await?;
    Ok(web::Json(categories))
}

/// Create a budget category.
#[post("/budget/categories")]
pub async fn create_budget_category(
    auth: Authenticated,
    payload: web::Json<DraftBody<BudgetCategory>>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_owned(&auth);
    let category = auth.adapters().budget.create_budget_category(&draft).await?;
    Ok(HttpResponse::Created().json(category))
}
