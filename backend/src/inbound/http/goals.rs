//! Financial goal endpoints.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::records::Record;
use crate::domain::records::goals::FinancialGoal;

use super::ApiResult;
use super::context::Authenticated;
use super::payload::{DraftBody, TargetQuery};

/// Goals of the named owner, highest priority first.
#[get("/goals")]
pub async fn list_goals(
    auth: Authenticated,
    query: web::Query<TargetQuery>,
) -> ApiResult<web::Json<Vec<Record<FinancialGoal>>>> {
    let owner = auth.target(query.into_inner().user_id);
    let goals = auth.adapters().goals.get_user_goals(owner).await?;
    Ok(web::Json(goals))
}

/// Create a financial goal.
#[post("/goals")]
pub async fn create_goal(
    auth: Authenticated,
    payload: web::Json<DraftBody<FinancialGoal>>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_owned(&auth);
    let goal = auth.adapters().goals.create_financial_goal(&draft).await?;
    Ok(HttpResponse::Created().json(goal))
}
