//! Financial goal operations.

use crate::domain::context::RequestContext;
use crate::domain::identity::NumericUserId;
use crate::domain::ports::GoalStore;
use crate::domain::records::goals::{FinancialGoal, GoalPatch, GoalProgress, GoalProgressEntry};
use crate::domain::records::{OwnedDraft, Record, RecordId};

use super::{RoutingFacade, RoutingResult};

impl RoutingFacade {
    /// Create a goal.
    pub async fn create_financial_goal(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<FinancialGoal>,
    ) -> RoutingResult<Record<FinancialGoal>> {
        route_owned!(self, ctx, "create_financial_goal", payload.user_id,
            |store, access, owner| store.insert_goal(access, owner, &payload.draft))
    }

    /// Goals for `user_id`.
    pub async fn get_user_goals(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
    ) -> RoutingResult<Vec<Record<FinancialGoal>>> {
        route_owned!(self, ctx, "get_user_goals", user_id,
            |store, access, owner| store.list_goals(access, owner))
    }

    /// A single goal, `None` when not visible.
    pub async fn get_goal_by_id(
        &self,
        ctx: &RequestContext,
        id: RecordId,
    ) -> RoutingResult<Option<Record<FinancialGoal>>> {
        route_scoped!(self, ctx, "get_goal_by_id", |store, access| store.find_goal(access, id))
    }

    /// Update a goal.
    pub async fn update_financial_goal(
        &self,
        ctx: &RequestContext,
        id: RecordId,
        patch: &GoalPatch,
    ) -> RoutingResult<Option<Record<FinancialGoal>>> {
        route_scoped!(self, ctx, "update_financial_goal",
            |store, access| store.update_goal(access, id, patch))
    }

    /// Delete a goal.
    pub async fn delete_financial_goal(
        &self,
        ctx: &RequestContext,
        id: RecordId,
    ) -> RoutingResult<()> {
        route_scoped!(self, ctx, "delete_financial_goal",
            |store, access| store.delete_goal(access, id))
    }

    /// Add a contribution to a goal; `None` when the goal is not visible.
    pub async fn record_goal_progress(
        &self,
        ctx: &RequestContext,
        goal_id: RecordId,
        progress: &GoalProgress,
    ) -> RoutingResult<Option<GoalProgressEntry>> {
        route_scoped!(self, ctx, "record_goal_progress",
            |store, access| store.record_progress(access, goal_id, progress))
    }

    /// Contributions to a goal, newest first.
    pub async fn get_goal_progress_history(
        &self,
        ctx: &RequestContext,
        goal_id: RecordId,
        limit: Option<u32>,
    ) -> RoutingResult<Vec<GoalProgressEntry>> {
        let limit = limit.unwrap_or(super::DEFAULT_HISTORY_LIMIT);
        route_scoped!(self, ctx, "get_goal_progress_history",
            |store, access| store.list_progress(access, goal_id, limit))
    }
}
