//! Port for financial goals and their progress history.

use async_trait::async_trait;

use crate::domain::records::RecordId;
use crate::domain::records::goals::{FinancialGoal, GoalPatch, GoalProgress, GoalProgressEntry};

use super::{AccessScope, Owned, StoreResult};

/// Goal persistence for one access scope.
#[async_trait]
pub trait GoalStore<S: AccessScope>: Send + Sync {
    /// Insert a goal owned by `owner`.
    async fn insert_goal(
        &self,
        access: &S,
        owner: &S::Owner,
        goal: &FinancialGoal,
    ) -> StoreResult<Owned<FinancialGoal, S>>;

    /// Goals owned by `owner`.
    async fn list_goals(
        &self,
        access: &S,
        owner: &S::Owner,
    ) -> StoreResult<Vec<Owned<FinancialGoal, S>>>;

    /// A single goal, `None` when not visible.
    async fn find_goal(
        &self,
        access: &S,
        id: RecordId,
    ) -> StoreResult<Option<Owned<FinancialGoal, S>>>;

    /// Apply `patch`; `None` when the goal is not visible.
    async fn update_goal(
        &self,
        access: &S,
        id: RecordId,
        patch: &GoalPatch,
    ) -> StoreResult<Option<Owned<FinancialGoal, S>>>;

    /// Delete a goal and its history.
    async fn delete_goal(&self, access: &S, id: RecordId) -> StoreResult<()>;

    /// Add `progress` to the goal's current amount and append a history
    /// entry carrying the new total. `None` when the goal is not visible.
    async fn record_progress(
        &self,
        access: &S,
        goal_id: RecordId,
        progress: &GoalProgress,
    ) -> StoreResult<Option<GoalProgressEntry>>;

    /// Up to `limit` history entries for `goal_id`, newest first.
    async fn list_progress(
        &self,
        access: &S,
        goal_id: RecordId,
        limit: u32,
    ) -> StoreResult<Vec<GoalProgressEntry>>;
}
