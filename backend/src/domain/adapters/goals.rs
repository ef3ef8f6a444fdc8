//! Goals adapter.

use crate::domain::identity::NumericUserId;
use crate::domain::records::goals::{FinancialGoal, GoalPatch, GoalProgress, GoalProgressEntry};
use crate::domain::records::{OwnedDraft, Record, RecordId};

define_adapter! {
    /// Financial goal operations for one request.
    GoalsAdapter
}

impl GoalsAdapter {
    delegate_to_facade! {
        fn create_financial_goal(&self, payload: &OwnedDraft<FinancialGoal>) -> Record<FinancialGoal>;
        fn get_user_goals(&self, user_id: NumericUserId) -> Vec<Record<FinancialGoal>>;
        fn get_goal_by_id(&self, id: RecordId) -> Option<Record<FinancialGoal>>;
        fn update_financial_goal(&self, id: RecordId, patch: &GoalPatch) -> Option<Record<FinancialGoal>>;
        fn delete_financial_goal(&self, id: RecordId) -> ();
        /// `None` when the goal is not visible to the caller.
        fn record_goal_progress(&self, goal_id: RecordId, progress: &GoalProgress) -> Option<GoalProgressEntry>;
        fn get_goal_progress_history(&self, goal_id: RecordId, limit: Option<u32>) -> Vec<GoalProgressEntry>;
    }
}
