//! Goals and their progress history on the tenant store.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{GoalStore, Owned, StoreResult, TenantSession};
use crate::domain::records::RecordId;
use crate::domain::records::goals::{FinancialGoal, GoalPatch, GoalProgress, GoalProgressEntry};

use super::client::{PostgrestTenantStore, Query};
use super::dto::{
    Columns as _, FinancialGoalColumns, GoalChanges, GoalProgressColumns, InsertDto,
    NewProgressDto, RowDto,
};
use super::tables::{FINANCIAL_GOALS, GOAL_PROGRESS};

type GoalRow = RowDto<FinancialGoalColumns>;

#[async_trait]
impl GoalStore<TenantSession> for PostgrestTenantStore {
    async fn insert_goal(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        goal: &FinancialGoal,
    ) -> StoreResult<Owned<FinancialGoal, TenantSession>> {
        let body = InsertDto::<FinancialGoalColumns>::new(owner, goal.clone());
        self.insert::<_, GoalRow>(session, FINANCIAL_GOALS, &body)
            .await?
            .into_record()
    }

    async fn list_goals(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
    ) -> StoreResult<Vec<Owned<FinancialGoal, TenantSession>>> {
        let query = Query::new().owned_by(owner).order("priority.desc,id.asc");
        self.select::<GoalRow>(session, FINANCIAL_GOALS, &query)
            .await?
            .into_iter()
            .map(GoalRow::into_record)
            .collect()
    }

    async fn find_goal(
        &self,
        session: &TenantSession,
        id: RecordId,
    ) -> StoreResult<Option<Owned<FinancialGoal, TenantSession>>> {
        let query = Query::new().eq("id", id).owned_by(session.subject());
        self.select_one::<GoalRow>(session, FINANCIAL_GOALS, query)
            .await?
            .map(GoalRow::into_record)
            .transpose()
    }

    async fn update_goal(
        &self,
        session: &TenantSession,
        id: RecordId,
        patch: &GoalPatch,
    ) -> StoreResult<Option<Owned<FinancialGoal, TenantSession>>> {
        if patch.is_empty() {
            return self.find_goal(session, id).await;
        }
        let query = Query::new().eq("id", id).owned_by(session.subject());
        self.update::<_, GoalRow>(session, FINANCIAL_GOALS, &query, &GoalChanges::from(patch))
            .await?
            .into_iter()
            .next()
            .map(GoalRow::into_record)
            .transpose()
    }

    async fn delete_goal(&self, session: &TenantSession, id: RecordId) -> StoreResult<()> {
        let history = Query::new()
            .eq("goal_id", id)
            .owned_by(session.subject());
        self.delete(session, GOAL_PROGRESS, &history).await?;
        let goal = Query::new().eq("id", id).owned_by(session.subject());
        self.delete(session, FINANCIAL_GOALS, &goal).await
    }

    async fn record_progress(
        &self,
        session: &TenantSession,
        goal_id: RecordId,
        progress: &GoalProgress,
    ) -> StoreResult<Option<GoalProgressEntry>> {
        let Some(goal) = self.find_goal(session, goal_id).await? else {
            return Ok(None);
        };

        let new_total = progress.new_total(goal.fields.current_amount_cents);
        let query = Query::new().eq("id", goal.id).owned_by(session.subject());
        self.update::<_, serde::de::IgnoredAny>(
            session,
            FINANCIAL_GOALS,
            &query,
            &json!({ "current_amount_cents": new_total }),
        )
        .await?;

        let entry = NewProgressDto {
            goal_id: goal.id,
            user_id: goal.owner.as_str(),
            amount_cents: progress.amount_cents,
            new_total_cents: new_total,
            source: progress.source,
            note: progress.note.as_deref(),
            progress_date: Utc::now(),
        };
        let stored = self
            .insert::<_, GoalProgressColumns>(session, GOAL_PROGRESS, &entry)
            .await?;
        Ok(Some(stored.into_domain()))
    }

    async fn list_progress(
        &self,
        session: &TenantSession,
        goal_id: RecordId,
        limit: u32,
    ) -> StoreResult<Vec<GoalProgressEntry>> {
        let query = Query::new()
            .eq("goal_id", goal_id)
            .owned_by(session.subject())
            .order("progress_date.desc,id.desc")
            .limit(limit);
        Ok(self
            .select::<GoalProgressColumns>(session, GOAL_PROGRESS, &query)
            .await?
            .into_iter()
            .map(GoalProgressColumns::into_domain)
            .collect())
    }
}
