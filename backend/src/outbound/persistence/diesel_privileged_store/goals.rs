//! Goals and their progress history on the privileged store.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::identity::NumericUserId;
use crate::domain::ports::{GoalStore, Owned, PrivilegedAccess, StoreResult};
use crate::domain::records::RecordId;
use crate::domain::records::goals::{FinancialGoal, GoalPatch, GoalProgress, GoalProgressEntry};

use super::super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::super::models::{
    FinancialGoalRow, FinancialGoalUpdate, GoalProgressRow, NewFinancialGoalRow,
    NewGoalProgressRow,
};
use super::super::schema::{financial_goals, goal_progress_history};
use super::{DieselPrivilegedStore, limit_param};

#[async_trait]
impl GoalStore<PrivilegedAccess> for DieselPrivilegedStore {
    async fn insert_goal(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        goal: &FinancialGoal,
    ) -> StoreResult<Owned<FinancialGoal, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(financial_goals::table)
            .values(&NewFinancialGoalRow::new(*owner, goal))
            .returning(FinancialGoalRow::as_returning())
            .get_result::<FinancialGoalRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_goals(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
    ) -> StoreResult<Vec<Owned<FinancialGoal, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        financial_goals::table
            .filter(financial_goals::user_id.eq(owner.get()))
            .order((financial_goals::priority.desc(), financial_goals::id.asc()))
            .select(FinancialGoalRow::as_select())
            .load::<FinancialGoalRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(FinancialGoalRow::into_record)
            .collect()
    }

    async fn find_goal(
        &self,
        _access: &PrivilegedAccess,
        id: RecordId,
    ) -> StoreResult<Option<Owned<FinancialGoal, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        financial_goals::table
            .find(id.get())
            .select(FinancialGoalRow::as_select())
            .first::<FinancialGoalRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(FinancialGoalRow::into_record)
            .transpose()
    }

    async fn update_goal(
        &self,
        access: &PrivilegedAccess,
        id: RecordId,
        patch: &GoalPatch,
    ) -> StoreResult<Option<Owned<FinancialGoal, PrivilegedAccess>>> {
        if patch.is_empty() {
            return self.find_goal(access, id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(financial_goals::table.find(id.get()))
            .set(&FinancialGoalUpdate::from(patch))
            .returning(FinancialGoalRow::as_returning())
            .get_result::<FinancialGoalRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(FinancialGoalRow::into_record)
            .transpose()
    }

    async fn delete_goal(&self, _access: &PrivilegedAccess, id: RecordId) -> StoreResult<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::delete(
                    goal_progress_history::table
                        .filter(goal_progress_history::goal_id.eq(id.get())),
                )
                .execute(conn)
                .await?;
                diesel::delete(financial_goals::table.find(id.get()))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn record_progress(
        &self,
        _access: &PrivilegedAccess,
        goal_id: RecordId,
        progress: &GoalProgress,
    ) -> StoreResult<Option<GoalProgressEntry>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let entry = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let goal = financial_goals::table
                        .find(goal_id.get())
                        .select(FinancialGoalRow::as_select())
                        .for_update()
                        .first::<FinancialGoalRow>(conn)
                        .await
                        .optional()?;
                    let Some(goal) = goal else {
                        return Ok(None);
                    };

                    let new_total = progress.new_total(goal.current_amount_cents);
                    diesel::update(financial_goals::table.find(goal.id))
                        .set(financial_goals::current_amount_cents.eq(new_total))
                        .execute(conn)
                        .await?;
                    let entry = diesel::insert_into(goal_progress_history::table)
                        .values(&NewGoalProgressRow {
                            goal_id: goal.id,
                            user_id: goal.user_id,
                            amount_cents: progress.amount_cents,
                            new_total_cents: new_total,
                            source: progress.source.as_str(),
                            note: progress.note.as_deref(),
                            progress_date: Utc::now(),
                        })
                        .returning(GoalProgressRow::as_returning())
                        .get_result::<GoalProgressRow>(conn)
                        .await?;
                    Ok(Some(entry))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        entry.map(GoalProgressRow::into_entry).transpose()
    }

    async fn list_progress(
        &self,
        _access: &PrivilegedAccess,
        goal_id: RecordId,
        limit: u32,
    ) -> StoreResult<Vec<GoalProgressEntry>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        goal_progress_history::table
            .filter(goal_progress_history::goal_id.eq(goal_id.get()))
            .order((
                goal_progress_history::progress_date.desc(),
                goal_progress_history::id.desc(),
            ))
            .limit(limit_param(limit))
            .select(GoalProgressRow::as_select())
            .load::<GoalProgressRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(GoalProgressRow::into_entry)
            .collect()
    }
}
