//! Budget categories, transactions and snapshots on the privileged store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::identity::NumericUserId;
use crate::domain::ports::{BudgetStore, Owned, PrivilegedAccess, StoreResult};
use crate::domain::records::RecordId;
use crate::domain::records::budget::{
    BudgetCategory, BudgetCategoryPatch, BudgetSnapshot, BudgetTransaction, CategoryKind,
    TransactionFilter,
};

use super::super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::super::models::{
    BudgetCategoryRow, BudgetCategoryUpdate, BudgetSnapshotRow, BudgetTransactionRow,
    NewBudgetCategoryRow, NewBudgetSnapshotRow, NewBudgetTransactionRow,
};
use super::super::schema::{budget_categories, budget_transactions, debt_budget_snapshots};
use super::{DieselPrivilegedStore, limit_param};

#[async_trait]
impl BudgetStore<PrivilegedAccess> for DieselPrivilegedStore {
    async fn insert_category(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        category: &BudgetCategory,
    ) -> StoreResult<Owned<BudgetCategory, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(budget_categories::table)
            .values(&NewBudgetCategoryRow::new(*owner, category))
            .returning(BudgetCategoryRow::as_returning())
            .get_result::<BudgetCategoryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_categories(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        kind: Option<CategoryKind>,
    ) -> StoreResult<Vec<Owned<BudgetCategory, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = budget_categories::table
            .filter(budget_categories::user_id.eq(owner.get()))
            .order((budget_categories::sort_order.asc(), budget_categories::id.asc()))
            .select(BudgetCategoryRow::as_select())
            .into_boxed();
        if let Some(kind) = kind {
            query = query.filter(budget_categories::kind.eq(kind.as_str()));
        }
        query
            .load::<BudgetCategoryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(BudgetCategoryRow::into_record)
            .collect()
    }

    async fn update_category(
        &self,
        _access: &PrivilegedAccess,
        id: RecordId,
        patch: &BudgetCategoryPatch,
    ) -> StoreResult<Option<Owned<BudgetCategory, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = if patch.is_empty() {
            budget_categories::table
                .find(id.get())
                .select(BudgetCategoryRow::as_select())
                .first::<BudgetCategoryRow>(&mut conn)
                .await
                .optional()
        } else {
            diesel::update(budget_categories::table.find(id.get()))
                .set(&BudgetCategoryUpdate::from(patch))
                .returning(BudgetCategoryRow::as_returning())
                .get_result::<BudgetCategoryRow>(&mut conn)
                .await
                .optional()
        };
        row.map_err(map_diesel_error)?
            .map(BudgetCategoryRow::into_record)
            .transpose()
    }

    async fn delete_category(&self, _access: &PrivilegedAccess, id: RecordId) -> StoreResult<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(budget_categories::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_transaction(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        transaction: &BudgetTransaction,
    ) -> StoreResult<Owned<BudgetTransaction, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(budget_transactions::table)
            .values(&NewBudgetTransactionRow::new(*owner, transaction))
            .returning(BudgetTransactionRow::as_returning())
            .get_result::<BudgetTransactionRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_transactions(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        filter: &TransactionFilter,
    ) -> StoreResult<Vec<Owned<BudgetTransaction, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = budget_transactions::table
            .filter(budget_transactions::user_id.eq(owner.get()))
            .order((
                budget_transactions::transaction_date.desc(),
                budget_transactions::id.desc(),
            ))
            .select(BudgetTransactionRow::as_select())
            .into_boxed();
        if let Some(category_id) = filter.category_id {
            query = query.filter(budget_transactions::category_id.eq(category_id.get()));
        }
        if let Some(from) = filter.from {
            query = query.filter(budget_transactions::transaction_date.ge(from));
        }
        if let Some(until) = filter.until {
            query = query.filter(budget_transactions::transaction_date.le(until));
        }
        query
            .load::<BudgetTransactionRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(BudgetTransactionRow::into_record)
            .collect()
    }

    async fn delete_transaction(
        &self,
        _access: &PrivilegedAccess,
        id: RecordId,
    ) -> StoreResult<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(budget_transactions::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_snapshot(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        snapshot: &BudgetSnapshot,
    ) -> StoreResult<Owned<BudgetSnapshot, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(debt_budget_snapshots::table)
            .values(&NewBudgetSnapshotRow::new(*owner, snapshot))
            .returning(BudgetSnapshotRow::as_returning())
            .get_result::<BudgetSnapshotRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_snapshots(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        limit: u32,
    ) -> StoreResult<Vec<Owned<BudgetSnapshot, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        debt_budget_snapshots::table
            .filter(debt_budget_snapshots::user_id.eq(owner.get()))
            .order((
                debt_budget_snapshots::month_year.desc(),
                debt_budget_snapshots::id.desc(),
            ))
            .limit(limit_param(limit))
            .select(BudgetSnapshotRow::as_select())
            .load::<BudgetSnapshotRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(BudgetSnapshotRow::into_record)
            .collect()
    }
}
