//! Budget categories, transactions and snapshots on the tenant store.

use async_trait::async_trait;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{BudgetStore, Owned, StoreResult, TenantSession};
use crate::domain::records::RecordId;
use crate::domain::records::budget::{
    BudgetCategory, BudgetCategoryPatch, BudgetSnapshot, BudgetTransaction, CategoryKind,
    TransactionFilter,
};

use super::client::{PostgrestTenantStore, Query};
use super::dto::{
    BudgetCategoryChanges, BudgetCategoryColumns, BudgetSnapshotColumns,
    BudgetTransactionColumns, InsertDto, RowDto,
};
use super::tables::{BUDGET_CATEGORIES, BUDGET_SNAPSHOTS, BUDGET_TRANSACTIONS};

type CategoryRow = RowDto<BudgetCategoryColumns>;
type TransactionRow = RowDto<BudgetTransactionColumns>;
type SnapshotRow = RowDto<BudgetSnapshotColumns>;

#[async_trait]
impl BudgetStore<TenantSession> for PostgrestTenantStore {
    async fn insert_category(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        category: &BudgetCategory,
    ) -> StoreResult<Owned<BudgetCategory, TenantSession>> {
        let body = InsertDto::<BudgetCategoryColumns>::new(owner, category.clone());
        self.insert::<_, CategoryRow>(session, BUDGET_CATEGORIES, &body)
            .await?
            .into_record()
    }

    async fn list_categories(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        kind: Option<CategoryKind>,
    ) -> StoreResult<Vec<Owned<BudgetCategory, TenantSession>>> {
        let mut query = Query::new().owned_by(owner).order("sort_order.asc,id.asc");
        if let Some(kind) = kind {
            query = query.eq("type", kind);
        }
        self.select::<CategoryRow>(session, BUDGET_CATEGORIES, &query)
            .await?
            .into_iter()
            .map(CategoryRow::into_record)
            .collect()
    }

    async fn update_category(
        &self,
        session: &TenantSession,
        id: RecordId,
        patch: &BudgetCategoryPatch,
    ) -> StoreResult<Option<Owned<BudgetCategory, TenantSession>>> {
        let query = Query::new().eq("id", id).owned_by(session.subject());
        let row = if patch.is_empty() {
            self.select_one::<CategoryRow>(session, BUDGET_CATEGORIES, query)
                .await?
        } else {
            let changes = BudgetCategoryChanges::from(patch);
            self.update::<_, CategoryRow>(session, BUDGET_CATEGORIES, &query, &changes)
                .await?
                .into_iter()
                .next()
        };
        row.map(CategoryRow::into_record).transpose()
    }

    async fn delete_category(&self, session: &TenantSession, id: RecordId) -> StoreResult<()> {
        let query = Query::new().eq("id", id).owned_by(session.subject());
        self.delete(session, BUDGET_CATEGORIES, &query).await
    }

    async fn insert_transaction(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        transaction: &BudgetTransaction,
    ) -> StoreResult<Owned<BudgetTransaction, TenantSession>> {
        let body = InsertDto::<BudgetTransactionColumns>::new(owner, transaction.clone());
        self.insert::<_, TransactionRow>(session, BUDGET_TRANSACTIONS, &body)
            .await?
            .into_record()
    }

    async fn list_transactions(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        filter: &TransactionFilter,
    ) -> StoreResult<Vec<Owned<BudgetTransaction, TenantSession>>> {
        let mut query = Query::new()
            .owned_by(owner)
            .order("transaction_date.desc,id.desc");
        if let Some(category_id) = filter.category_id {
            query = query.eq("category_id", category_id);
        }
        if let Some(from) = filter.from {
            query = query.gte("transaction_date", from);
        }
        if let Some(until) = filter.until {
            query = query.lte("transaction_date", until);
        }
        self.select::<TransactionRow>(session, BUDGET_TRANSACTIONS, &query)
            .await?
            .into_iter()
            .map(TransactionRow::into_record)
            .collect()
    }

    async fn delete_transaction(&self, session: &TenantSession, id: RecordId) -> StoreResult<()> {
        let query = Query::new().eq("id", id).owned_by(session.subject());
        self.delete(session, BUDGET_TRANSACTIONS, &query).await
    }

    async fn insert_snapshot(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        snapshot: &BudgetSnapshot,
    ) -> StoreResult<Owned<BudgetSnapshot, TenantSession>> {
        let body = InsertDto::<BudgetSnapshotColumns>::new(owner, snapshot.clone());
        self.insert::<_, SnapshotRow>(session, BUDGET_SNAPSHOTS, &body)
            .await?
            .into_record()
    }

    async fn list_snapshots(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        limit: u32,
    ) -> StoreResult<Vec<Owned<BudgetSnapshot, TenantSession>>> {
        let query = Query::new()
            .owned_by(owner)
            .order("month_year.desc,id.desc")
            .limit(limit);
        self.select::<SnapshotRow>(session, BUDGET_SNAPSHOTS, &query)
            .await?
            .into_iter()
            .map(SnapshotRow::into_record)
            .collect()
    }
}
