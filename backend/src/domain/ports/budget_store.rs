//! Port for budget categories, transactions and snapshots.
//!
//! Both stores implement the same signature family; the access scope type
//! decides which one and in which owner representation rows come back.

use async_trait::async_trait;

use crate::domain::records::budget::{
    BudgetCategory, BudgetCategoryPatch, BudgetSnapshot, BudgetTransaction, CategoryKind,
    TransactionFilter,
};
use crate::domain::records::RecordId;

use super::{AccessScope, Owned, StoreResult};

/// Budget persistence for one access scope.
///
/// Listing operations filter by `owner`. By-id operations on the tenant
/// store are additionally limited to the session's own rows.
#[async_trait]
pub trait BudgetStore<S: AccessScope>: Send + Sync {
    /// Insert a category owned by `owner`.
    async fn insert_category(
        &self,
        access: &S,
        owner: &S::Owner,
        category: &BudgetCategory,
    ) -> StoreResult<Owned<BudgetCategory, S>>;

    /// Categories owned by `owner`, optionally of one kind.
    async fn list_categories(
        &self,
        access: &S,
        owner: &S::Owner,
        kind: Option<CategoryKind>,
    ) -> StoreResult<Vec<Owned<BudgetCategory, S>>>;

    /// Apply `patch`; `None` when the category is not visible.
    async fn update_category(
        &self,
        access: &S,
        id: RecordId,
        patch: &BudgetCategoryPatch,
    ) -> StoreResult<Option<Owned<BudgetCategory, S>>>;

    /// Delete a category. Deleting an invisible row is not an error.
    async fn delete_category(&self, access: &S, id: RecordId) -> StoreResult<()>;

    /// Insert a transaction owned by `owner`.
    async fn insert_transaction(
        &self,
        access: &S,
        owner: &S::Owner,
        transaction: &BudgetTransaction,
    ) -> StoreResult<Owned<BudgetTransaction, S>>;

    /// Transactions owned by `owner` matching `filter`, newest first.
    async fn list_transactions(
        &self,
        access: &S,
        owner: &S::Owner,
        filter: &TransactionFilter,
    ) -> StoreResult<Vec<Owned<BudgetTransaction, S>>>;

    /// Delete a transaction.
    async fn delete_transaction(&self, access: &S, id: RecordId) -> StoreResult<()>;

    /// Insert a monthly snapshot owned by `owner`.
    async fn insert_snapshot(
        &self,
        access: &S,
        owner: &S::Owner,
        snapshot: &BudgetSnapshot,
    ) -> StoreResult<Owned<BudgetSnapshot, S>>;

    /// Up to `limit` snapshots owned by `owner`, newest month first.
    async fn list_snapshots(
        &self,
        access: &S,
        owner: &S::Owner,
        limit: u32,
    ) -> StoreResult<Vec<Owned<BudgetSnapshot, S>>>;
}
