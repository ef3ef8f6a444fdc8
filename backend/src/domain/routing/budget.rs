//! Budget operations.

use crate::domain::context::RequestContext;
use crate::domain::identity::NumericUserId;
use crate::domain::ports::BudgetStore;
use crate::domain::records::budget::{
    BudgetCategory, BudgetCategoryPatch, BudgetSnapshot, BudgetTransaction, CategoryKind,
    TransactionFilter,
};
use crate::domain::records::{OwnedDraft, Record, RecordId};

use super::{RoutingFacade, RoutingResult};

impl RoutingFacade {
    /// Create a category, stamped with the caller on the tenant path.
    pub async fn create_budget_category(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<BudgetCategory>,
    ) -> RoutingResult<Record<BudgetCategory>> {
        route_owned!(self, ctx, "create_budget_category", payload.user_id,
            |store, access, owner| store.insert_category(access, owner, &payload.draft))
    }

    /// Categories for `user_id` (the caller's own on the tenant path).
    pub async fn get_user_budget_categories(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        kind: Option<CategoryKind>,
    ) -> RoutingResult<Vec<Record<BudgetCategory>>> {
        route_owned!(self, ctx, "get_user_budget_categories", user_id,
            |store, access, owner| store.list_categories(access, owner, kind))
    }

    /// Update a category; `None` when it is not visible to the caller.
    pub async fn update_budget_category(
        &self,
        ctx: &RequestContext,
        id: RecordId,
        patch: &BudgetCategoryPatch,
    ) -> RoutingResult<Option<Record<BudgetCategory>>> {
        route_scoped!(self, ctx, "update_budget_category",
            |store, access| store.update_category(access, id, patch))
    }

    /// Delete a category.
    pub async fn delete_budget_category(
        &self,
        ctx: &RequestContext,
        id: RecordId,
    ) -> RoutingResult<()> {
        route_scoped!(self, ctx, "delete_budget_category",
            |store, access| store.delete_category(access, id))
    }

    /// Record an income or expense entry.
    pub async fn create_budget_transaction(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<BudgetTransaction>,
    ) -> RoutingResult<Record<BudgetTransaction>> {
        route_owned!(self, ctx, "create_budget_transaction", payload.user_id,
            |store, access, owner| store.insert_transaction(access, owner, &payload.draft))
    }

    /// Transactions for `user_id` matching `filter`, newest first.
    pub async fn get_user_budget_transactions(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        filter: &TransactionFilter,
    ) -> RoutingResult<Vec<Record<BudgetTransaction>>> {
        route_owned!(self, ctx, "get_user_budget_transactions", user_id,
            |store, access, owner| store.list_transactions(access, owner, filter))
    }

    /// Delete a transaction.
    pub async fn delete_budget_transaction(
        &self,
        ctx: &RequestContext,
        id: RecordId,
    ) -> RoutingResult<()> {
        route_scoped!(self, ctx, "delete_budget_transaction",
            |store, access| store.delete_transaction(access, id))
    }

    /// Store a month-end snapshot.
    pub async fn save_budget_snapshot(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<BudgetSnapshot>,
    ) -> RoutingResult<Record<BudgetSnapshot>> {
        route_owned!(self, ctx, "save_budget_snapshot", payload.user_id,
            |store, access, owner| store.insert_snapshot(access, owner, &payload.draft))
    }

    /// Recent snapshots, newest month first.
    pub async fn get_budget_snapshots(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        limit: Option<u32>,
    ) -> RoutingResult<Vec<Record<BudgetSnapshot>>> {
        let limit = limit.unwrap_or(super::DEFAULT_SNAPSHOT_LIMIT);
        route_owned!(self, ctx, "get_budget_snapshots", user_id,
            |store, access, owner| store.list_snapshots(access, owner, limit))
    }
}
