//! Port for debts and debt payments.

use async_trait::async_trait;

use crate::domain::records::RecordId;
use crate::domain::records::debt::{Debt, DebtPatch, DebtPayment};

use super::{AccessScope, Owned, StoreResult};

/// Debt persistence for one access scope.
#[async_trait]
pub trait DebtStore<S: AccessScope>: Send + Sync {
    /// Insert a debt owned by `owner`.
    async fn insert_debt(
        &self,
        access: &S,
        owner: &S::Owner,
        debt: &Debt,
    ) -> StoreResult<Owned<Debt, S>>;

    /// Debts owned by `owner`; only active ones unless `include_inactive`.
    async fn list_debts(
        &self,
        access: &S,
        owner: &S::Owner,
        include_inactive: bool,
    ) -> StoreResult<Vec<Owned<Debt, S>>>;

    /// A single debt, `None` when not visible.
    async fn find_debt(&self, access: &S, id: RecordId) -> StoreResult<Option<Owned<Debt, S>>>;

    /// Apply `patch`; `None` when the debt is not visible.
    async fn update_debt(
        &self,
        access: &S,
        id: RecordId,
        patch: &DebtPatch,
    ) -> StoreResult<Option<Owned<Debt, S>>>;

    /// Delete a debt.
    async fn delete_debt(&self, access: &S, id: RecordId) -> StoreResult<()>;

    /// Insert a payment owned by `owner`.
    async fn insert_payment(
        &self,
        access: &S,
        owner: &S::Owner,
        payment: &DebtPayment,
    ) -> StoreResult<Owned<DebtPayment, S>>;

    /// Up to `limit` payments on `debt_id` owned by `owner`, newest first.
    async fn list_payments(
        &self,
        access: &S,
        owner: &S::Owner,
        debt_id: RecordId,
        limit: u32,
    ) -> StoreResult<Vec<Owned<DebtPayment, S>>>;
}
