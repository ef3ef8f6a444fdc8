//! Debt operations.

use crate::domain::context::RequestContext;
use crate::domain::identity::NumericUserId;
use crate::domain::ports::DebtStore;
use crate::domain::records::debt::{Debt, DebtPatch, DebtPayment};
use crate::domain::records::{OwnedDraft, Record, RecordId};

use super::{RoutingFacade, RoutingResult};

impl RoutingFacade {
    /// Start tracking a debt.
    pub async fn add_debt(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<Debt>,
    ) -> RoutingResult<Record<Debt>> {
        route_owned!(self, ctx, "add_debt", payload.user_id,
            |store, access, owner| store.insert_debt(access, owner, &payload.draft))
    }

    /// Debts for `user_id`; closed and paid-off ones only on request.
    pub async fn get_user_debts(
        &self,
        ctx: &RequestContext,
        user_id: NumericUserId,
        include_inactive: bool,
    ) -> RoutingResult<Vec<Record<Debt>>> {
        route_owned!(self, ctx, "get_user_debts", user_id,
            |store, access, owner| store.list_debts(access, owner, include_inactive))
    }

    /// A single debt, `None` when not visible.
    pub async fn get_debt_by_id(
        &self,
        ctx: &RequestContext,
        id: RecordId,
    ) -> RoutingResult<Option<Record<Debt>>> {
        route_scoped!(self, ctx, "get_debt_by_id", |store, access| store.find_debt(access, id))
    }

    /// Update a debt.
    pub async fn update_debt(
        &self,
        ctx: &RequestContext,
        id: RecordId,
        patch: &DebtPatch,
    ) -> RoutingResult<Option<Record<Debt>>> {
        route_scoped!(self, ctx, "update_debt",
            |store, access| store.update_debt(access, id, patch))
    }

    /// Delete a debt.
    pub async fn delete_debt(&self, ctx: &RequestContext, id: RecordId) -> RoutingResult<()> {
        route_scoped!(self, ctx, "delete_debt", |store, access| store.delete_debt(access, id))
    }

    /// Record a payment against a debt.
    pub async fn record_debt_payment(
        &self,
        ctx: &RequestContext,
        payload: &OwnedDraft<DebtPayment>,
    ) -> RoutingResult<Record<DebtPayment>> {
        route_owned!(self, ctx, "record_debt_payment", payload.user_id,
            |store, access, owner| store.insert_payment(access, owner, &payload.draft))
    }

    /// Payments on `debt_id`, newest first.
    pub async fn get_debt_payment_history(
        &self,
        ctx: &RequestContext,
        debt_id: RecordId,
        user_id: NumericUserId,
        limit: Option<u32>,
    ) -> RoutingResult<Vec<Record<DebtPayment>>> {
        let limit = limit.unwrap_or(super::DEFAULT_HISTORY_LIMIT);
        route_owned!(self, ctx, "get_debt_payment_history", user_id,
            |store, access, owner| store.list_payments(access, owner, debt_id, limit))
    }
}
