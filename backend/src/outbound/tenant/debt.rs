//! Debts and payments on the tenant store.

use async_trait::async_trait;

use crate::domain::identity::SubjectId;
use crate::domain::ports::{DebtStore, Owned, StoreResult, TenantSession};
use crate::domain::records::RecordId;
use crate::domain::records::debt::{Debt, DebtPatch, DebtPayment, DebtStatus};

use super::client::{PostgrestTenantStore, Query};
use super::dto::{DebtChanges, DebtColumns, DebtPaymentColumns, InsertDto, RowDto};
use super::tables::{DEBT_PAYMENTS, DEBTS};

type DebtRow = RowDto<DebtColumns>;
type PaymentRow = RowDto<DebtPaymentColumns>;

#[async_trait]
impl DebtStore<TenantSession> for PostgrestTenantStore {
    async fn insert_debt(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        debt: &Debt,
    ) -> StoreResult<Owned<Debt, TenantSession>> {
        let body = InsertDto::<DebtColumns>::new(owner, debt.clone());
        self.insert::<_, DebtRow>(session, DEBTS, &body)
            .await?
            .into_record()
    }

    async fn list_debts(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        include_inactive: bool,
    ) -> StoreResult<Vec<Owned<Debt, TenantSession>>> {
        let mut query = Query::new().owned_by(owner).order("created_at.desc,id.desc");
        if !include_inactive {
            query = query.eq("status", DebtStatus::Active);
        }
        self.select::<DebtRow>(session, DEBTS, &query)
            .await?
            .into_iter()
            .map(DebtRow::into_record)
            .collect()
    }

    async fn find_debt(
        &self,
        session: &TenantSession,
        id: RecordId,
    ) -> StoreResult<Option<Owned<Debt, TenantSession>>> {
        let query = Query::new().eq("id", id).owned_by(session.subject());
        self.select_one::<DebtRow>(session, DEBTS, query)
            .await?
            .map(DebtRow::into_record)
            .transpose()
    }

    async fn update_debt(
        &self,
        session: &TenantSession,
        id: RecordId,
        patch: &DebtPatch,
    ) -> StoreResult<Option<Owned<Debt, TenantSession>>> {
        if patch.is_empty() {
            return self.find_debt(session, id).await;
        }
        let query = Query::new().eq("id", id).owned_by(session.subject());
        self.update::<_, DebtRow>(session, DEBTS, &query, &DebtChanges::from(patch))
            .await?
            .into_iter()
            .next()
            .map(DebtRow::into_record)
            .transpose()
    }

    async fn delete_debt(&self, session: &TenantSession, id: RecordId) -> StoreResult<()> {
        let query = Query::new().eq("id", id).owned_by(session.subject());
        self.delete(session, DEBTS, &query).await
    }

    async fn insert_payment(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        payment: &DebtPayment,
    ) -> StoreResult<Owned<DebtPayment, TenantSession>> {
        let body = InsertDto::<DebtPaymentColumns>::new(owner, payment.clone());
        self.insert::<_, PaymentRow>(session, DEBT_PAYMENTS, &body)
            .await?
            .into_record()
    }

    async fn list_payments(
        &self,
        session: &TenantSession,
        owner: &SubjectId,
        debt_id: RecordId,
        limit: u32,
    ) -> StoreResult<Vec<Owned<DebtPayment, TenantSession>>> {
        let query = Query::new()
            .eq("debt_id", debt_id)
            .owned_by(owner)
            .order("payment_date.desc,id.desc")
            .limit(limit);
        self.select::<PaymentRow>(session, DEBT_PAYMENTS, &query)
            .await?
            .into_iter()
            .map(PaymentRow::into_record)
            .collect()
    }
}
