//! Debts and payments on the privileged store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::identity::NumericUserId;
use crate::domain::ports::{DebtStore, Owned, PrivilegedAccess, StoreResult};
use crate::domain::records::RecordId;
use crate::domain::records::debt::{Debt, DebtPatch, DebtPayment, DebtStatus};

use super::super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::super::models::{DebtPaymentRow, DebtRow, DebtUpdate, NewDebtPaymentRow, NewDebtRow};
use super::super::schema::{debt_payments, debts};
use super::{DieselPrivilegedStore, limit_param};

#[async_trait]
impl DebtStore<PrivilegedAccess> for DieselPrivilegedStore {
    async fn insert_debt(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        debt: &Debt,
    ) -> StoreResult<Owned<Debt, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(debts::table)
            .values(&NewDebtRow::new(*owner, debt))
            .returning(DebtRow::as_returning())
            .get_result::<DebtRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_debts(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        include_inactive: bool,
    ) -> StoreResult<Vec<Owned<Debt, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = debts::table
            .filter(debts::user_id.eq(owner.get()))
            .order((debts::created_at.desc(), debts::id.desc()))
            .select(DebtRow::as_select())
            .into_boxed();
        if !include_inactive {
            query = query.filter(debts::status.eq(DebtStatus::Active.as_str()));
        }
        query
            .load::<DebtRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(DebtRow::into_record)
            .collect()
    }

    async fn find_debt(
        &self,
        _access: &PrivilegedAccess,
        id: RecordId,
    ) -> StoreResult<Option<Owned<Debt, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        debts::table
            .find(id.get())
            .select(DebtRow::as_select())
            .first::<DebtRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(DebtRow::into_record)
            .transpose()
    }

    async fn update_debt(
        &self,
        access: &PrivilegedAccess,
        id: RecordId,
        patch: &DebtPatch,
    ) -> StoreResult<Option<Owned<Debt, PrivilegedAccess>>> {
        if patch.is_empty() {
            return self.find_debt(access, id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(debts::table.find(id.get()))
            .set(&DebtUpdate::from(patch))
            .returning(DebtRow::as_returning())
            .get_result::<DebtRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(DebtRow::into_record)
            .transpose()
    }

    async fn delete_debt(&self, _access: &PrivilegedAccess, id: RecordId) -> StoreResult<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(debts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_payment(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        payment: &DebtPayment,
    ) -> StoreResult<Owned<DebtPayment, PrivilegedAccess>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(debt_payments::table)
            .values(&NewDebtPaymentRow::new(*owner, payment))
            .returning(DebtPaymentRow::as_returning())
            .get_result::<DebtPaymentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
    }

    async fn list_payments(
        &self,
        _access: &PrivilegedAccess,
        owner: &NumericUserId,
        debt_id: RecordId,
        limit: u32,
    ) -> StoreResult<Vec<Owned<DebtPayment, PrivilegedAccess>>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        debt_payments::table
            .filter(debt_payments::debt_id.eq(debt_id.get()))
            .filter(debt_payments::user_id.eq(owner.get()))
            .order((debt_payments::payment_date.desc(), debt_payments::id.desc()))
            .limit(limit_param(limit))
            .select(DebtPaymentRow::as_select())
            .load::<DebtPaymentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(DebtPaymentRow::into_record)
            .collect()
    }
}
