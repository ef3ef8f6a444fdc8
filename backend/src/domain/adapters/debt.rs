//! Debt adapter.

use crate::domain::identity::NumericUserId;
use crate::domain::records::debt::{Debt, DebtPatch, DebtPayment};
use crate::domain::records::{OwnedDraft, Record, RecordId};

define_adapter! {
    /// Debt operations for one request.
    DebtAdapter
}

impl DebtAdapter {
    delegate_to_facade! {
        fn add_debt(&self, payload: &OwnedDraft<Debt>) -> Record<Debt>;
        /// Active debts unless `include_inactive`.
        fn get_user_debts(&self, user_id: NumericUserId, include_inactive: bool) -> Vec<Record<Debt>>;
        fn get_debt_by_id(&self, id: RecordId) -> Option<Record<Debt>>;
        fn update_debt(&self, id: RecordId, patch: &DebtPatch) -> Option<Record<Debt>>;
        fn delete_debt(&self, id: RecordId) -> ();
        fn record_debt_payment(&self, payload: &OwnedDraft<DebtPayment>) -> Record<DebtPayment>;
        fn get_debt_payment_history(&self, debt_id: RecordId, user_id: NumericUserId, limit: Option<u32>) -> Vec<Record<DebtPayment>>;
    }
}
