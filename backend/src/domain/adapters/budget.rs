//! Budget adapter.

use crate::domain::identity::NumericUserId;
use crate::domain::records::budget::{
    BudgetCategory, BudgetCategoryPatch, BudgetSnapshot, BudgetTransaction, CategoryKind,
    TransactionFilter,
};
use crate::domain::records::{OwnedDraft, Record, RecordId};

define_adapter! {
    /// Budget operations for one request.
    BudgetAdapter
}

impl BudgetAdapter {
    delegate_to_facade! {
        /// See [`RoutingFacade::create_budget_category`](crate::domain::routing::RoutingFacade::create_budget_category).
        fn create_budget_category(&self, payload: &OwnedDraft<BudgetCategory>) -> Record<BudgetCategory>;
        /// Categories, optionally of one kind.
        fn get_user_budget_categories(&self, user_id: NumericUserId, kind: Option<CategoryKind>) -> Vec<Record<BudgetCategory>>;
        fn update_budget_category(&self, id: RecordId, patch: &BudgetCategoryPatch) -> Option<Record<BudgetCategory>>;
        fn delete_budget_category(&self, id: RecordId) -> ();
        fn create_budget_transaction(&self, payload: &OwnedDraft<BudgetTransaction>) -> Record<BudgetTransaction>;
        fn get_user_budget_transactions(&self, user_id: NumericUserId, filter: &TransactionFilter) -> Vec<Record<BudgetTransaction>>;
        fn delete_budget_transaction(&self, id: RecordId) -> ();
        fn save_budget_snapshot(&self, payload: &OwnedDraft<BudgetSnapshot>) -> Record<BudgetSnapshot>;
        /// Newest month first; twelve unless `limit` says otherwise.
        fn get_budget_snapshots(&self, user_id: NumericUserId, limit: Option<u32>) -> Vec<Record<BudgetSnapshot>>;
    }
}
