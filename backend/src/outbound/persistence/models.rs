//! Internal Diesel row structs for the privileged store.
//!
//! These types never leave the persistence layer. Read rows convert into
//! domain records keyed by [`NumericUserId`]; integer flags become booleans
//! and stored labels are parsed into their enums, failing as decode errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::identity::{NumericUserId, Role};
use crate::domain::ports::{StoreError, StoreResult};
use crate::domain::records::budget::{
    BudgetCategory, BudgetCategoryPatch, BudgetSnapshot, BudgetTransaction, MonthYear,
};
use crate::domain::records::conversations::{Conversation, ConversationFeedback};
use crate::domain::records::debt::{Debt, DebtPatch, DebtPayment};
use crate::domain::records::goals::{FinancialGoal, GoalPatch, GoalProgressEntry};
use crate::domain::records::iot::{DeviceStateUpdate, IoTCommand, IoTDevice};
use crate::domain::records::learning::{UserVocabulary, VocabularyItem};
use crate::domain::records::notifications::Notification;
use crate::domain::records::profiles::{ProfilePatch, UserProfile};
use crate::domain::records::translation::{SavedTranslation, TranslationCategory};
use crate::domain::records::{RecordId, Stored};

use super::diesel_error_mapping::map_unknown_variant;
use super::schema::{
    budget_categories, budget_transactions, conversation_feedback, conversations,
    debt_budget_snapshots, debt_payments, debts, fact_update_notifications, financial_goals,
    goal_progress_history, iot_command_history, iot_devices, saved_translations,
    translation_categories, user_profiles, user_vocabulary, users, vocabulary_items,
};

/// A record keyed the way the privileged store keys it.
pub(crate) type PrivilegedRow<T> = Stored<T, NumericUserId>;

pub(crate) fn owner_from_column(user_id: i64) -> StoreResult<NumericUserId> {
    NumericUserId::new(user_id).map_err(|err| StoreError::decode(err.to_string()))
}

pub(crate) const fn flag_to_column(value: bool) -> i32 {
    if value { 1 } else { 0 }
}

const fn flag_from_column(value: i32) -> bool {
    value != 0
}

fn stored<T>(
    id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
    fields: T,
) -> StoreResult<PrivilegedRow<T>> {
    Ok(Stored {
        id: RecordId::new(id),
        owner: owner_from_column(user_id)?,
        created_at,
        fields,
    })
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub role: String,
}

impl UserRow {
    pub(crate) fn role(&self) -> StoreResult<Role> {
        self.role
            .parse()
            .map_err(|_| StoreError::decode(format!("unknown role: {}", self.role)))
    }
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = budget_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BudgetCategoryRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub kind: String,
    pub monthly_limit_cents: i64,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_default: i32,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl BudgetCategoryRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<BudgetCategory>> {
        let fields = BudgetCategory {
            name: self.name,
            kind: self.kind.parse().map_err(map_unknown_variant)?,
            monthly_limit_cents: self.monthly_limit_cents,
            color: self.color,
            icon: self.icon,
            is_default: flag_from_column(self.is_default),
            sort_order: self.sort_order,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = budget_categories)]
pub(crate) struct NewBudgetCategoryRow<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub kind: &'a str,
    pub monthly_limit_cents: i64,
    pub color: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub is_default: i32,
    pub sort_order: i32,
}

impl<'a> NewBudgetCategoryRow<'a> {
    pub(crate) fn new(owner: NumericUserId, category: &'a BudgetCategory) -> Self {
        Self {
            user_id: owner.get(),
            name: &category.name,
            kind: category.kind.as_str(),
            monthly_limit_cents: category.monthly_limit_cents,
            color: category.color.as_deref(),
            icon: category.icon.as_deref(),
            is_default: flag_to_column(category.is_default),
            sort_order: category.sort_order,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = budget_categories)]
pub(crate) struct BudgetCategoryUpdate<'a> {
    pub name: Option<&'a str>,
    pub monthly_limit_cents: Option<i64>,
    pub color: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub sort_order: Option<i32>,
}

impl<'a> From<&'a BudgetCategoryPatch> for BudgetCategoryUpdate<'a> {
    fn from(patch: &'a BudgetCategoryPatch) -> Self {
        Self {
            name: patch.name.as_deref(),
            monthly_limit_cents: patch.monthly_limit_cents,
            color: patch.color.as_deref(),
            icon: patch.icon.as_deref(),
            sort_order: patch.sort_order,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = budget_transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BudgetTransactionRow {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount_cents: i64,
    pub transaction_date: DateTime<Utc>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_recurring: i32,
    pub created_at: DateTime<Utc>,
}

impl BudgetTransactionRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<BudgetTransaction>> {
        let fields = BudgetTransaction {
            category_id: RecordId::new(self.category_id),
            amount_cents: self.amount_cents,
            transaction_date: self.transaction_date,
            description: self.description,
            notes: self.notes,
            is_recurring: flag_from_column(self.is_recurring),
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = budget_transactions)]
pub(crate) struct NewBudgetTransactionRow<'a> {
    pub user_id: i64,
    pub category_id: i64,
    pub amount_cents: i64,
    pub transaction_date: DateTime<Utc>,
    pub description: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub is_recurring: i32,
}

impl<'a> NewBudgetTransactionRow<'a> {
    pub(crate) fn new(owner: NumericUserId, transaction: &'a BudgetTransaction) -> Self {
        Self {
            user_id: owner.get(),
            category_id: transaction.category_id.get(),
            amount_cents: transaction.amount_cents,
            transaction_date: transaction.transaction_date,
            description: transaction.description.as_deref(),
            notes: transaction.notes.as_deref(),
            is_recurring: flag_to_column(transaction.is_recurring),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = debt_budget_snapshots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BudgetSnapshotRow {
    pub id: i64,
    pub user_id: i64,
    pub month_year: String,
    pub total_income_cents: i64,
    pub total_expenses_cents: i64,
    pub total_debt_payments_cents: i64,
    pub available_for_debt_cents: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BudgetSnapshotRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<BudgetSnapshot>> {
        let fields = BudgetSnapshot {
            month_year: MonthYear::new(self.month_year)
                .map_err(|err| StoreError::decode(err.to_string()))?,
            total_income_cents: self.total_income_cents,
            total_expenses_cents: self.total_expenses_cents,
            total_debt_payments_cents: self.total_debt_payments_cents,
            available_for_debt_cents: self.available_for_debt_cents,
            notes: self.notes,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = debt_budget_snapshots)]
pub(crate) struct NewBudgetSnapshotRow<'a> {
    pub user_id: i64,
    pub month_year: &'a str,
    pub total_income_cents: i64,
    pub total_expenses_cents: i64,
    pub total_debt_payments_cents: i64,
    pub available_for_debt_cents: i64,
    pub notes: Option<&'a str>,
}

impl<'a> NewBudgetSnapshotRow<'a> {
    pub(crate) fn new(owner: NumericUserId, snapshot: &'a BudgetSnapshot) -> Self {
        Self {
            user_id: owner.get(),
            month_year: snapshot.month_year.as_str(),
            total_income_cents: snapshot.total_income_cents,
            total_expenses_cents: snapshot.total_expenses_cents,
            total_debt_payments_cents: snapshot.total_debt_payments_cents,
            available_for_debt_cents: snapshot.available_for_debt_cents,
            notes: snapshot.notes.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Debt
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = debts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DebtRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub debt_type: String,
    pub original_balance_cents: i64,
    pub current_balance_cents: i64,
    pub interest_rate_bps: i32,
    pub minimum_payment_cents: i64,
    pub due_day: Option<i16>,
    pub creditor: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DebtRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<Debt>> {
        let fields = Debt {
            name: self.name,
            debt_type: self.debt_type.parse().map_err(map_unknown_variant)?,
            original_balance_cents: self.original_balance_cents,
            current_balance_cents: self.current_balance_cents,
            interest_rate_bps: self.interest_rate_bps,
            minimum_payment_cents: self.minimum_payment_cents,
            due_day: self.due_day,
            creditor: self.creditor,
            status: self.status.parse().map_err(map_unknown_variant)?,
            notes: self.notes,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = debts)]
pub(crate) struct NewDebtRow<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub debt_type: &'a str,
    pub original_balance_cents: i64,
    pub current_balance_cents: i64,
    pub interest_rate_bps: i32,
    pub minimum_payment_cents: i64,
    pub due_day: Option<i16>,
    pub creditor: Option<&'a str>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
}

impl<'a> NewDebtRow<'a> {
    pub(crate) fn new(owner: NumericUserId, debt: &'a Debt) -> Self {
        Self {
            user_id: owner.get(),
            name: &debt.name,
            debt_type: debt.debt_type.as_str(),
            original_balance_cents: debt.original_balance_cents,
            current_balance_cents: debt.current_balance_cents,
            interest_rate_bps: debt.interest_rate_bps,
            minimum_payment_cents: debt.minimum_payment_cents,
            due_day: debt.due_day,
            creditor: debt.creditor.as_deref(),
            status: debt.status.as_str(),
            notes: debt.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = debts)]
pub(crate) struct DebtUpdate<'a> {
    pub name: Option<&'a str>,
    pub current_balance_cents: Option<i64>,
    pub interest_rate_bps: Option<i32>,
    pub minimum_payment_cents: Option<i64>,
    pub due_day: Option<i16>,
    pub status: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a DebtPatch> for DebtUpdate<'a> {
    fn from(patch: &'a DebtPatch) -> Self {
        Self {
            name: patch.name.as_deref(),
            current_balance_cents: patch.current_balance_cents,
            interest_rate_bps: patch.interest_rate_bps,
            minimum_payment_cents: patch.minimum_payment_cents,
            due_day: patch.due_day,
            status: patch.status.map(|status| status.as_str()),
            notes: patch.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = debt_payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DebtPaymentRow {
    pub id: i64,
    pub user_id: i64,
    pub debt_id: i64,
    pub amount_cents: i64,
    pub payment_date: DateTime<Utc>,
    pub payment_type: String,
    pub balance_after_cents: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DebtPaymentRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<DebtPayment>> {
        let fields = DebtPayment {
            debt_id: RecordId::new(self.debt_id),
            amount_cents: self.amount_cents,
            payment_date: self.payment_date,
            payment_type: self.payment_type.parse().map_err(map_unknown_variant)?,
            balance_after_cents: self.balance_after_cents,
            notes: self.notes,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = debt_payments)]
pub(crate) struct NewDebtPaymentRow<'a> {
    pub user_id: i64,
    pub debt_id: i64,
    pub amount_cents: i64,
    pub payment_date: DateTime<Utc>,
    pub payment_type: &'a str,
    pub balance_after_cents: i64,
    pub notes: Option<&'a str>,
}

impl<'a> NewDebtPaymentRow<'a> {
    pub(crate) fn new(owner: NumericUserId, payment: &'a DebtPayment) -> Self {
        Self {
            user_id: owner.get(),
            debt_id: payment.debt_id.get(),
            amount_cents: payment.amount_cents,
            payment_date: payment.payment_date,
            payment_type: payment.payment_type.as_str(),
            balance_after_cents: payment.balance_after_cents,
            notes: payment.notes.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = financial_goals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FinancialGoalRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub goal_type: String,
    pub target_amount_cents: i64,
    pub current_amount_cents: i64,
    pub target_date: Option<DateTime<Utc>>,
    pub status: String,
    pub priority: i16,
    pub created_at: DateTime<Utc>,
}

impl FinancialGoalRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<FinancialGoal>> {
        let fields = FinancialGoal {
            name: self.name,
            description: self.description,
            goal_type: self.goal_type.parse().map_err(map_unknown_variant)?,
            target_amount_cents: self.target_amount_cents,
            current_amount_cents: self.current_amount_cents,
            target_date: self.target_date,
            status: self.status.parse().map_err(map_unknown_variant)?,
            priority: self.priority,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = financial_goals)]
pub(crate) struct NewFinancialGoalRow<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub goal_type: &'a str,
    pub target_amount_cents: i64,
    pub current_amount_cents: i64,
    pub target_date: Option<DateTime<Utc>>,
    pub status: &'a str,
    pub priority: i16,
}

impl<'a> NewFinancialGoalRow<'a> {
    pub(crate) fn new(owner: NumericUserId, goal: &'a FinancialGoal) -> Self {
        Self {
            user_id: owner.get(),
            name: &goal.name,
            description: goal.description.as_deref(),
            goal_type: goal.goal_type.as_str(),
            target_amount_cents: goal.target_amount_cents,
            current_amount_cents: goal.current_amount_cents,
            target_date: goal.target_date,
            status: goal.status.as_str(),
            priority: goal.priority,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = financial_goals)]
pub(crate) struct FinancialGoalUpdate<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub target_amount_cents: Option<i64>,
    pub current_amount_cents: Option<i64>,
    pub target_date: Option<DateTime<Utc>>,
    pub status: Option<&'a str>,
    pub priority: Option<i16>,
}

impl<'a> From<&'a GoalPatch> for FinancialGoalUpdate<'a> {
    fn from(patch: &'a GoalPatch) -> Self {
        Self {
            name: patch.name.as_deref(),
            description: patch.description.as_deref(),
            target_amount_cents: patch.target_amount_cents,
            current_amount_cents: patch.current_amount_cents,
            target_date: patch.target_date,
            status: patch.status.map(|status| status.as_str()),
            priority: patch.priority,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = goal_progress_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GoalProgressRow {
    pub id: i64,
    pub goal_id: i64,
    pub amount_cents: i64,
    pub new_total_cents: i64,
    pub source: String,
    pub note: Option<String>,
    pub progress_date: DateTime<Utc>,
}

impl GoalProgressRow {
    pub(crate) fn into_entry(self) -> StoreResult<GoalProgressEntry> {
        Ok(GoalProgressEntry {
            id: RecordId::new(self.id),
            goal_id: RecordId::new(self.goal_id),
            amount_cents: self.amount_cents,
            new_total_cents: self.new_total_cents,
            source: self.source.parse().map_err(map_unknown_variant)?,
            note: self.note,
            progress_date: self.progress_date,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = goal_progress_history)]
pub(crate) struct NewGoalProgressRow<'a> {
    pub goal_id: i64,
    pub user_id: i64,
    pub amount_cents: i64,
    pub new_total_cents: i64,
    pub source: &'a str,
    pub note: Option<&'a str>,
    pub progress_date: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Learning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vocabulary_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VocabularyItemRow {
    pub id: i64,
    pub language: String,
    pub word: String,
    pub translation: String,
    pub pronunciation: Option<String>,
    pub part_of_speech: Option<String>,
    pub difficulty: String,
    pub category: Option<String>,
    pub example_sentence: Option<String>,
}

impl VocabularyItemRow {
    pub(crate) fn into_item(self) -> StoreResult<VocabularyItem> {
        Ok(VocabularyItem {
            id: RecordId::new(self.id),
            language: self.language,
            word: self.word,
            translation: self.translation,
            pronunciation: self.pronunciation,
            part_of_speech: self.part_of_speech,
            difficulty: self.difficulty.parse().map_err(map_unknown_variant)?,
            category: self.category,
            example_sentence: self.example_sentence,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_vocabulary)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserVocabularyRow {
    pub id: i64,
    pub user_id: i64,
    pub vocabulary_item_id: i64,
    pub language: String,
    pub times_reviewed: i32,
    pub correct_count: i32,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserVocabularyRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<UserVocabulary>> {
        let fields = UserVocabulary {
            vocabulary_item_id: RecordId::new(self.vocabulary_item_id),
            language: self.language,
            times_reviewed: self.times_reviewed,
            correct_count: self.correct_count,
            last_reviewed: self.last_reviewed,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_vocabulary)]
pub(crate) struct NewUserVocabularyRow<'a> {
    pub user_id: i64,
    pub vocabulary_item_id: i64,
    pub language: &'a str,
    pub times_reviewed: i32,
    pub correct_count: i32,
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl<'a> NewUserVocabularyRow<'a> {
    pub(crate) fn new(owner: NumericUserId, progress: &'a UserVocabulary) -> Self {
        Self {
            user_id: owner.get(),
            vocabulary_item_id: progress.vocabulary_item_id.get(),
            language: &progress.language,
            times_reviewed: progress.times_reviewed,
            correct_count: progress.correct_count,
            last_reviewed: progress.last_reviewed,
        }
    }
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = saved_translations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SavedTranslationRow {
    pub id: i64,
    pub user_id: i64,
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub category_id: Option<i64>,
    pub is_favorite: i32,
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
}

impl SavedTranslationRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<SavedTranslation>> {
        let fields = SavedTranslation {
            original_text: self.original_text,
            translated_text: self.translated_text,
            source_language: self.source_language,
            target_language: self.target_language,
            category_id: self.category_id.map(RecordId::new),
            is_favorite: flag_from_column(self.is_favorite),
            usage_count: self.usage_count,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = saved_translations)]
pub(crate) struct NewSavedTranslationRow<'a> {
    pub user_id: i64,
    pub original_text: &'a str,
    pub translated_text: &'a str,
    pub source_language: &'a str,
    pub target_language: &'a str,
    pub category_id: Option<i64>,
    pub is_favorite: i32,
    pub usage_count: i32,
}

impl<'a> NewSavedTranslationRow<'a> {
    pub(crate) fn new(owner: NumericUserId, translation: &'a SavedTranslation) -> Self {
        Self {
            user_id: owner.get(),
            original_text: &translation.original_text,
            translated_text: &translation.translated_text,
            source_language: &translation.source_language,
            target_language: &translation.target_language,
            category_id: translation.category_id.map(RecordId::get),
            is_favorite: flag_to_column(translation.is_favorite),
            usage_count: translation.usage_count,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = translation_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TranslationCategoryRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TranslationCategoryRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<TranslationCategory>> {
        let fields = TranslationCategory {
            name: self.name,
            icon: self.icon,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = translation_categories)]
pub(crate) struct NewTranslationCategoryRow<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub icon: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = fact_update_notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    pub is_read: i32,
    pub read_at: Option<DateTime<Utc>>,
    pub is_dismissed: i32,
    pub dismissed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NotificationRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<Notification>> {
        let fields = Notification {
            title: self.title,
            message: self.message,
            is_read: flag_from_column(self.is_read),
            read_at: self.read_at,
            is_dismissed: flag_from_column(self.is_dismissed),
            dismissed_at: self.dismissed_at,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = fact_update_notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub message: &'a str,
    pub is_read: i32,
    pub is_dismissed: i32,
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConversationRow {
    pub id: i64,
    pub user_id: i64,
    pub user_message: String,
    pub assistant_response: String,
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ConversationRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<Conversation>> {
        let fields = Conversation {
            user_message: self.user_message,
            assistant_response: self.assistant_response,
            audio_url: self.audio_url,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = conversations)]
pub(crate) struct NewConversationRow<'a> {
    pub user_id: i64,
    pub user_message: &'a str,
    pub assistant_response: &'a str,
    pub audio_url: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = conversation_feedback)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConversationFeedbackRow {
    pub id: i64,
    pub conversation_id: i64,
    pub user_id: i64,
    pub feedback_type: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ConversationFeedbackRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<ConversationFeedback>> {
        let fields = ConversationFeedback {
            conversation_id: RecordId::new(self.conversation_id),
            feedback_type: self.feedback_type.parse().map_err(map_unknown_variant)?,
            comment: self.comment,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = conversation_feedback)]
pub(crate) struct NewConversationFeedbackRow<'a> {
    pub conversation_id: i64,
    pub user_id: i64,
    pub feedback_type: &'a str,
    pub comment: Option<&'a str>,
}

impl<'a> NewConversationFeedbackRow<'a> {
    pub(crate) fn new(owner: NumericUserId, feedback: &'a ConversationFeedback) -> Self {
        Self {
            conversation_id: feedback.conversation_id.get(),
            user_id: owner.get(),
            feedback_type: feedback.feedback_type.as_str(),
            comment: feedback.comment.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = iot_devices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IoTDeviceRow {
    pub id: i64,
    pub user_id: i64,
    pub device_id: String,
    pub device_name: String,
    pub device_type: String,
    pub room: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub status: String,
    pub state: Option<String>,
    pub capabilities: Option<String>,
    pub connection_type: String,
    pub connection_config: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl IoTDeviceRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<IoTDevice>> {
        let fields = IoTDevice {
            device_id: self.device_id,
            device_name: self.device_name,
            device_type: self.device_type.parse().map_err(map_unknown_variant)?,
            room: self.room,
            manufacturer: self.manufacturer,
            model: self.model,
            status: self.status.parse().map_err(map_unknown_variant)?,
            state: self.state,
            capabilities: self.capabilities,
            connection_type: self.connection_type.parse().map_err(map_unknown_variant)?,
            connection_config: self.connection_config,
            last_seen: self.last_seen,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = iot_devices)]
pub(crate) struct NewIoTDeviceRow<'a> {
    pub user_id: i64,
    pub device_id: &'a str,
    pub device_name: &'a str,
    pub device_type: &'a str,
    pub room: &'a str,
    pub manufacturer: Option<&'a str>,
    pub model: Option<&'a str>,
    pub status: &'a str,
    pub state: Option<&'a str>,
    pub capabilities: Option<&'a str>,
    pub connection_type: &'a str,
    pub connection_config: Option<&'a str>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl<'a> NewIoTDeviceRow<'a> {
    pub(crate) fn new(owner: NumericUserId, device: &'a IoTDevice) -> Self {
        Self {
            user_id: owner.get(),
            device_id: &device.device_id,
            device_name: &device.device_name,
            device_type: device.device_type.as_str(),
            room: &device.room,
            manufacturer: device.manufacturer.as_deref(),
            model: device.model.as_deref(),
            status: device.status.as_str(),
            state: device.state.as_deref(),
            capabilities: device.capabilities.as_deref(),
            connection_type: device.connection_type.as_str(),
            connection_config: device.connection_config.as_deref(),
            last_seen: device.last_seen,
        }
    }
}

/// Columns touched by a device state report.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = iot_devices)]
pub(crate) struct IoTDeviceStateUpdate<'a> {
    pub state: &'a str,
    pub status: &'a str,
    pub last_seen: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> IoTDeviceStateUpdate<'a> {
    pub(crate) fn new(update: &'a DeviceStateUpdate, now: DateTime<Utc>) -> Self {
        Self {
            state: &update.state,
            status: update.status.as_str(),
            last_seen: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = iot_command_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IoTCommandRow {
    pub id: i64,
    pub user_id: i64,
    pub device_id: String,
    pub command: String,
    pub parameters: Option<String>,
    pub status: String,
    pub error_message: Option<String>,
    pub executed_at: DateTime<Utc>,
}

impl IoTCommandRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<IoTCommand>> {
        let fields = IoTCommand {
            device_id: self.device_id,
            command: self.command,
            parameters: self.parameters,
            status: self.status.parse().map_err(map_unknown_variant)?,
            error_message: self.error_message,
        };
        stored(self.id, self.user_id, self.executed_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = iot_command_history)]
pub(crate) struct NewIoTCommandRow<'a> {
    pub user_id: i64,
    pub device_id: &'a str,
    pub command: &'a str,
    pub parameters: Option<&'a str>,
    pub status: &'a str,
    pub error_message: Option<&'a str>,
}

impl<'a> NewIoTCommandRow<'a> {
    pub(crate) fn new(owner: NumericUserId, command: &'a IoTCommand) -> Self {
        Self {
            user_id: owner.get(),
            device_id: &command.device_id,
            command: &command.command,
            parameters: command.parameters.as_deref(),
            status: command.status.as_str(),
            error_message: command.error_message.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserProfileRow {
    pub id: i64,
    pub user_id: i64,
    pub sarcasm_level: i16,
    pub total_interactions: i32,
    pub positive_responses: i32,
    pub negative_responses: i32,
    pub average_response_length: i32,
    pub preferred_topics: Option<String>,
    pub interaction_patterns: Option<String>,
    pub last_interaction: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserProfileRow {
    pub(crate) fn into_record(self) -> StoreResult<PrivilegedRow<UserProfile>> {
        let fields = UserProfile {
            sarcasm_level: self.sarcasm_level,
            total_interactions: self.total_interactions,
            positive_responses: self.positive_responses,
            negative_responses: self.negative_responses,
            average_response_length: self.average_response_length,
            preferred_topics: self.preferred_topics,
            interaction_patterns: self.interaction_patterns,
            last_interaction: self.last_interaction,
        };
        stored(self.id, self.user_id, self.created_at, fields)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_profiles)]
pub(crate) struct NewUserProfileRow<'a> {
    pub user_id: i64,
    pub sarcasm_level: i16,
    pub total_interactions: i32,
    pub positive_responses: i32,
    pub negative_responses: i32,
    pub average_response_length: i32,
    pub preferred_topics: Option<&'a str>,
    pub interaction_patterns: Option<&'a str>,
    pub last_interaction: Option<DateTime<Utc>>,
}

impl<'a> NewUserProfileRow<'a> {
    pub(crate) fn new(owner: NumericUserId, profile: &'a UserProfile) -> Self {
        Self {
            user_id: owner.get(),
            sarcasm_level: profile.sarcasm_level,
            total_interactions: profile.total_interactions,
            positive_responses: profile.positive_responses,
            negative_responses: profile.negative_responses,
            average_response_length: profile.average_response_length,
            preferred_topics: profile.preferred_topics.as_deref(),
            interaction_patterns: profile.interaction_patterns.as_deref(),
            last_interaction: profile.last_interaction,
        }
    }
}

/// Profile changeset; `updated_at` is always set so the changeset is never
/// empty.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_profiles)]
pub(crate) struct UserProfileUpdate<'a> {
    pub sarcasm_level: Option<i16>,
    pub total_interactions: Option<i32>,
    pub positive_responses: Option<i32>,
    pub negative_responses: Option<i32>,
    pub average_response_length: Option<i32>,
    pub preferred_topics: Option<&'a str>,
    pub interaction_patterns: Option<&'a str>,
    pub last_interaction: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> UserProfileUpdate<'a> {
    pub(crate) fn new(patch: &'a ProfilePatch, now: DateTime<Utc>) -> Self {
        Self {
            sarcasm_level: patch.sarcasm_level,
            total_interactions: patch.total_interactions,
            positive_responses: patch.positive_responses,
            negative_responses: patch.negative_responses,
            average_response_length: patch.average_response_length,
            preferred_topics: patch.preferred_topics.as_deref(),
            interaction_patterns: patch.interaction_patterns.as_deref(),
            last_interaction: patch.last_interaction,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::budget::CategoryKind;
    use rstest::rstest;

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_default()
    }

    fn category_row(kind: &str, is_default: i32) -> BudgetCategoryRow {
        BudgetCategoryRow {
            id: 3,
            user_id: 1,
            name: "Rent".to_owned(),
            kind: kind.to_owned(),
            monthly_limit_cents: 120_000,
            color: None,
            icon: Some("home".to_owned()),
            is_default,
            sort_order: 2,
            created_at: epoch(),
        }
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    fn integer_flags_decode_to_booleans(#[case] column: i32, #[case] expected: bool) {
        let record = category_row("expense", column).into_record().expect("decodes");
        assert_eq!(record.fields.is_default, expected);
        assert_eq!(record.fields.kind, CategoryKind::Expense);
        assert_eq!(record.owner.get(), 1);
    }

    #[rstest]
    fn unknown_labels_are_decode_errors() {
        let error = category_row("savings", 0)
            .into_record()
            .expect_err("unknown category type");
        assert!(matches!(error, StoreError::Decode { .. }));
    }

    #[rstest]
    fn non_positive_owners_are_decode_errors() {
        let mut row = category_row("income", 0);
        row.user_id = 0;
        assert!(matches!(row.into_record(), Err(StoreError::Decode { .. })));
    }

    #[rstest]
    fn command_rows_use_execution_time_as_creation_time() {
        let executed_at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        let record = IoTCommandRow {
            id: 4,
            user_id: 2,
            device_id: "hue-1".to_owned(),
            command: "turn_on".to_owned(),
            parameters: None,
            status: "success".to_owned(),
            error_message: None,
            executed_at,
        }
        .into_record()
        .expect("decodes");

        assert_eq!(record.created_at, executed_at);
        assert_eq!(record.fields.status, crate::domain::records::iot::CommandStatus::Success);
    }

    #[rstest]
    fn device_rows_reject_unknown_connection_types() {
        let row = IoTDeviceRow {
            id: 1,
            user_id: 2,
            device_id: "hue-1".to_owned(),
            device_name: "Lamp".to_owned(),
            device_type: "light".to_owned(),
            room: "Kitchen".to_owned(),
            manufacturer: None,
            model: None,
            status: "online".to_owned(),
            state: None,
            capabilities: None,
            connection_type: "zigbee".to_owned(),
            connection_config: None,
            last_seen: None,
            created_at: epoch(),
        };
        assert!(matches!(row.into_record(), Err(StoreError::Decode { .. })));
    }

    #[rstest]
    fn inserts_encode_flags_as_integers() {
        let record = category_row("income", 1).into_record().expect("decodes");
        let owner = NumericUserId::new(9).expect("id");
        let insert = NewBudgetCategoryRow::new(owner, &record.fields);
        assert_eq!(insert.is_default, 1);
        assert_eq!(insert.kind, "income");
        assert_eq!(insert.user_id, 9);
    }
}
