//! Backend B: the tenant store behind a PostgREST-style HTTP API.
//!
//! Implements every store port for [`TenantSession`]. Each call is made with
//! the caller's forwarded credential; isolation is enforced by the store's
//! row-level security. Owned queries also filter on the session's subject so
//! by-id operations never touch another user's rows even when a policy is
//! missing.
//!
//! [`TenantSession`]: crate::domain::ports::TenantSession

mod budget;
mod client;
mod conversations;
mod debt;
mod dto;
mod goals;
mod iot;
mod learning;
mod notifications;
mod profiles;
mod translation;

pub use client::{PostgrestConfig, PostgrestTenantStore};

mod tables {
    pub(super) const BUDGET_CATEGORIES: &str = "budget_categories";
    pub(super) const BUDGET_TRANSACTIONS: &str = "budget_transactions";
    pub(super) const BUDGET_SNAPSHOTS: &str = "debt_budget_snapshots";
    pub(super) const DEBTS: &str = "debts";
    pub(super) const DEBT_PAYMENTS: &str = "debt_payments";
    pub(super) const FINANCIAL_GOALS: &str = "financial_goals";
    pub(super) const GOAL_PROGRESS: &str = "goal_progress_history";
    pub(super) const VOCABULARY_ITEMS: &str = "vocabulary_items";
    pub(super) const USER_VOCABULARY: &str = "user_vocabulary";
    pub(super) const SAVED_TRANSLATIONS: &str = "saved_translations";
    pub(super) const TRANSLATION_CATEGORIES: &str = "translation_categories";
    pub(super) const NOTIFICATIONS: &str = "fact_update_notifications";
    pub(super) const CONVERSATIONS: &str = "conversations";
    pub(super) const CONVERSATION_FEEDBACK: &str = "conversation_feedback";
    pub(super) const IOT_DEVICES: &str = "iot_devices";
    pub(super) const IOT_COMMANDS: &str = "iot_command_history";
    pub(super) const USER_PROFILES: &str = "user_profiles";
}
