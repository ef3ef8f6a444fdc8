//! Whole-store bundles injected into the routing facade.

use super::{
    BudgetStore, ConversationStore, DebtStore, GoalStore, IoTStore, LearningStore,
    NotificationStore, PrivilegedAccess, ProfileStore, TenantSession, TranslationStore,
};

/// Every domain port, served by the privileged store.
pub trait PrivilegedBackend:
    BudgetStore<PrivilegedAccess>
    + DebtStore<PrivilegedAccess>
    + GoalStore<PrivilegedAccess>
    + LearningStore<PrivilegedAccess>
    + TranslationStore<PrivilegedAccess>
    + NotificationStore<PrivilegedAccess>
    + ConversationStore<PrivilegedAccess>
    + IoTStore<PrivilegedAccess>
    + ProfileStore<PrivilegedAccess>
{
}

impl<T> PrivilegedBackend for T where
    T: BudgetStore<PrivilegedAccess>
        + DebtStore<PrivilegedAccess>
        + GoalStore<PrivilegedAccess>
        + LearningStore<PrivilegedAccess>
        + TranslationStore<PrivilegedAccess>
        + NotificationStore<PrivilegedAccess>
        + ConversationStore<PrivilegedAccess>
    + IoTStore<PrivilegedAccess>
    + ProfileStore<PrivilegedAccess>
{
}

/// Every domain port, served by the tenant store.
pub trait TenantBackend:
    BudgetStore<TenantSession>
    + DebtStore<TenantSession>
    + GoalStore<TenantSession>
    + LearningStore<TenantSession>
    + TranslationStore<TenantSession>
    + NotificationStore<TenantSession>
    + ConversationStore<TenantSession>
    + IoTStore<TenantSession>
    + ProfileStore<TenantSession>
{
}

impl<T> TenantBackend for T where
    T: BudgetStore<TenantSession>
        + DebtStore<TenantSession>
        + GoalStore<TenantSession>
        + LearningStore<TenantSession>
        + TranslationStore<TenantSession>
        + NotificationStore<TenantSession>
        + ConversationStore<TenantSession>
    + IoTStore<TenantSession>
    + ProfileStore<TenantSession>
{
}
