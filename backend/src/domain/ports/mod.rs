//! Domain ports.
//!
//! Store ports are generic over an [`AccessScope`]: the privileged store
//! implements them for [`PrivilegedAccess`] and the tenant store for
//! [`TenantSession`], giving both backends one signature family.

mod macros;

pub(crate) use macros::define_port_error;

mod access;
mod backends;
mod budget_store;
mod conversation_store;
mod debt_store;
mod goal_store;
mod identity_provider;
mod iot_store;
mod learning_store;
mod notification_store;
mod profile_store;
mod store_error;
mod translation_store;

pub use access::{AccessScope, BackendKind, Owned, PrivilegedAccess, TenantSession};
pub use backends::{PrivilegedBackend, TenantBackend};
pub use budget_store::BudgetStore;
pub use conversation_store::ConversationStore;
pub use debt_store::DebtStore;
pub use goal_store::GoalStore;
#[cfg(test)]
pub use identity_provider::{MockTokenVerifier, MockUserDirectory};
pub use identity_provider::{DirectoryEntry, IdentityError, TokenVerifier, UserDirectory};
pub use iot_store::IoTStore;
pub use learning_store::LearningStore;
pub use notification_store::NotificationStore;
pub use profile_store::ProfileStore;
pub use store_error::{StoreError, StoreResult};
pub use translation_store::TranslationStore;
