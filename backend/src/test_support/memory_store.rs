//! Shared row tables behind the in-memory stores.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::identity::SubjectId;
use crate::domain::ports::{AccessScope, PrivilegedAccess, StoreError, StoreResult, TenantSession};
use crate::domain::records::budget::{BudgetCategory, BudgetSnapshot, BudgetTransaction};
use crate::domain::records::conversations::{Conversation, ConversationFeedback};
use crate::domain::records::debt::{Debt, DebtPayment};
use crate::domain::records::goals::{FinancialGoal, GoalProgressEntry};
use crate::domain::records::iot::{IoTCommand, IoTDevice};
use crate::domain::records::learning::{UserVocabulary, VocabularyItem};
use crate::domain::records::notifications::Notification;
use crate::domain::records::profiles::UserProfile;
use crate::domain::records::translation::{SavedTranslation, TranslationCategory};
use crate::domain::records::{RecordId, Stored};

type Credentials = HashMap<String, SubjectId>;

/// How an access scope is confined inside the in-memory store.
pub trait MemoryScope: AccessScope {
    /// Owner every row must belong to, or `None` for unrestricted access.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rejected`] when the scope's credential is not
    /// recognised.
    fn confine(&self, credentials: &Credentials) -> StoreResult<Option<Self::Owner>>;
}

impl MemoryScope for PrivilegedAccess {
    fn confine(&self, _credentials: &Credentials) -> StoreResult<Option<Self::Owner>> {
        Ok(None)
    }
}

impl MemoryScope for TenantSession {
    /// Row-level security keys on the subject the credential authenticates,
    /// not on whatever subject the caller claims.
    fn confine(&self, credentials: &Credentials) -> StoreResult<Option<Self::Owner>> {
        credentials
            .get(self.token().expose())
            .cloned()
            .map(Some)
            .ok_or_else(|| StoreError::rejected("JWT is not recognised"))
    }
}

/// Rows a single call may see and write.
#[derive(Debug, Clone)]
pub(super) struct Visibility<O>(Option<O>);

impl<O: Clone + PartialEq> Visibility<O> {
    pub(super) fn sees(&self, owner: &O) -> bool {
        self.0.as_ref().is_none_or(|confined| confined == owner)
    }

    pub(super) fn check_write(&self, owner: &O) -> StoreResult<()> {
        if self.sees(owner) {
            Ok(())
        } else {
            Err(StoreError::rejected(
                "new row violates row-level security policy",
            ))
        }
    }

    /// Visible rows of `owner` that satisfy `keep`, cloned.
    pub(super) fn select<T: Clone>(
        &self,
        rows: &[Stored<T, O>],
        owner: &O,
        keep: impl Fn(&T) -> bool,
    ) -> Vec<Stored<T, O>> {
        rows.iter()
            .filter(|row| self.sees(&row.owner) && &row.owner == owner && keep(&row.fields))
            .cloned()
            .collect()
    }

    /// Visible row with `id`.
    pub(super) fn find<'a, T>(
        &self,
        rows: &'a mut [Stored<T, O>],
        id: RecordId,
    ) -> Option<&'a mut Stored<T, O>> {
        self.find_by(rows, |row| row.id == id)
    }

    /// First visible row satisfying `matches`.
    pub(super) fn find_by<'a, T>(
        &self,
        rows: &'a mut [Stored<T, O>],
        matches: impl Fn(&Stored<T, O>) -> bool,
    ) -> Option<&'a mut Stored<T, O>> {
        rows.iter_mut()
            .find(|row| self.sees(&row.owner) && matches(row))
    }
}

/// Table contents of one store.
#[derive(Debug)]
pub(super) struct Tables<O> {
    next_id: i64,
    clock: DateTime<Utc>,
    pub(super) categories: Vec<Stored<BudgetCategory, O>>,
    pub(super) transactions: Vec<Stored<BudgetTransaction, O>>,
    pub(super) snapshots: Vec<Stored<BudgetSnapshot, O>>,
    pub(super) debts: Vec<Stored<Debt, O>>,
    pub(super) payments: Vec<Stored<DebtPayment, O>>,
    pub(super) goals: Vec<Stored<FinancialGoal, O>>,
    pub(super) progress: Vec<(O, GoalProgressEntry)>,
    pub(super) vocabulary: Vec<VocabularyItem>,
    pub(super) user_vocabulary: Vec<Stored<UserVocabulary, O>>,
    pub(super) translations: Vec<Stored<SavedTranslation, O>>,
    pub(super) translation_categories: Vec<Stored<TranslationCategory, O>>,
    pub(super) notifications: Vec<Stored<Notification, O>>,
    pub(super) conversations: Vec<Stored<Conversation, O>>,
    pub(super) feedback: Vec<Stored<ConversationFeedback, O>>,
    pub(super) devices: Vec<Stored<IoTDevice, O>>,
    pub(super) commands: Vec<Stored<IoTCommand, O>>,
    pub(super) profiles: Vec<Stored<UserProfile, O>>,
}

impl<O> Default for Tables<O> {
    fn default() -> Self {
        Self {
            next_id: 0,
            clock: Utc::now(),
            categories: Vec::new(),
            transactions: Vec::new(),
            snapshots: Vec::new(),
            debts: Vec::new(),
            payments: Vec::new(),
            goals: Vec::new(),
            progress: Vec::new(),
            vocabulary: Vec::new(),
            user_vocabulary: Vec::new(),
            translations: Vec::new(),
            translation_categories: Vec::new(),
            notifications: Vec::new(),
            conversations: Vec::new(),
            feedback: Vec::new(),
            devices: Vec::new(),
            commands: Vec::new(),
            profiles: Vec::new(),
        }
    }
}

impl<O: Clone> Tables<O> {
    /// Next identifier; shared by every table.
    pub(super) fn next_id(&mut self) -> RecordId {
        self.next_id = self.next_id.saturating_add(1);
        RecordId::new(self.next_id)
    }

    /// Strictly increasing timestamp so creation order is observable.
    pub(super) fn tick(&mut self) -> DateTime<Utc> {
        self.clock = self
            .clock
            .checked_add_signed(TimeDelta::seconds(1))
            .unwrap_or(self.clock);
        self.clock
    }

    /// Wrap `fields` as a new row owned by `owner`.
    pub(super) fn stamp<T>(&mut self, owner: &O, fields: T) -> Stored<T, O> {
        Stored {
            id: self.next_id(),
            owner: owner.clone(),
            created_at: self.tick(),
            fields,
        }
    }
}

/// In-memory store generic over the access scope it serves.
#[derive(Debug)]
pub struct MemoryStore<S: MemoryScope> {
    tables: Mutex<Tables<S::Owner>>,
    credentials: Mutex<Credentials>,
    failure: Mutex<Option<StoreError>>,
    calls: AtomicUsize,
}

/// Stand-in for the privileged store.
pub type InMemoryPrivilegedStore = MemoryStore<PrivilegedAccess>;

/// Stand-in for the tenant store.
pub type InMemoryTenantStore = MemoryStore<TenantSession>;

impl<S: MemoryScope> Default for MemoryStore<S> {
    fn default() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            credentials: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: MemoryScope> MemoryStore<S> {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next call with `error`.
    pub fn fail_next(&self, error: StoreError) {
        *lock(&self.failure) = Some(error);
    }

    /// Number of calls received, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Add entries to the shared vocabulary catalogue.
    pub fn seed_vocabulary(&self, items: impl IntoIterator<Item = VocabularyItem>) {
        lock(&self.tables).vocabulary.extend(items);
    }

    /// Count the call, apply injected failures and confine the scope.
    pub(super) fn admit(
        &self,
        access: &S,
    ) -> StoreResult<(MutexGuard<'_, Tables<S::Owner>>, Visibility<S::Owner>)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = lock(&self.failure).take() {
            return Err(error);
        }
        let confined = access.confine(&lock(&self.credentials))?;
        Ok((lock(&self.tables), Visibility(confined)))
    }
}

impl MemoryStore<TenantSession> {
    /// Bind `token` to `subject`, as the identity provider's signing would.
    pub fn register_credential(&self, token: &str, subject: SubjectId) {
        lock(&self.credentials).insert(token.to_owned(), subject);
    }
}
