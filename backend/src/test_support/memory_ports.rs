//! Port implementations for [`MemoryStore`], shared by both scopes.
//!
//! Orderings and filters follow the database adapters so tests observe the
//! same result shapes.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    BudgetStore, ConversationStore, DebtStore, GoalStore, IoTStore, LearningStore,
    NotificationStore, Owned, ProfileStore, StoreError, StoreResult, TranslationStore,
};
use crate::domain::records::RecordId;
use crate::domain::records::budget::{
    BudgetCategory, BudgetCategoryPatch, BudgetSnapshot, BudgetTransaction, CategoryKind,
    TransactionFilter,
};
use crate::domain::records::conversations::{Conversation, ConversationFeedback};
use crate::domain::records::debt::{Debt, DebtPatch, DebtPayment};
use crate::domain::records::goals::{FinancialGoal, GoalPatch, GoalProgress, GoalProgressEntry};
use crate::domain::records::iot::{DeviceStateUpdate, IoTCommand, IoTDevice};
use crate::domain::records::learning::{
    Difficulty, UserVocabulary, VocabularyEnrolment, VocabularyItem,
};
use crate::domain::records::notifications::{
    NOTIFICATION_LIST_LIMIT, Notification, NotificationDraft,
};
use crate::domain::records::profiles::{ProfilePatch, UserProfile};
use crate::domain::records::translation::{SavedTranslation, TranslationCategory};

use super::memory_store::{MemoryScope, MemoryStore};

fn take<T>(mut rows: Vec<T>, limit: u32) -> Vec<T> {
    rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    rows
}

fn unique_violation(constraint: &str) -> StoreError {
    StoreError::query(format!(
        "duplicate key value violates unique constraint \"{constraint}\""
    ))
}

#[async_trait]
impl<S: MemoryScope> BudgetStore<S> for MemoryStore<S> {
    async fn insert_category(
        &self,
        access: &S,
        owner: &S::Owner,
        category: &BudgetCategory,
    ) -> StoreResult<Owned<BudgetCategory, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, category.clone());
        tables.categories.push(row.clone());
        Ok(row)
    }

    async fn list_categories(
        &self,
        access: &S,
        owner: &S::Owner,
        kind: Option<CategoryKind>,
    ) -> StoreResult<Vec<Owned<BudgetCategory, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.categories, owner, |category| {
            kind.is_none_or(|wanted| category.kind == wanted)
        });
        rows.sort_by_key(|row| (row.fields.sort_order, row.id));
        Ok(rows)
    }

    async fn update_category(
        &self,
        access: &S,
        id: RecordId,
        patch: &BudgetCategoryPatch,
    ) -> StoreResult<Option<Owned<BudgetCategory, S>>> {
        let (mut tables, scope) = self.admit(access)?;
        Ok(scope.find(&mut tables.categories, id).map(|row| {
            patch.apply(&mut row.fields);
            row.clone()
        }))
    }

    async fn delete_category(&self, access: &S, id: RecordId) -> StoreResult<()> {
        let (mut tables, scope) = self.admit(access)?;
        tables
            .categories
            .retain(|row| row.id != id || !scope.sees(&row.owner));
        Ok(())
    }

    async fn insert_transaction(
        &self,
        access: &S,
        owner: &S::Owner,
        transaction: &BudgetTransaction,
    ) -> StoreResult<Owned<BudgetTransaction, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, transaction.clone());
        tables.transactions.push(row.clone());
        Ok(row)
    }

    async fn list_transactions(
        &self,
        access: &S,
        owner: &S::Owner,
        filter: &TransactionFilter,
    ) -> StoreResult<Vec<Owned<BudgetTransaction, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.transactions, owner, |transaction| {
            filter.matches(transaction)
        });
        rows.sort_by_key(|row| Reverse((row.fields.transaction_date, row.id)));
        Ok(rows)
    }

    async fn delete_transaction(&self, access: &S, id: RecordId) -> StoreResult<()> {
        let (mut tables, scope) = self.admit(access)?;
        tables
            .transactions
            .retain(|row| row.id != id || !scope.sees(&row.owner));
        Ok(())
    }

    async fn insert_snapshot(
        &self,
        access: &S,
        owner: &S::Owner,
        snapshot: &BudgetSnapshot,
    ) -> StoreResult<Owned<BudgetSnapshot, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, snapshot.clone());
        tables.snapshots.push(row.clone());
        Ok(row)
    }

    async fn list_snapshots(
        &self,
        access: &S,
        owner: &S::Owner,
        limit: u32,
    ) -> StoreResult<Vec<Owned<BudgetSnapshot, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.snapshots, owner, |_| true);
        rows.sort_by(|a, b| {
            b.fields
                .month_year
                .cmp(&a.fields.month_year)
                .then(b.id.cmp(&a.id))
        });
        Ok(take(rows, limit))
    }
}

#[async_trait]
impl<S: MemoryScope> DebtStore<S> for MemoryStore<S> {
    async fn insert_debt(
        &self,
        access: &S,
        owner: &S::Owner,
        debt: &Debt,
    ) -> StoreResult<Owned<Debt, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, debt.clone());
        tables.debts.push(row.clone());
        Ok(row)
    }

    async fn list_debts(
        &self,
        access: &S,
        owner: &S::Owner,
        include_inactive: bool,
    ) -> StoreResult<Vec<Owned<Debt, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.debts, owner, |debt| {
            include_inactive || debt.is_active()
        });
        rows.sort_by_key(|row| Reverse((row.created_at, row.id)));
        Ok(rows)
    }

    async fn find_debt(&self, access: &S, id: RecordId) -> StoreResult<Option<Owned<Debt, S>>> {
        let (mut tables, scope) = self.admit(access)?;
        Ok(scope.find(&mut tables.debts, id).cloned())
    }

    async fn update_debt(
        &self,
        access: &S,
        id: RecordId,
        patch: &DebtPatch,
    ) -> StoreResult<Option<Owned<Debt, S>>> {
        let (mut tables, scope) = self.admit(access)?;
        Ok(scope.find(&mut tables.debts, id).map(|row| {
            patch.apply(&mut row.fields);
            row.clone()
        }))
    }

    async fn delete_debt(&self, access: &S, id: RecordId) -> StoreResult<()> {
        let (mut tables, scope) = self.admit(access)?;
        tables
            .debts
            .retain(|row| row.id != id || !scope.sees(&row.owner));
        Ok(())
    }

    async fn insert_payment(
        &self,
        access: &S,
        owner: &S::Owner,
        payment: &DebtPayment,
    ) -> StoreResult<Owned<DebtPayment, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, payment.clone());
        tables.payments.push(row.clone());
        Ok(row)
    }

    async fn list_payments(
        &self,
        access: &S,
        owner: &S::Owner,
        debt_id: RecordId,
        limit: u32,
    ) -> StoreResult<Vec<Owned<DebtPayment, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.payments, owner, |payment| payment.debt_id == debt_id);
        rows.sort_by_key(|row| Reverse((row.fields.payment_date, row.id)));
        Ok(take(rows, limit))
    }
}

#[async_trait]
impl<S: MemoryScope> GoalStore<S> for MemoryStore<S> {
    async fn insert_goal(
        &self,
        access: &S,
        owner: &S::Owner,
        goal: &FinancialGoal,
    ) -> StoreResult<Owned<FinancialGoal, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, goal.clone());
        tables.goals.push(row.clone());
        Ok(row)
    }

    async fn list_goals(
        &self,
        access: &S,
        owner: &S::Owner,
    ) -> StoreResult<Vec<Owned<FinancialGoal, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.goals, owner, |_| true);
        rows.sort_by_key(|row| (Reverse(row.fields.priority), row.id));
        Ok(rows)
    }

    async fn find_goal(
        &self,
        access: &S,
        id: RecordId,
    ) -> StoreResult<Option<Owned<FinancialGoal, S>>> {
        let (mut tables, scope) = self.admit(access)?;
        Ok(scope.find(&mut tables.goals, id).cloned())
    }

    async fn update_goal(
        &self,
        access: &S,
        id: RecordId,
        patch: &GoalPatch,
    ) -> StoreResult<Option<Owned<FinancialGoal, S>>> {
        let (mut tables, scope) = self.admit(access)?;
        Ok(scope.find(&mut tables.goals, id).map(|row| {
            patch.apply(&mut row.fields);
            row.clone()
        }))
    }

    async fn delete_goal(&self, access: &S, id: RecordId) -> StoreResult<()> {
        let (mut tables, scope) = self.admit(access)?;
        tables
            .progress
            .retain(|(owner, entry)| entry.goal_id != id || !scope.sees(owner));
        tables
            .goals
            .retain(|row| row.id != id || !scope.sees(&row.owner));
        Ok(())
    }

    async fn record_progress(
        &self,
        access: &S,
        goal_id: RecordId,
        progress: &GoalProgress,
    ) -> StoreResult<Option<GoalProgressEntry>> {
        let (mut tables, scope) = self.admit(access)?;
        let Some((owner, new_total)) = scope.find(&mut tables.goals, goal_id).map(|goal| {
            let new_total = progress.new_total(goal.fields.current_amount_cents);
            goal.fields.current_amount_cents = new_total;
            (goal.owner.clone(), new_total)
        }) else {
            return Ok(None);
        };

        let entry = GoalProgressEntry {
            id: tables.next_id(),
            goal_id,
            amount_cents: progress.amount_cents,
            new_total_cents: new_total,
            source: progress.source,
            note: progress.note.clone(),
            progress_date: tables.tick(),
        };
        tables.progress.push((owner, entry.clone()));
        Ok(Some(entry))
    }

    async fn list_progress(
        &self,
        access: &S,
        goal_id: RecordId,
        limit: u32,
    ) -> StoreResult<Vec<GoalProgressEntry>> {
        let (tables, scope) = self.admit(access)?;
        let mut entries: Vec<GoalProgressEntry> = tables
            .progress
            .iter()
            .filter(|(owner, entry)| entry.goal_id == goal_id && scope.sees(owner))
            .map(|(_, entry)| entry.clone())
            .collect();
        entries.sort_by_key(|entry| Reverse((entry.progress_date, entry.id)));
        Ok(take(entries, limit))
    }
}

#[async_trait]
impl<S: MemoryScope> LearningStore<S> for MemoryStore<S> {
    async fn list_vocabulary(
        &self,
        access: &S,
        language: &str,
        difficulty: Option<Difficulty>,
    ) -> StoreResult<Vec<VocabularyItem>> {
        let (tables, _) = self.admit(access)?;
        let mut items: Vec<VocabularyItem> = tables
            .vocabulary
            .iter()
            .filter(|item| {
                item.language == language && difficulty.is_none_or(|wanted| item.difficulty == wanted)
            })
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn list_user_vocabulary(
        &self,
        access: &S,
        owner: &S::Owner,
        language: Option<&str>,
    ) -> StoreResult<Vec<Owned<UserVocabulary, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.user_vocabulary, owner, |progress| {
            language.is_none_or(|wanted| progress.language == wanted)
        });
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }

    async fn enrol_vocabulary(
        &self,
        access: &S,
        owner: &S::Owner,
        enrolment: &VocabularyEnrolment,
    ) -> StoreResult<Owned<UserVocabulary, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, UserVocabulary::enrol(enrolment, Utc::now()));
        tables.user_vocabulary.push(row.clone());
        Ok(row)
    }

    async fn record_review(
        &self,
        access: &S,
        owner: &S::Owner,
        vocabulary_item_id: RecordId,
        correct: bool,
    ) -> StoreResult<Option<Owned<UserVocabulary, S>>> {
        let (mut tables, scope) = self.admit(access)?;
        Ok(tables
            .user_vocabulary
            .iter_mut()
            .find(|row| {
                scope.sees(&row.owner)
                    && &row.owner == owner
                    && row.fields.vocabulary_item_id == vocabulary_item_id
            })
            .map(|row| {
                row.fields.apply_review(correct, Utc::now());
                row.clone()
            }))
    }
}

#[async_trait]
impl<S: MemoryScope> TranslationStore<S> for MemoryStore<S> {
    async fn insert_translation(
        &self,
        access: &S,
        owner: &S::Owner,
        translation: &SavedTranslation,
    ) -> StoreResult<Owned<SavedTranslation, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, translation.clone());
        tables.translations.push(row.clone());
        Ok(row)
    }

    async fn list_translations(
        &self,
        access: &S,
        owner: &S::Owner,
        category_id: Option<RecordId>,
    ) -> StoreResult<Vec<Owned<SavedTranslation, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.translations, owner, |translation| {
            category_id.is_none_or(|wanted| translation.category_id == Some(wanted))
        });
        rows.sort_by_key(|row| Reverse((row.created_at, row.id)));
        Ok(rows)
    }

    async fn delete_translation(
        &self,
        access: &S,
        owner: &S::Owner,
        id: RecordId,
    ) -> StoreResult<()> {
        let (mut tables, scope) = self.admit(access)?;
        tables
            .translations
            .retain(|row| row.id != id || &row.owner != owner || !scope.sees(&row.owner));
        Ok(())
    }

    async fn insert_translation_category(
        &self,
        access: &S,
        owner: &S::Owner,
        category: &TranslationCategory,
    ) -> StoreResult<Owned<TranslationCategory, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, category.clone());
        tables.translation_categories.push(row.clone());
        Ok(row)
    }

    async fn list_translation_categories(
        &self,
        access: &S,
        owner: &S::Owner,
    ) -> StoreResult<Vec<Owned<TranslationCategory, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.translation_categories, owner, |_| true);
        rows.sort_by(|a, b| a.fields.name.cmp(&b.fields.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }
}

#[async_trait]
impl<S: MemoryScope> NotificationStore<S> for MemoryStore<S> {
    async fn insert_notification(
        &self,
        access: &S,
        owner: &S::Owner,
        draft: &NotificationDraft,
    ) -> StoreResult<Owned<Notification, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, draft.clone().into_unread());
        tables.notifications.push(row.clone());
        Ok(row)
    }

    async fn list_notifications(
        &self,
        access: &S,
        owner: &S::Owner,
        include_read: bool,
    ) -> StoreResult<Vec<Owned<Notification, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.notifications, owner, |notification| {
            notification.is_listed(include_read)
        });
        rows.sort_by_key(|row| Reverse((row.created_at, row.id)));
        rows.truncate(NOTIFICATION_LIST_LIMIT);
        Ok(rows)
    }

    async fn count_unread(&self, access: &S, owner: &S::Owner) -> StoreResult<u64> {
        let (tables, scope) = self.admit(access)?;
        let unread = scope
            .select(&tables.notifications, owner, Notification::is_unread)
            .len();
        Ok(u64::try_from(unread).unwrap_or(u64::MAX))
    }

    async fn mark_read(&self, access: &S, owner: &S::Owner, id: RecordId) -> StoreResult<bool> {
        let (mut tables, scope) = self.admit(access)?;
        let Some(row) = scope
            .find(&mut tables.notifications, id)
            .filter(|row| &row.owner == owner)
        else {
            return Ok(false);
        };
        row.fields.is_read = true;
        row.fields.read_at = Some(Utc::now());
        Ok(true)
    }

    async fn dismiss(&self, access: &S, owner: &S::Owner, id: RecordId) -> StoreResult<bool> {
        let (mut tables, scope) = self.admit(access)?;
        let Some(row) = scope
            .find(&mut tables.notifications, id)
            .filter(|row| &row.owner == owner)
        else {
            return Ok(false);
        };
        row.fields.is_dismissed = true;
        row.fields.dismissed_at = Some(Utc::now());
        Ok(true)
    }

    async fn delete_all_notifications(&self, access: &S, owner: &S::Owner) -> StoreResult<()> {
        let (mut tables, scope) = self.admit(access)?;
        tables
            .notifications
            .retain(|row| &row.owner != owner || !scope.sees(&row.owner));
        Ok(())
    }
}

#[async_trait]
impl<S: MemoryScope> ConversationStore<S> for MemoryStore<S> {
    async fn insert_conversation(
        &self,
        access: &S,
        owner: &S::Owner,
        conversation: &Conversation,
    ) -> StoreResult<Owned<Conversation, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, conversation.clone());
        tables.conversations.push(row.clone());
        Ok(row)
    }

    async fn list_conversations(
        &self,
        access: &S,
        owner: &S::Owner,
        limit: u32,
    ) -> StoreResult<Vec<Owned<Conversation, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.conversations, owner, |_| true);
        rows.sort_by_key(|row| (row.created_at, row.id));
        Ok(take(rows, limit))
    }

    async fn delete_all_conversations(&self, access: &S, owner: &S::Owner) -> StoreResult<()> {
        let (mut tables, scope) = self.admit(access)?;
        tables
            .conversations
            .retain(|row| &row.owner != owner || !scope.sees(&row.owner));
        Ok(())
    }

    async fn insert_feedback(
        &self,
        access: &S,
        owner: &S::Owner,
        feedback: &ConversationFeedback,
    ) -> StoreResult<Owned<ConversationFeedback, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, feedback.clone());
        tables.feedback.push(row.clone());
        Ok(row)
    }

    async fn find_feedback(
        &self,
        access: &S,
        conversation_id: RecordId,
    ) -> StoreResult<Option<Owned<ConversationFeedback, S>>> {
        let (tables, scope) = self.admit(access)?;
        Ok(tables
            .feedback
            .iter()
            .filter(|row| scope.sees(&row.owner) && row.fields.conversation_id == conversation_id)
            .max_by_key(|row| (row.created_at, row.id))
            .cloned())
    }
}

#[async_trait]
impl<S: MemoryScope> IoTStore<S> for MemoryStore<S> {
    async fn insert_device(
        &self,
        access: &S,
        owner: &S::Owner,
        device: &IoTDevice,
    ) -> StoreResult<Owned<IoTDevice, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        if tables
            .devices
            .iter()
            .any(|row| row.fields.device_id == device.device_id)
        {
            return Err(unique_violation("iot_devices_deviceId_key"));
        }
        let row = tables.stamp(owner, device.clone());
        tables.devices.push(row.clone());
        Ok(row)
    }

    async fn list_devices(
        &self,
        access: &S,
        owner: &S::Owner,
    ) -> StoreResult<Vec<Owned<IoTDevice, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows = scope.select(&tables.devices, owner, |_| true);
        rows.sort_by_key(|row| Reverse((row.created_at, row.id)));
        Ok(rows)
    }

    async fn find_device(
        &self,
        access: &S,
        device_id: &str,
    ) -> StoreResult<Option<Owned<IoTDevice, S>>> {
        let (mut tables, scope) = self.admit(access)?;
        Ok(scope
            .find_by(&mut tables.devices, |row| row.fields.device_id == device_id)
            .cloned())
    }

    async fn update_device_state(
        &self,
        access: &S,
        device_id: &str,
        update: &DeviceStateUpdate,
    ) -> StoreResult<Option<Owned<IoTDevice, S>>> {
        let (mut tables, scope) = self.admit(access)?;
        Ok(scope
            .find_by(&mut tables.devices, |row| row.fields.device_id == device_id)
            .map(|row| {
                update.apply(&mut row.fields, Utc::now());
                row.clone()
            }))
    }

    async fn delete_device(&self, access: &S, device_id: &str) -> StoreResult<()> {
        let (mut tables, scope) = self.admit(access)?;
        tables
            .devices
            .retain(|row| row.fields.device_id != device_id || !scope.sees(&row.owner));
        Ok(())
    }

    async fn insert_command(
        &self,
        access: &S,
        owner: &S::Owner,
        command: &IoTCommand,
    ) -> StoreResult<Owned<IoTCommand, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        let row = tables.stamp(owner, command.clone());
        tables.commands.push(row.clone());
        Ok(row)
    }

    async fn list_commands(
        &self,
        access: &S,
        device_id: &str,
        limit: u32,
    ) -> StoreResult<Vec<Owned<IoTCommand, S>>> {
        let (tables, scope) = self.admit(access)?;
        let mut rows: Vec<_> = tables
            .commands
            .iter()
            .filter(|row| scope.sees(&row.owner) && row.fields.device_id == device_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| Reverse((row.created_at, row.id)));
        Ok(take(rows, limit))
    }
}

#[async_trait]
impl<S: MemoryScope> ProfileStore<S> for MemoryStore<S> {
    async fn find_profile(
        &self,
        access: &S,
        owner: &S::Owner,
    ) -> StoreResult<Option<Owned<UserProfile, S>>> {
        let (mut tables, scope) = self.admit(access)?;
        Ok(scope
            .find_by(&mut tables.profiles, |row| &row.owner == owner)
            .cloned())
    }

    async fn insert_profile(
        &self,
        access: &S,
        owner: &S::Owner,
        profile: &UserProfile,
    ) -> StoreResult<Owned<UserProfile, S>> {
        let (mut tables, scope) = self.admit(access)?;
        scope.check_write(owner)?;
        if tables.profiles.iter().any(|row| &row.owner == owner) {
            return Err(unique_violation("user_profiles_userId_key"));
        }
        let row = tables.stamp(owner, profile.clone());
        tables.profiles.push(row.clone());
        Ok(row)
    }

    async fn update_profile(
        &self,
        access: &S,
        owner: &S::Owner,
        patch: &ProfilePatch,
    ) -> StoreResult<Option<Owned<UserProfile, S>>> {
        let (mut tables, scope) = self.admit(access)?;
        Ok(scope
            .find_by(&mut tables.profiles, |row| &row.owner == owner)
            .map(|row| {
                patch.apply(&mut row.fields);
                row.clone()
            }))
    }
}
