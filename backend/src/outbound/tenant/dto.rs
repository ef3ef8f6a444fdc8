//! Wire shapes of the tenant tables.
//!
//! Tenant tables use snake_case columns and native booleans. Owned rows
//! share the `id`, `user_id`, `created_at` envelope; the remaining columns
//! are declared per table with [`columns!`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::identity::SubjectId;
use crate::domain::ports::{StoreError, StoreResult};
use crate::domain::records::budget::{
    BudgetCategory, BudgetCategoryPatch, BudgetSnapshot, BudgetTransaction, CategoryKind,
    MonthYear,
};
use crate::domain::records::conversations::{Conversation, ConversationFeedback, FeedbackType};
use crate::domain::records::debt::{
    Debt, DebtPatch, DebtPayment, DebtStatus, DebtType, PaymentKind,
};
use crate::domain::records::goals::{
    FinancialGoal, GoalPatch, GoalProgressEntry, GoalStatus, GoalType, ProgressSource,
};
use crate::domain::records::iot::{
    CommandStatus, ConnectionType, DeviceStateUpdate, DeviceStatus, DeviceType, IoTCommand,
    IoTDevice,
};
use crate::domain::records::learning::{Difficulty, UserVocabulary, VocabularyItem};
use crate::domain::records::notifications::Notification;
use crate::domain::records::profiles::{ProfilePatch, UserProfile};
use crate::domain::records::translation::{SavedTranslation, TranslationCategory};
use crate::domain::records::{RecordId, Stored};

/// A record keyed the way the tenant store keys it.
pub(super) type TenantRow<T> = Stored<T, SubjectId>;

/// Column set of one table, convertible into its domain type.
pub(super) trait Columns: DeserializeOwned {
    type Domain;

    fn into_domain(self) -> Self::Domain;
}

/// Declare a column struct mirroring a domain type field for field.
macro_rules! columns {
    (
        $(#[$meta:meta])*
        $name:ident => $domain:path {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub(super) struct $name {
            $( $(#[$field_meta])* $field: $ty, )+
        }

        impl From<$domain> for $name {
            fn from(value: $domain) -> Self {
                Self { $( $field: value.$field, )+ }
            }
        }

        impl Columns for $name {
            type Domain = $domain;

            fn into_domain(self) -> Self::Domain {
                $domain { $( $field: self.$field, )+ }
            }
        }
    };
}

/// Envelope of an owned row.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct RowDto<F> {
    id: i64,
    user_id: String,
    #[serde(alias = "executed_at")]
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    fields: F,
}

impl<F: Columns> RowDto<F> {
    /// Decode into a record owned by the row's subject.
    pub(super) fn into_record(self) -> StoreResult<TenantRow<F::Domain>> {
        let owner =
            SubjectId::new(self.user_id).map_err(|err| StoreError::decode(err.to_string()))?;
        Ok(Stored {
            id: RecordId::new(self.id),
            owner,
            created_at: self.created_at,
            fields: self.fields.into_domain(),
        })
    }
}

/// Insert body: the owner column followed by the table's columns.
#[derive(Debug, Clone, Serialize)]
pub(super) struct InsertDto<'a, F> {
    user_id: &'a str,
    #[serde(flatten)]
    fields: F,
}

impl<'a, F: Serialize> InsertDto<'a, F> {
    pub(super) fn new(owner: &'a SubjectId, fields: impl Into<F>) -> Self {
        Self {
            user_id: owner.as_str(),
            fields: fields.into(),
        }
    }
}

columns! {
    BudgetCategoryColumns => BudgetCategory {
        name: String,
        #[serde(rename = "type")]
        kind: CategoryKind,
        monthly_limit_cents: i64,
        color: Option<String>,
        icon: Option<String>,
        is_default: bool,
        sort_order: i32,
    }
}

columns! {
    BudgetTransactionColumns => BudgetTransaction {
        category_id: RecordId,
        amount_cents: i64,
        transaction_date: DateTime<Utc>,
        description: Option<String>,
        notes: Option<String>,
        is_recurring: bool,
    }
}

columns! {
    BudgetSnapshotColumns => BudgetSnapshot {
        month_year: MonthYear,
        total_income_cents: i64,
        total_expenses_cents: i64,
        total_debt_payments_cents: i64,
        available_for_debt_cents: i64,
        notes: Option<String>,
    }
}

columns! {
    DebtColumns => Debt {
        name: String,
        debt_type: DebtType,
        original_balance_cents: i64,
        current_balance_cents: i64,
        interest_rate_bps: i32,
        minimum_payment_cents: i64,
        due_day: Option<i16>,
        creditor: Option<String>,
        status: DebtStatus,
        notes: Option<String>,
    }
}

columns! {
    DebtPaymentColumns => DebtPayment {
        debt_id: RecordId,
        amount_cents: i64,
        payment_date: DateTime<Utc>,
        payment_type: PaymentKind,
        balance_after_cents: i64,
        notes: Option<String>,
    }
}

columns! {
    FinancialGoalColumns => FinancialGoal {
        name: String,
        description: Option<String>,
        goal_type: GoalType,
        target_amount_cents: i64,
        current_amount_cents: i64,
        target_date: Option<DateTime<Utc>>,
        status: GoalStatus,
        priority: i16,
    }
}

columns! {
    /// History rows carry their own id and are read without the envelope.
    GoalProgressColumns => GoalProgressEntry {
        id: RecordId,
        goal_id: RecordId,
        amount_cents: i64,
        new_total_cents: i64,
        source: ProgressSource,
        note: Option<String>,
        progress_date: DateTime<Utc>,
    }
}

columns! {
    /// Shared catalogue rows; not owned.
    VocabularyItemColumns => VocabularyItem {
        id: RecordId,
        language: String,
        word: String,
        translation: String,
        pronunciation: Option<String>,
        part_of_speech: Option<String>,
        difficulty: Difficulty,
        category: Option<String>,
        example_sentence: Option<String>,
    }
}

columns! {
    UserVocabularyColumns => UserVocabulary {
        vocabulary_item_id: RecordId,
        language: String,
        times_reviewed: i32,
        correct_count: i32,
        last_reviewed: Option<DateTime<Utc>>,
    }
}

columns! {
    SavedTranslationColumns => SavedTranslation {
        original_text: String,
        translated_text: String,
        source_language: String,
        target_language: String,
        category_id: Option<RecordId>,
        is_favorite: bool,
        usage_count: i32,
    }
}

columns! {
    TranslationCategoryColumns => TranslationCategory {
        name: String,
        icon: Option<String>,
    }
}

columns! {
    NotificationColumns => Notification {
        title: String,
        message: String,
        is_read: bool,
        read_at: Option<DateTime<Utc>>,
        is_dismissed: bool,
        dismissed_at: Option<DateTime<Utc>>,
    }
}

columns! {
    ConversationColumns => Conversation {
        user_message: String,
        assistant_response: String,
        audio_url: Option<String>,
    }
}

columns! {
    ConversationFeedbackColumns => ConversationFeedback {
        conversation_id: RecordId,
        feedback_type: FeedbackType,
        comment: Option<String>,
    }
}

columns! {
    IoTDeviceColumns => IoTDevice {
        device_id: String,
        device_name: String,
        device_type: DeviceType,
        room: String,
        manufacturer: Option<String>,
        model: Option<String>,
        status: DeviceStatus,
        state: Option<String>,
        capabilities: Option<String>,
        connection_type: ConnectionType,
        connection_config: Option<String>,
        last_seen: Option<DateTime<Utc>>,
    }
}

columns! {
    /// Command rows name their timestamp `executed_at`.
    IoTCommandColumns => IoTCommand {
        device_id: String,
        command: String,
        parameters: Option<String>,
        status: CommandStatus,
        error_message: Option<String>,
    }
}

columns! {
    UserProfileColumns => UserProfile {
        sarcasm_level: i16,
        total_interactions: i32,
        positive_responses: i32,
        negative_responses: i32,
        average_response_length: i32,
        preferred_topics: Option<String>,
        interaction_patterns: Option<String>,
        last_interaction: Option<DateTime<Utc>>,
    }
}

/// New goal history row.
#[derive(Debug, Clone, Serialize)]
pub(super) struct NewProgressDto<'a> {
    pub goal_id: RecordId,
    pub user_id: &'a str,
    pub amount_cents: i64,
    pub new_total_cents: i64,
    pub source: ProgressSource,
    pub note: Option<&'a str>,
    pub progress_date: DateTime<Utc>,
}

/// Partial category update.
#[derive(Debug, Clone, Serialize)]
pub(super) struct BudgetCategoryChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_limit_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<i32>,
}

impl<'a> From<&'a BudgetCategoryPatch> for BudgetCategoryChanges<'a> {
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

/// Partial debt update.
#[derive(Debug, Clone, Serialize)]
pub(super) struct DebtChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_balance_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interest_rate_bps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_payment_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_day: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<DebtStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

impl<'a> From<&'a DebtPatch> for DebtChanges<'a> {
    fn from(patch: &'a DebtPatch) -> Self {
        Self {
            name: patch.name.as_deref(),
            current_balance_cents: patch.current_balance_cents,
            interest_rate_bps: patch.interest_rate_bps,
            minimum_payment_cents: patch.minimum_payment_cents,
            due_day: patch.due_day,
            status: patch.status,
            notes: patch.notes.as_deref(),
        }
    }
}

/// Partial goal update.
#[derive(Debug, Clone, Serialize)]
pub(super) struct GoalChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_amount_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_amount_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<GoalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<i16>,
}

impl<'a> From<&'a GoalPatch> for GoalChanges<'a> {
    fn from(patch: &'a GoalPatch) -> Self {
        Self {
            name: patch.name.as_deref(),
            description: patch.description.as_deref(),
            target_amount_cents: patch.target_amount_cents,
            current_amount_cents: patch.current_amount_cents,
            target_date: patch.target_date,
            status: patch.status,
            priority: patch.priority,
        }
    }
}

/// Columns written by a device state report.
#[derive(Debug, Clone, Serialize)]
pub(super) struct DeviceStateChanges<'a> {
    state: &'a str,
    status: DeviceStatus,
    last_seen: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'a> DeviceStateChanges<'a> {
    pub(super) fn new(update: &'a DeviceStateUpdate, now: DateTime<Utc>) -> Self {
        Self {
            state: update.state.as_str(),
            status: update.status,
            last_seen: now,
            updated_at: now,
        }
    }
}

/// Partial profile update; `updated_at` is always sent.
#[derive(Debug, Clone, Serialize)]
pub(super) struct ProfileChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    sarcasm_level: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_interactions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    positive_responses: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_responses: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_response_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_topics: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interaction_patterns: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_interaction: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl<'a> ProfileChanges<'a> {
    pub(super) fn new(patch: &'a ProfilePatch, now: DateTime<Utc>) -> Self {
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

/// Review counters written back after a vocabulary review.
#[derive(Debug, Clone, Serialize)]
pub(super) struct ReviewChanges {
    pub times_reviewed: i32,
    pub correct_count: i32,
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl From<&UserVocabulary> for ReviewChanges {
    fn from(progress: &UserVocabulary) -> Self {
        Self {
            times_reviewed: progress.times_reviewed,
            correct_count: progress.correct_count,
            last_reviewed: progress.last_reviewed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn subject() -> SubjectId {
        SubjectId::new("user-42").expect("valid subject")
    }

    #[rstest]
    fn category_rows_decode_snake_case_columns_and_booleans() {
        let row: RowDto<BudgetCategoryColumns> = serde_json::from_value(json!({
            "id": 9,
            "user_id": "user-42",
            "created_at": "2025-01-01T00:00:00Z",
            "name": "Rent",
            "type": "expense",
            "monthly_limit_cents": 120000,
            "color": null,
            "icon": "home",
            "is_default": true,
            "sort_order": 1,
        }))
        .expect("row decodes");

        let record = row.into_record().expect("record");
        assert_eq!(record.id, RecordId::new(9));
        assert_eq!(record.owner, subject());
        assert_eq!(record.fields.kind, CategoryKind::Expense);
        assert!(record.fields.is_default);
    }

    #[rstest]
    fn unknown_labels_fail_to_decode() {
        let result = serde_json::from_value::<RowDto<DebtColumns>>(json!({
            "id": 1,
            "user_id": "user-42",
            "created_at": "2025-01-01T00:00:00Z",
            "name": "Card",
            "debt_type": "payday",
            "original_balance_cents": 1000,
            "current_balance_cents": 500,
            "interest_rate_bps": 1999,
            "minimum_payment_cents": 50,
            "due_day": 3,
            "creditor": null,
            "status": "active",
            "notes": null,
        }));
        assert!(result.is_err());
    }

    #[rstest]
    fn blank_owner_is_a_decode_error() {
        let row: RowDto<ConversationColumns> = serde_json::from_value(json!({
            "id": 1,
            "user_id": "",
            "created_at": "2025-01-01T00:00:00Z",
            "user_message": "hola",
            "assistant_response": "hello",
            "audio_url": null,
        }))
        .expect("row decodes");
        assert!(matches!(row.into_record(), Err(StoreError::Decode { .. })));
    }

    #[rstest]
    fn insert_bodies_carry_the_owner_column() {
        let owner = subject();
        let body: InsertDto<'_, TranslationCategoryColumns> = InsertDto::new(
            &owner,
            TranslationCategory {
                name: "Travel".to_owned(),
                icon: None,
            },
        );
        assert_eq!(
            serde_json::to_value(&body).expect("serialise"),
            json!({ "user_id": "user-42", "name": "Travel", "icon": null })
        );
    }

    #[rstest]
    fn command_rows_read_the_execution_timestamp() {
        let row: RowDto<IoTCommandColumns> = serde_json::from_value(json!({
            "id": 4,
            "user_id": "user-42",
            "executed_at": "2025-03-01T12:00:00Z",
            "device_id": "hue-1",
            "command": "turn_on",
            "parameters": null,
            "status": "success",
            "error_message": null,
        }))
        .expect("row decodes");

        let record = row.into_record().expect("record");
        assert_eq!(record.created_at.to_rfc3339(), "2025-03-01T12:00:00+00:00");
        assert_eq!(record.fields.status, CommandStatus::Success);
    }

    #[rstest]
    fn profile_changes_always_touch_updated_at() {
        let now = DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_default();
        let patch = ProfilePatch {
            sarcasm_level: Some(8),
            ..ProfilePatch::default()
        };
        assert_eq!(
            serde_json::to_value(ProfileChanges::new(&patch, now)).expect("serialise"),
            json!({ "sarcasm_level": 8, "updated_at": "1970-01-01T00:00:00Z" })
        );
    }

    #[rstest]
    fn patches_only_send_named_columns() {
        let patch = GoalPatch {
            priority: Some(3),
            ..GoalPatch::default()
        };
        assert_eq!(
            serde_json::to_value(GoalChanges::from(&patch)).expect("serialise"),
            json!({ "priority": 3 })
        );
    }
}
