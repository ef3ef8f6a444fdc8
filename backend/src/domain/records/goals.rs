//! Financial goals and their progress history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

string_enum! {
    /// What the goal is saving towards.
    pub enum GoalType ("goal type") {
        Savings => "savings",
        EmergencyFund => "emergency_fund",
        DebtPayoff => "debt_payoff",
        Purchase => "purchase",
        Investment => "investment",
        Other => "other",
    }
}

string_enum! {
    /// Lifecycle of a goal.
    pub enum GoalStatus ("goal status") {
        Active => "active",
        Completed => "completed",
        Paused => "paused",
        Cancelled => "cancelled",
    }
}

string_enum! {
    /// Origin of a progress entry.
    pub enum ProgressSource ("progress source") {
        Manual => "manual",
        AutoBudget => "auto_budget",
        AutoDebt => "auto_debt",
    }
}

const fn default_goal_status() -> GoalStatus {
    GoalStatus::Active
}

/// A savings or payoff target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialGoal {
    /// Display name.
    pub name: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// What the goal saves towards.
    pub goal_type: GoalType,
    /// Amount to reach.
    pub target_amount_cents: i64,
    /// Amount saved so far.
    #[serde(default)]
    pub current_amount_cents: i64,
    /// Deadline, if any.
    #[serde(default)]
    pub target_date: Option<DateTime<Utc>>,
    /// Lifecycle state.
    #[serde(default = "default_goal_status")]
    pub status: GoalStatus,
    /// Higher numbers are more urgent.
    #[serde(default)]
    pub priority: i16,
}

/// Partial update of a [`FinancialGoal`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalPatch {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New target amount.
    pub target_amount_cents: Option<i64>,
    /// New saved amount.
    pub current_amount_cents: Option<i64>,
    /// New deadline.
    pub target_date: Option<DateTime<Utc>>,
    /// New lifecycle state.
    pub status: Option<GoalStatus>,
    /// New priority.
    pub priority: Option<i16>,
}

impl GoalPatch {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.target_amount_cents.is_none()
            && self.current_amount_cents.is_none()
            && self.target_date.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }

    /// Apply the patch to an in-memory goal.
    pub fn apply(&self, goal: &mut FinancialGoal) {
        if let Some(name) = &self.name {
            goal.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            goal.description = Some(description.clone());
        }
        if let Some(target) = self.target_amount_cents {
            goal.target_amount_cents = target;
        }
        if let Some(current) = self.current_amount_cents {
            goal.current_amount_cents = current;
        }
        if let Some(date) = self.target_date {
            goal.target_date = Some(date);
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
        if let Some(priority) = self.priority {
            goal.priority = priority;
        }
    }
}

/// A contribution towards a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Amount added to the goal.
    pub amount_cents: i64,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
    /// Where the contribution came from.
    pub source: ProgressSource,
}

impl GoalProgress {
    /// A manual contribution without a note.
    #[must_use]
    pub const fn manual(amount_cents: i64) -> Self {
        Self {
            amount_cents,
            note: None,
            source: ProgressSource::Manual,
        }
    }

    /// Running total after applying this contribution.
    #[must_use]
    pub const fn new_total(&self, current_amount_cents: i64) -> i64 {
        current_amount_cents.saturating_add(self.amount_cents)
    }
}

/// One row of a goal's progress history.
///
/// History rows are reached through their goal, so they carry no owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressEntry {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Goal the entry belongs to.
    pub goal_id: RecordId,
    /// Amount contributed.
    pub amount_cents: i64,
    /// Goal total after this entry.
    pub new_total_cents: i64,
    /// Where the contribution came from.
    pub source: ProgressSource,
    /// Free-form note.
    pub note: Option<String>,
    /// When the entry was recorded.
    pub progress_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 2_500, 2_500)]
    #[case(10_000, -500, 9_500)]
    #[case(i64::MAX, 1, i64::MAX)]
    fn progress_adds_to_the_running_total(
        #[case] current: i64,
        #[case] amount: i64,
        #[case] expected: i64,
    ) {
        assert_eq!(GoalProgress::manual(amount).new_total(current), expected);
    }

    #[rstest]
    fn patch_updates_status_only() {
        let mut goal = FinancialGoal {
            name: "Trip".to_owned(),
            description: None,
            goal_type: GoalType::Savings,
            target_amount_cents: 200_000,
            current_amount_cents: 0,
            target_date: None,
            status: GoalStatus::Active,
            priority: 1,
        };
        GoalPatch {
            status: Some(GoalStatus::Paused),
            ..GoalPatch::default()
        }
        .apply(&mut goal);

        assert_eq!(goal.status, GoalStatus::Paused);
        assert_eq!(goal.name, "Trip");
    }
}
