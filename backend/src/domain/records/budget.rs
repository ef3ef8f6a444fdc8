//! Budget categories, transactions and monthly snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

string_enum! {
    /// Direction of money tracked by a category.
    pub enum CategoryKind ("category type") {
        /// Money coming in.
        Income => "income",
        /// Money going out.
        Expense => "expense",
    }
}

/// A user's budget category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    /// Display name.
    pub name: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    /// Monthly limit in cents; zero means unlimited.
    #[serde(default)]
    pub monthly_limit_cents: i64,
    /// Optional display colour.
    #[serde(default)]
    pub color: Option<String>,
    /// Optional icon identifier.
    #[serde(default)]
    pub icon: Option<String>,
    /// Whether the category was seeded by default.
    #[serde(default)]
    pub is_default: bool,
    /// Position in listings.
    #[serde(default)]
    pub sort_order: i32,
}

/// Partial update of a [`BudgetCategory`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetCategoryPatch {
    /// New display name.
    pub name: Option<String>,
    /// New monthly limit in cents.
    pub monthly_limit_cents: Option<i64>,
    /// New display colour.
    pub color: Option<String>,
    /// New icon identifier.
    pub icon: Option<String>,
    /// New listing position.
    pub sort_order: Option<i32>,
}

impl BudgetCategoryPatch {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.monthly_limit_cents.is_none()
            && self.color.is_none()
            && self.icon.is_none()
            && self.sort_order.is_none()
    }

    /// Apply the patch to an in-memory category.
    pub fn apply(&self, category: &mut BudgetCategory) {
        if let Some(name) = &self.name {
            category.name.clone_from(name);
        }
        if let Some(limit) = self.monthly_limit_cents {
            category.monthly_limit_cents = limit;
        }
        if let Some(color) = &self.color {
            category.color = Some(color.clone());
        }
        if let Some(icon) = &self.icon {
            category.icon = Some(icon.clone());
        }
        if let Some(sort_order) = self.sort_order {
            category.sort_order = sort_order;
        }
    }
}

/// A single income or expense entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTransaction {
    /// Category the entry is booked against.
    pub category_id: RecordId,
    /// Signed amount in cents.
    pub amount_cents: i64,
    /// When the money moved.
    pub transaction_date: DateTime<Utc>,
    /// Short label.
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Whether the entry repeats monthly.
    #[serde(default)]
    pub is_recurring: bool,
}

/// Optional narrowing of a transaction listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionFilter {
    /// Only entries in this category.
    pub category_id: Option<RecordId>,
    /// Inclusive lower bound on `transaction_date`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `transaction_date`.
    pub until: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    /// Whether a transaction falls inside the filter.
    #[must_use]
    pub fn matches(&self, transaction: &BudgetTransaction) -> bool {
        self.category_id
            .is_none_or(|category| category == transaction.category_id)
            && self
                .from
                .is_none_or(|from| transaction.transaction_date >= from)
            && self
                .until
                .is_none_or(|until| transaction.transaction_date <= until)
    }
}

/// `YYYY-MM` month key; sorts chronologically as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthYear(String);

/// Rejected month key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("month must be formatted YYYY-MM: {0}")]
pub struct InvalidMonthYear(String);

impl MonthYear {
    /// Parse a `YYYY-MM` key.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidMonthYear> {
        let value = value.into();
        let valid = value
            .split_once('-')
            .filter(|(year, month)| {
                year.len() == 4
                    && year.chars().all(|c| c.is_ascii_digit())
                    && month
                        .parse::<u8>()
                        .is_ok_and(|m| month.len() == 2 && (1..=12).contains(&m))
            })
            .is_some();
        if valid { Ok(Self(value)) } else { Err(InvalidMonthYear(value)) }
    }

    /// Borrow the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for MonthYear {
    type Error = InvalidMonthYear;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonthYear> for String {
    fn from(value: MonthYear) -> Self {
        value.0
    }
}

/// Month-end summary used by the debt planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    /// Month the snapshot covers.
    pub month_year: MonthYear,
    /// Income booked in the month.
    pub total_income_cents: i64,
    /// Expenses booked in the month.
    pub total_expenses_cents: i64,
    /// Debt repayments made in the month.
    #[serde(default)]
    pub total_debt_payments_cents: i64,
    /// Surplus the planner may put towards debt.
    #[serde(default)]
    pub available_for_debt_cents: i64,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("2025-01", true)]
    #[case("2025-12", true)]
    #[case("2025-13", false)]
    #[case("2025-1", false)]
    #[case("25-01", false)]
    #[case("January", false)]
    fn month_keys_are_validated(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(MonthYear::new(raw).is_ok(), valid);
    }

    #[rstest]
    fn category_kind_round_trips_through_text() {
        assert_eq!("income".parse::<CategoryKind>(), Ok(CategoryKind::Income));
        assert!("savings".parse::<CategoryKind>().is_err());
        assert_eq!(CategoryKind::Expense.as_str(), "expense");
    }

    #[rstest]
    fn patches_only_touch_named_fields() {
        let mut category = BudgetCategory {
            name: "Food".to_owned(),
            kind: CategoryKind::Expense,
            monthly_limit_cents: 40_000,
            color: None,
            icon: None,
            is_default: false,
            sort_order: 3,
        };
        let patch = BudgetCategoryPatch {
            monthly_limit_cents: Some(50_000),
            ..BudgetCategoryPatch::default()
        };

        patch.apply(&mut category);

        assert_eq!(category.monthly_limit_cents, 50_000);
        assert_eq!(category.name, "Food");
        assert_eq!(category.sort_order, 3);
    }

    #[rstest]
    fn transaction_filter_bounds_are_inclusive() {
        let day = |d| Utc.with_ymd_and_hms(2025, 3, d, 0, 0, 0).single().expect("date");
        let transaction = BudgetTransaction {
            category_id: RecordId::new(1),
            amount_cents: -1_250,
            transaction_date: day(10),
            description: None,
            notes: None,
            is_recurring: false,
        };
        let filter = TransactionFilter {
            category_id: Some(RecordId::new(1)),
            from: Some(day(10)),
            until: Some(day(10)),
        };

        assert!(filter.matches(&transaction));
        assert!(!TransactionFilter {
            category_id: Some(RecordId::new(2)),
            ..TransactionFilter::default()
        }
        .matches(&transaction));
    }
}
