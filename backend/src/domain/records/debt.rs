//! Debts and the payments recorded against them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

string_enum! {
    /// Kind of liability.
    pub enum DebtType ("debt type") {
        CreditCard => "credit_card",
        StudentLoan => "student_loan",
        PersonalLoan => "personal_loan",
        AutoLoan => "auto_loan",
        Mortgage => "mortgage",
        Medical => "medical",
        Other => "other",
    }
}

string_enum! {
    /// Lifecycle of a debt.
    pub enum DebtStatus ("debt status") {
        /// Still being repaid.
        Active => "active",
        /// Balance reached zero.
        PaidOff => "paid_off",
        /// Closed without being paid off here.
        Closed => "closed",
    }
}

string_enum! {
    /// How a payment was classified.
    pub enum PaymentKind ("payment type") {
        Minimum => "minimum",
        Extra => "extra",
        LumpSum => "lump_sum",
    }
}

const fn default_status() -> DebtStatus {
    DebtStatus::Active
}

/// A tracked debt. Money is held in cents, rates in basis points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    /// Display name.
    pub name: String,
    /// Kind of liability.
    pub debt_type: DebtType,
    /// Balance when the debt was taken on.
    pub original_balance_cents: i64,
    /// Balance still owed.
    pub current_balance_cents: i64,
    /// Annual rate in basis points (1875 = 18.75%).
    pub interest_rate_bps: i32,
    /// Smallest monthly payment the creditor accepts.
    pub minimum_payment_cents: i64,
    /// Day of the month the payment falls due.
    #[serde(default)]
    pub due_day: Option<i16>,
    /// Lender name.
    #[serde(default)]
    pub creditor: Option<String>,
    /// Lifecycle state.
    #[serde(default = "default_status")]
    pub status: DebtStatus,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Debt {
    /// Inactive debts are hidden from default listings.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == DebtStatus::Active
    }
}

/// Partial update of a [`Debt`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebtPatch {
    /// New display name.
    pub name: Option<String>,
    /// New outstanding balance.
    pub current_balance_cents: Option<i64>,
    /// New annual rate.
    pub interest_rate_bps: Option<i32>,
    /// New minimum payment.
    pub minimum_payment_cents: Option<i64>,
    /// New due day.
    pub due_day: Option<i16>,
    /// New lifecycle state.
    pub status: Option<DebtStatus>,
    /// Replacement notes.
    pub notes: Option<String>,
}

impl DebtPatch {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.current_balance_cents.is_none()
            && self.interest_rate_bps.is_none()
            && self.minimum_payment_cents.is_none()
            && self.due_day.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }

    /// Apply the patch to an in-memory debt.
    pub fn apply(&self, debt: &mut Debt) {
        if let Some(name) = &self.name {
            debt.name.clone_from(name);
        }
        if let Some(balance) = self.current_balance_cents {
            debt.current_balance_cents = balance;
        }
        if let Some(rate) = self.interest_rate_bps {
            debt.interest_rate_bps = rate;
        }
        if let Some(minimum) = self.minimum_payment_cents {
            debt.minimum_payment_cents = minimum;
        }
        if let Some(day) = self.due_day {
            debt.due_day = Some(day);
        }
        if let Some(status) = self.status {
            debt.status = status;
        }
        if let Some(notes) = &self.notes {
            debt.notes = Some(notes.clone());
        }
    }
}

/// A payment made against one debt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayment {
    /// Debt the payment reduces.
    pub debt_id: RecordId,
    /// Amount paid.
    pub amount_cents: i64,
    /// When the payment was made.
    pub payment_date: DateTime<Utc>,
    /// Minimum, extra or lump sum.
    pub payment_type: PaymentKind,
    /// Balance left once the payment cleared.
    pub balance_after_cents: i64,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn drafts_default_to_active() {
        let debt: Debt = serde_json::from_value(json!({
            "name": "Visa",
            "debtType": "credit_card",
            "originalBalanceCents": 500_000,
            "currentBalanceCents": 420_000,
            "interestRateBps": 1875,
            "minimumPaymentCents": 12_500,
        }))
        .expect("deserialise debt");

        assert!(debt.is_active());
        assert_eq!(debt.debt_type, DebtType::CreditCard);
    }

    #[rstest]
    fn empty_patch_is_detected() {
        assert!(DebtPatch::default().is_empty());
        assert!(!DebtPatch {
            status: Some(DebtStatus::PaidOff),
            ..DebtPatch::default()
        }
        .is_empty());
    }
}
