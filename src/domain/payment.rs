use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::billing::{ensure_money_scale, BillingStatus};
use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Va,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Va => "va",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "va" => Ok(PaymentMethod::Va),
            "transfer" => Ok(PaymentMethod::Transfer),
            other => Err(DomainError::InvalidInput(format!(
                "unknown payment method '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentView {
    pub id: Uuid,
    pub billing_id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: BigDecimal,
    pub method: PaymentMethod,
    pub created_by: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub billing_id: Uuid,
    pub amount: BigDecimal,
    pub method: PaymentMethod,
    pub paid_at: DateTime<Utc>,
    pub recorded_by: Uuid,
}

pub fn total_paid<'a>(amounts: impl IntoIterator<Item = &'a BigDecimal>) -> BigDecimal {
    amounts
        .into_iter()
        .fold(BigDecimal::from(0), |acc, amount| acc + amount)
}

/// A bill stops accepting payments once `now` is strictly after its due date.
pub fn ensure_before_due(due_date: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), DomainError> {
    if now > due_date {
        return Err(DomainError::PastDue { due_date });
    }
    Ok(())
}

/// Amounts must be positive and expressible in cents.
pub fn validate_amount(amount: &BigDecimal) -> Result<(), DomainError> {
    if *amount <= BigDecimal::from(0) {
        return Err(DomainError::InvalidInput(format!(
            "payment amount must be positive, got {amount}"
        )));
    }
    ensure_money_scale("payment amount", amount)
}

/// Cancelled and refunded bills take no further payments.
pub fn ensure_accepts_payments(status: BillingStatus) -> Result<(), DomainError> {
    if status.is_administrative() {
        return Err(DomainError::Conflict(format!("billing is {status}")));
    }
    Ok(())
}

/// Reject `amount` when, added to `already_paid`, it would exceed `total`.
pub fn ensure_within_total(
    already_paid: &BigDecimal,
    amount: &BigDecimal,
    total: &BigDecimal,
) -> Result<(), DomainError> {
    if already_paid + amount > *total {
        let remaining = total - already_paid;
        let zero = BigDecimal::from(0);
        return Err(DomainError::AmountExceeded {
            remaining: if remaining < zero { zero } else { remaining },
        });
    }
    Ok(())
}
