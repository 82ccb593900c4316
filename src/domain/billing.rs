use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;
use super::order::OrderStatus;

/// Minutes a bill stays payable after it is issued.
pub const PAYMENT_WINDOW_MINUTES: i64 = 30;

/// Tax rate in percent applied to every order subtotal.
pub const TAX_RATE_PERCENT: i64 = 10;

/// Decimal places kept on money columns.
pub const MONEY_SCALE: i64 = 2;

pub fn tax_rate() -> BigDecimal {
    BigDecimal::new(TAX_RATE_PERCENT.into(), 2)
}

pub fn payment_window() -> Duration {
    Duration::minutes(PAYMENT_WINDOW_MINUTES)
}

/// Money columns would silently round anything finer than cents.
pub fn ensure_money_scale(field: &str, amount: &BigDecimal) -> Result<(), DomainError> {
    if amount.normalized().fractional_digit_count() > MONEY_SCALE {
        return Err(DomainError::InvalidInput(format!(
            "{field} must have at most {MONEY_SCALE} decimal places, got {amount}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    Unpaid,
    #[serde(rename = "lesspaid")]
    LessPaid,
    Paid,
    Cancelled,
    Refunded,
}

impl BillingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingStatus::Unpaid => "unpaid",
            BillingStatus::LessPaid => "lesspaid",
            BillingStatus::Paid => "paid",
            BillingStatus::Cancelled => "cancelled",
            BillingStatus::Refunded => "refunded",
        }
    }

    /// Statuses that can still receive payments and be looked up for payment.
    pub fn unresolved() -> [BillingStatus; 2] {
        [BillingStatus::Unpaid, BillingStatus::LessPaid]
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, BillingStatus::Unpaid | BillingStatus::LessPaid)
    }

    /// Set administratively; payments and reconciliation leave them alone.
    pub fn is_administrative(&self) -> bool {
        matches!(self, BillingStatus::Cancelled | BillingStatus::Refunded)
    }
}

impl fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(BillingStatus::Unpaid),
            "lesspaid" => Ok(BillingStatus::LessPaid),
            "paid" => Ok(BillingStatus::Paid),
            "cancelled" => Ok(BillingStatus::Cancelled),
            "refunded" => Ok(BillingStatus::Refunded),
            other => Err(DomainError::Internal(format!(
                "unknown billing status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BillingView {
    pub id: Uuid,
    pub order_id: Uuid,
    pub number_display: String,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub tax: BigDecimal,
    pub total: BigDecimal,
    pub status: BillingStatus,
    pub created_by: Uuid,
}

/// The computed part of a bill, before it is numbered and stored.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingDraft {
    pub order_id: Uuid,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub tax: BigDecimal,
    pub total: BigDecimal,
}

impl BillingDraft {
    /// Derive a bill for an order whose subtotal is `order_total`, issued at
    /// `issued_at`.
    ///
    /// Tax is rounded half-up to the money scale; the total is the subtotal
    /// plus that rounded tax, so `total - tax` always equals the subtotal.
    pub fn for_order(order_id: Uuid, order_total: &BigDecimal, issued_at: DateTime<Utc>) -> Self {
        let tax = (order_total * tax_rate()).with_scale_round(MONEY_SCALE, RoundingMode::HalfUp);
        let total = order_total + &tax;
        Self {
            order_id,
            issue_date: issued_at,
            due_date: issued_at + payment_window(),
            tax,
            total,
        }
    }

    /// The order subtotal this draft was derived from.
    pub fn subtotal(&self) -> BigDecimal {
        &self.total - &self.tax
    }

    /// The order, as it stands when the bill is stored, must still be
    /// processing and total what the draft was derived from.
    pub fn ensure_current(
        &self,
        order_number: &str,
        status: OrderStatus,
        order_total: &BigDecimal,
    ) -> Result<(), DomainError> {
        if status != OrderStatus::Processing {
            return Err(DomainError::Conflict(format!(
                "order {order_number} is {status} and cannot be billed"
            )));
        }
        if self.subtotal() != *order_total {
            return Err(DomainError::Conflict(format!(
                "order {order_number} changed while it was being billed"
            )));
        }
        Ok(())
    }
}

/// Outcome of reconciling a bill against its recorded payments.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub billing_id: Uuid,
    pub order_id: Uuid,
    pub amount_paid: BigDecimal,
    pub billing_status: BillingStatus,
    /// Set when the owning order was moved to `completed`.
    pub order_status: Option<OrderStatus>,
}

/// Status a bill should have once `paid` out of `total` has been received.
///
/// Administrative statuses are kept. A paid bill never falls back, and a bill
/// without any payment stays unpaid so re-running reconciliation on a fresh
/// bill changes nothing.
pub fn settle(current: BillingStatus, paid: &BigDecimal, total: &BigDecimal) -> BillingStatus {
    if current.is_administrative() {
        return current;
    }
    if paid >= total {
        return BillingStatus::Paid;
    }
    if current == BillingStatus::Paid {
        return current;
    }
    if *paid > BigDecimal::from(0) {
        BillingStatus::LessPaid
    } else {
        BillingStatus::Unpaid
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::TimeZone;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn bill_adds_ten_percent_tax_and_thirty_minutes() {
        let issued = Utc.with_ymd_and_hms(2025, 6, 5, 10, 0, 0).unwrap();
        let draft = BillingDraft::for_order(Uuid::new_v4(), &dec("200000"), issued);

        assert_eq!(draft.tax, dec("20000"));
        assert_eq!(draft.total, dec("220000"));
        assert_eq!(draft.issue_date, issued);
        assert_eq!(draft.due_date, issued + Duration::minutes(30));
    }

    #[test]
    fn tax_is_rounded_to_cents() {
        let issued = Utc::now();
        let draft = BillingDraft::for_order(Uuid::new_v4(), &dec("9.99"), issued);
        assert_eq!(draft.tax, dec("1.00"));
        assert_eq!(draft.total, dec("10.99"));
    }

    #[test]
    fn draft_only_stands_for_an_unchanged_processing_order() {
        let draft = BillingDraft::for_order(Uuid::new_v4(), &dec("200000"), Utc::now());

        assert!(draft
            .ensure_current("ORD-202506-001", OrderStatus::Processing, &dec("200000.00"))
            .is_ok());
        assert!(matches!(
            draft.ensure_current("ORD-202506-001", OrderStatus::Processing, &dec("300000")),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            draft.ensure_current("ORD-202506-001", OrderStatus::Completed, &dec("200000")),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn total_is_subtotal_times_one_point_one_within_tolerance() {
        let issued = Utc::now();
        for subtotal in ["0", "1", "123.45", "200000", "987654.32"] {
            let t = dec(subtotal);
            let draft = BillingDraft::for_order(Uuid::new_v4(), &t, issued);
            let expected = &t * dec("1.1");
            let diff = (&draft.total - &expected).abs();
            assert!(diff <= dec("0.005"), "{subtotal}: {} vs {expected}", draft.total);
            assert_eq!(&draft.total - &draft.tax, t);
        }
    }

    #[test]
    fn partial_payment_is_lesspaid() {
        let status = settle(BillingStatus::Unpaid, &dec("100000"), &dec("220000"));
        assert_eq!(status, BillingStatus::LessPaid);
    }

    #[test]
    fn covering_payment_is_paid() {
        assert_eq!(
            settle(BillingStatus::LessPaid, &dec("220000"), &dec("220000")),
            BillingStatus::Paid
        );
        assert_eq!(
            settle(BillingStatus::Unpaid, &dec("220000.00"), &dec("220000")),
            BillingStatus::Paid
        );
    }

    #[test]
    fn reconciling_without_payments_keeps_unpaid() {
        assert_eq!(
            settle(BillingStatus::Unpaid, &dec("0"), &dec("10")),
            BillingStatus::Unpaid
        );
    }

    #[test]
    fn paid_never_reverts() {
        assert_eq!(
            settle(BillingStatus::Paid, &dec("5"), &dec("10")),
            BillingStatus::Paid
        );
    }

    #[test]
    fn administrative_statuses_are_untouched() {
        assert_eq!(
            settle(BillingStatus::Cancelled, &dec("10"), &dec("10")),
            BillingStatus::Cancelled
        );
        assert_eq!(
            settle(BillingStatus::Refunded, &dec("0"), &dec("10")),
            BillingStatus::Refunded
        );
    }

    #[test]
    fn lesspaid_uses_the_legacy_column_spelling() {
        assert_eq!(BillingStatus::LessPaid.as_str(), "lesspaid");
        assert_eq!(
            "lesspaid".parse::<BillingStatus>().unwrap(),
            BillingStatus::LessPaid
        );
        assert_eq!(
            serde_json::to_string(&BillingStatus::LessPaid).unwrap(),
            "\"lesspaid\""
        );
    }

    #[test]
    fn only_unpaid_and_lesspaid_are_unresolved() {
        assert!(BillingStatus::Unpaid.is_unresolved());
        assert!(BillingStatus::LessPaid.is_unresolved());
        assert!(!BillingStatus::Paid.is_unresolved());
        assert!(!BillingStatus::Cancelled.is_unresolved());
    }
}
