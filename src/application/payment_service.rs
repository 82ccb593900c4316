use bigdecimal::BigDecimal;

use crate::domain::billing::{BillingView, Settlement};
use crate::domain::clock::Clock;
use crate::domain::errors::DomainError;
use crate::domain::identity::Principal;
use crate::domain::payment::{
    ensure_before_due, validate_amount, NewPayment, PaymentMethod, PaymentView,
};
use crate::domain::ports::PaymentRepository;

pub struct PaymentService<R, C> {
    repo: R,
    clock: C,
}

impl<R: PaymentRepository, C: Clock> PaymentService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Record one payment against `billing` and settle it.
    ///
    /// The due date is checked here against the clock; the ceiling check,
    /// the insert and reconciliation happen together in the repository.
    pub fn record_payment(
        &self,
        principal: &Principal,
        billing: &BillingView,
        amount: BigDecimal,
        method: PaymentMethod,
    ) -> Result<Settlement, DomainError> {
        principal.require_customer()?;
        validate_amount(&amount)?;

        let now = self.clock.now();
        if let Err(e) = ensure_before_due(billing.due_date, now) {
            log::warn!(
                "payment of {} on bill {} rejected: {}",
                amount,
                billing.number_display,
                e
            );
            return Err(e);
        }

        let payment = NewPayment {
            billing_id: billing.id,
            amount,
            method,
            paid_at: now,
            recorded_by: principal.user_id,
        };
        let settlement = match self.repo.record(&payment) {
            Ok(s) => s,
            Err(e) => {
                log::warn!(
                    "payment of {} on bill {} rejected: {}",
                    payment.amount,
                    billing.number_display,
                    e
                );
                return Err(e.during("payment recording"));
            }
        };

        log::info!(
            "payment of {} via {} recorded on bill {}: {} paid, bill {}",
            payment.amount,
            payment.method,
            billing.number_display,
            settlement.amount_paid,
            settlement.billing_status
        );
        if let Some(status) = settlement.order_status {
            log::info!("order {} moved to {}", settlement.order_id, status);
        }
        Ok(settlement)
    }

    pub fn list_payments(
        &self,
        principal: &Principal,
        billing: &BillingView,
    ) -> Result<Vec<PaymentView>, DomainError> {
        principal.require_customer()?;
        self.repo.list_for_billing(billing.id)
    }
}
