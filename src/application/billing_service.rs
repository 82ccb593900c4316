use uuid::Uuid;

use crate::domain::billing::{BillingDraft, BillingView, Settlement};
use crate::domain::clock::Clock;
use crate::domain::errors::DomainError;
use crate::domain::identity::Principal;
use crate::domain::order::OrderView;
use crate::domain::ports::BillingRepository;

pub struct BillingService<R, C> {
    repo: R,
    clock: C,
}

impl<R: BillingRepository, C: Clock> BillingService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Issue a bill for `order`: 10% tax on its total, payable for 30
    /// minutes from now.
    pub fn generate_bill(
        &self,
        principal: &Principal,
        order: &OrderView,
    ) -> Result<BillingView, DomainError> {
        if let Some(customer_id) = principal.customer_id {
            if customer_id != order.customer_id {
                return Err(DomainError::NotFound(format!(
                    "order {}",
                    order.number_display
                )));
            }
        } else {
            principal.require_admin()?;
        }
        let draft = BillingDraft::for_order(order.id, &order.total, self.clock.now());
        draft.ensure_current(&order.number_display, order.status, &order.total)?;
        let bill = self
            .repo
            .create(&draft, principal.user_id)
            .map_err(|e| e.during("billing creation"))?;

        log::info!(
            "bill {} issued for order {} (total {}, due {})",
            bill.number_display,
            order.number_display,
            bill.total,
            bill.due_date
        );
        Ok(bill)
    }

    /// A bill of the caller that can still be paid.
    pub fn get_bill_by_number(
        &self,
        principal: &Principal,
        number_display: &str,
    ) -> Result<BillingView, DomainError> {
        let customer_id = principal.require_customer()?;
        self.repo
            .find_unresolved_by_number(customer_id, number_display)?
            .ok_or_else(|| DomainError::NotFound(format!("billing {number_display}")))
    }

    /// A bill of the caller in any status.
    pub fn find_bill(
        &self,
        principal: &Principal,
        number_display: &str,
    ) -> Result<BillingView, DomainError> {
        let customer_id = principal.require_customer()?;
        self.repo
            .find_by_number(customer_id, number_display)?
            .ok_or_else(|| DomainError::NotFound(format!("billing {number_display}")))
    }

    /// Re-run settlement for a bill whose statuses may be stale.
    pub fn reconcile(
        &self,
        principal: &Principal,
        billing_id: Uuid,
    ) -> Result<Settlement, DomainError> {
        principal.require_admin()?;
        self.repo
            .reconcile(billing_id)
            .map_err(|e| e.during("reconciliation"))
    }
}
