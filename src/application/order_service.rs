use uuid::Uuid;

use crate::domain::clock::Clock;
use crate::domain::errors::DomainError;
use crate::domain::identity::Principal;
use crate::domain::order::{validate_lines, validate_quantity, OrderLineInput, OrderView};
use crate::domain::ports::OrderRepository;

pub struct OrderService<R, C> {
    repo: R,
    clock: C,
}

impl<R: OrderRepository, C: Clock> OrderService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Create an order for the caller's customer record.
    ///
    /// The returned order is read back after commit, so its total already
    /// reflects every line.
    pub fn create_order(
        &self,
        principal: &Principal,
        lines: Vec<OrderLineInput>,
    ) -> Result<OrderView, DomainError> {
        let customer_id = principal.require_customer()?;
        validate_lines(&lines)?;

        let order = self
            .repo
            .create(customer_id, principal.user_id, self.clock.now(), &lines)
            .map_err(|e| e.during("order creation"))?;

        log::info!(
            "order {} created for customer {} (total {})",
            order.number_display,
            customer_id,
            order.total
        );
        Ok(order)
    }

    pub fn get_order(
        &self,
        principal: &Principal,
        number_display: &str,
    ) -> Result<OrderView, DomainError> {
        let customer_id = principal.require_customer()?;
        self.repo
            .find_by_number(customer_id, number_display)?
            .ok_or_else(|| DomainError::NotFound(format!("order {number_display}")))
    }

    /// Orders of the caller still being processed, newest first.
    pub fn list_orders(&self, principal: &Principal) -> Result<Vec<OrderView>, DomainError> {
        let customer_id = principal.require_customer()?;
        self.repo.list_processing(customer_id)
    }

    pub fn update_line(
        &self,
        principal: &Principal,
        line_id: Uuid,
        quantity: i32,
    ) -> Result<OrderView, DomainError> {
        let customer_id = principal.require_customer()?;
        validate_quantity(quantity)?;

        let order = self
            .repo
            .update_line_quantity(customer_id, line_id, quantity, principal.user_id)
            .map_err(|e| e.during("order line update"))?;
        log::info!(
            "order {} line {} set to quantity {} (total {})",
            order.number_display,
            line_id,
            quantity,
            order.total
        );
        Ok(order)
    }

    pub fn remove_line(&self, principal: &Principal, line_id: Uuid) -> Result<OrderView, DomainError> {
        let customer_id = principal.require_customer()?;

        let order = self
            .repo
            .remove_line(customer_id, line_id)
            .map_err(|e| e.during("order line removal"))?;
        log::info!(
            "order {} line {} removed (total {})",
            order.number_display,
            line_id,
            order.total
        );
        Ok(order)
    }
}
