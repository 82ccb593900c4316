use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::billing::{BillingDraft, BillingStatus, BillingView, Settlement};
use crate::domain::errors::DomainError;
use crate::domain::numbering::{NumberKind, Period};
use crate::domain::order::OrderStatus;
use crate::domain::ports::BillingRepository;
use crate::schema::{billings, orders};

use super::models::{BillingRow, NewBillingRow, OrderRow};
use super::numbering::next_display_number;
use super::settlement;

pub struct DieselBillingRepository {
    pool: DbPool,
}

impl DieselBillingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn find_owned(
        &self,
        customer_id: Uuid,
        number_display: &str,
        statuses: &[BillingStatus],
    ) -> Result<Option<BillingView>, DomainError> {
        let mut conn = self.pool.get()?;
        let statuses: Vec<&str> = statuses.iter().map(BillingStatus::as_str).collect();

        billings::table
            .inner_join(orders::table)
            .filter(billings::number_display.eq(number_display))
            .filter(orders::customer_id.eq(customer_id))
            .filter(billings::status.eq_any(statuses))
            .select(BillingRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(BillingView::try_from)
            .transpose()
    }
}

impl BillingRepository for DieselBillingRepository {
    fn create(&self, draft: &BillingDraft, created_by: Uuid) -> Result<BillingView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // Line edits take the same lock, so the total cannot move under us.
            let order: OrderRow = orders::table
                .find(draft.order_id)
                .select(OrderRow::as_select())
                .for_update()
                .first(conn)
                .optional()?
                .ok_or_else(|| DomainError::NotFound(format!("order {}", draft.order_id)))?;
            let status: OrderStatus = order.status.parse()?;
            draft.ensure_current(&order.number_display, status, &order.total)?;

            let number =
                next_display_number(conn, NumberKind::Billing, Period::of(draft.issue_date))?;

            let row = diesel::insert_into(billings::table)
                .values(&NewBillingRow {
                    id: Uuid::new_v4(),
                    order_id: draft.order_id,
                    number_display: number.to_string(),
                    issue_date: draft.issue_date,
                    due_date: draft.due_date,
                    tax: draft.tax.clone(),
                    total: draft.total.clone(),
                    status: BillingStatus::Unpaid.as_str().to_string(),
                    created_by,
                })
                .returning(BillingRow::as_returning())
                .get_result(conn)?;

            BillingView::try_from(row)
        })
    }

    fn find_unresolved_by_number(
        &self,
        customer_id: Uuid,
        number_display: &str,
    ) -> Result<Option<BillingView>, DomainError> {
        self.find_owned(customer_id, number_display, &BillingStatus::unresolved())
    }

    fn find_by_number(
        &self,
        customer_id: Uuid,
        number_display: &str,
    ) -> Result<Option<BillingView>, DomainError> {
        self.find_owned(
            customer_id,
            number_display,
            &[
                BillingStatus::Unpaid,
                BillingStatus::LessPaid,
                BillingStatus::Paid,
                BillingStatus::Cancelled,
                BillingStatus::Refunded,
            ],
        )
    }

    fn reconcile(&self, billing_id: Uuid) -> Result<Settlement, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| settlement::reconcile(conn, billing_id))
    }
}
