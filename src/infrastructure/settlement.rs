//! The settlement reconciler: derives bill and order status from the
//! payments recorded against a bill.

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::billing::{settle, BillingStatus, Settlement};
use crate::domain::errors::DomainError;
use crate::domain::order::OrderStatus;
use crate::domain::payment::total_paid;
use crate::schema::{billings, orders, payments};

use super::models::BillingRow;

/// Load a bill and hold its row lock until the surrounding transaction ends.
pub(crate) fn lock_billing(
    conn: &mut PgConnection,
    billing_id: Uuid,
) -> Result<BillingRow, DomainError> {
    billings::table
        .find(billing_id)
        .select(BillingRow::as_select())
        .for_update()
        .first(conn)
        .optional()?
        .ok_or_else(|| DomainError::NotFound(format!("billing {billing_id}")))
}

pub(crate) fn paid_amounts(
    conn: &mut PgConnection,
    billing_id: Uuid,
) -> Result<Vec<BigDecimal>, DomainError> {
    Ok(payments::table
        .filter(payments::billing_id.eq(billing_id))
        .order((payments::date.asc(), payments::created_at.asc()))
        .select(payments::amount)
        .load(conn)?)
}

/// Recompute from scratch the status of an already locked bill.
///
/// When the bill ends up paid its order is moved to `completed`; both writes
/// share the caller's transaction.
pub(crate) fn reconcile_locked(
    conn: &mut PgConnection,
    billing: &BillingRow,
) -> Result<Settlement, DomainError> {
    let amount_paid = total_paid(&paid_amounts(conn, billing.id)?);
    let current: BillingStatus = billing.status.parse()?;
    let next = settle(current, &amount_paid, &billing.total);

    if next != current {
        diesel::update(billings::table.find(billing.id))
            .set((
                billings::status.eq(next.as_str()),
                billings::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
    }

    let order_status = if next == BillingStatus::Paid {
        diesel::update(orders::table.find(billing.order_id))
            .set((
                orders::status.eq(OrderStatus::Completed.as_str()),
                orders::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Some(OrderStatus::Completed)
    } else {
        None
    };

    log::info!(
        "Reconciled billing {}: paid {} of {}, status {} -> {}",
        billing.number_display,
        amount_paid,
        billing.total,
        current,
        next
    );

    Ok(Settlement {
        billing_id: billing.id,
        order_id: billing.order_id,
        amount_paid,
        billing_status: next,
        order_status,
    })
}

pub(crate) fn reconcile(
    conn: &mut PgConnection,
    billing_id: Uuid,
) -> Result<Settlement, DomainError> {
    let billing = lock_billing(conn, billing_id)?;
    reconcile_locked(conn, &billing)
}
