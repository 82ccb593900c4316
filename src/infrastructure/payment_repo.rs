use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::billing::Settlement;
use crate::domain::errors::DomainError;
use crate::domain::payment::{
    ensure_accepts_payments, ensure_within_total, total_paid, NewPayment, PaymentView,
};
use crate::domain::ports::PaymentRepository;
use crate::schema::payments;

use super::models::{NewPaymentRow, PaymentRow};
use super::settlement;

pub struct DieselPaymentRepository {
    pool: DbPool,
}

impl DieselPaymentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PaymentRepository for DieselPaymentRepository {
    fn record(&self, payment: &NewPayment) -> Result<Settlement, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Hold the bill so concurrent payments queue behind this one
            let billing = settlement::lock_billing(conn, payment.billing_id)?;
            ensure_accepts_payments(billing.status.parse()?)?;

            // 2. The ceiling is checked against what is committed right now
            let already_paid = total_paid(&settlement::paid_amounts(conn, billing.id)?);
            ensure_within_total(&already_paid, &payment.amount, &billing.total)?;

            // 3. Append the payment
            diesel::insert_into(payments::table)
                .values(&NewPaymentRow {
                    id: Uuid::new_v4(),
                    billing_id: billing.id,
                    date: payment.paid_at,
                    amount: payment.amount.clone(),
                    method: payment.method.as_str().to_string(),
                    created_by: payment.recorded_by,
                })
                .execute(conn)?;

            // 4. Bring bill and order status up to date in the same transaction
            settlement::reconcile_locked(conn, &billing)
        })
    }

    fn list_for_billing(&self, billing_id: Uuid) -> Result<Vec<PaymentView>, DomainError> {
        let mut conn = self.pool.get()?;

        payments::table
            .filter(payments::billing_id.eq(billing_id))
            .order((payments::date.asc(), payments::created_at.asc()))
            .select(PaymentRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(PaymentView::try_from)
            .collect()
    }
}
