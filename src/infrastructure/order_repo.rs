use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::numbering::{NumberKind, Period};
use crate::domain::order::{line_subtotal, order_total, OrderLineInput, OrderStatus, OrderView};
use crate::domain::ports::OrderRepository;
use crate::schema::{billings, order_details, orders, products};

use super::models::{NewOrderDetailRow, NewOrderRow, OrderDetailRow, OrderRow};
use super::numbering::next_display_number;

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

// ── Helpers shared by the order operations ───────────────────────────────────

fn load_lines(
    conn: &mut PgConnection,
    order_ids: &[Uuid],
) -> Result<Vec<(OrderDetailRow, String)>, DomainError> {
    Ok(order_details::table
        .inner_join(products::table)
        .filter(order_details::order_id.eq_any(order_ids))
        .order((order_details::created_at.asc(), order_details::id.asc()))
        .select((OrderDetailRow::as_select(), products::name))
        .load(conn)?)
}

fn assemble(order: OrderRow, lines: Vec<(OrderDetailRow, String)>) -> Result<OrderView, DomainError> {
    Ok(OrderView {
        id: order.id,
        status: order.status.parse()?,
        number_display: order.number_display,
        customer_id: order.customer_id,
        date: order.date,
        total: order.total,
        created_by: order.created_by,
        created_at: order.created_at,
        lines: lines
            .into_iter()
            .map(|(line, product_name)| line.into_view(product_name))
            .collect(),
    })
}

fn load_order(conn: &mut PgConnection, order_id: Uuid) -> Result<OrderView, DomainError> {
    let order = orders::table
        .find(order_id)
        .select(OrderRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| DomainError::NotFound(format!("order {order_id}")))?;
    let lines = load_lines(conn, &[order.id])?;
    assemble(order, lines)
}

/// Rewrite the stored order total from its current lines.
fn recompute_total(conn: &mut PgConnection, order_id: Uuid) -> Result<BigDecimal, DomainError> {
    let lines: Vec<(i32, BigDecimal)> = order_details::table
        .filter(order_details::order_id.eq(order_id))
        .select((order_details::qty, order_details::unit_price))
        .load(conn)?;
    let total = order_total(lines.iter().map(|(qty, price)| (*qty, price)));

    diesel::update(orders::table.find(order_id))
        .set((
            orders::total.eq(total.clone()),
            orders::updated_at.eq(Utc::now()),
        ))
        .execute(conn)?;
    Ok(total)
}

/// The line and its order, provided the order belongs to `customer_id`.
/// The order row stays locked for the rest of the transaction.
fn lock_owned_line(
    conn: &mut PgConnection,
    customer_id: Uuid,
    line_id: Uuid,
) -> Result<(OrderDetailRow, OrderRow), DomainError> {
    let not_found = || DomainError::NotFound(format!("order line {line_id}"));
    let line = order_details::table
        .find(line_id)
        .select(OrderDetailRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(not_found)?;
    let order = orders::table
        .find(line.order_id)
        .filter(orders::customer_id.eq(customer_id))
        .select(OrderRow::as_select())
        .for_update()
        .first(conn)
        .optional()?
        .ok_or_else(not_found)?;
    Ok((line, order))
}

/// Lines may only change while the order is processing and not yet billed.
fn ensure_editable(conn: &mut PgConnection, order: &OrderRow) -> Result<(), DomainError> {
    let status: OrderStatus = order.status.parse()?;
    if status != OrderStatus::Processing {
        return Err(DomainError::InvalidInput(format!(
            "order {} is {} and can no longer be changed",
            order.number_display, status
        )));
    }
    let bills: i64 = billings::table
        .filter(billings::order_id.eq(order.id))
        .count()
        .get_result(conn)?;
    if bills > 0 {
        return Err(DomainError::Conflict(format!(
            "order {} has already been billed",
            order.number_display
        )));
    }
    Ok(())
}

// ── Repository ────────────────────────────────────────────────────────────────

impl OrderRepository for DieselOrderRepository {
    fn create(
        &self,
        customer_id: Uuid,
        created_by: Uuid,
        created_at: DateTime<Utc>,
        lines: &[OrderLineInput],
    ) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        let order_id = conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Reserve the display number for this month
            let number = next_display_number(conn, NumberKind::Order, Period::of(created_at))?;

            // 2. Insert the order header
            let order_id = Uuid::new_v4();
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    number_display: number.to_string(),
                    customer_id,
                    date: created_at.date_naive(),
                    status: OrderStatus::Processing.as_str().to_string(),
                    created_by,
                })
                .execute(conn)?;

            // 3. Insert the lines at the current catalog price
            let mut new_lines = Vec::with_capacity(lines.len());
            for line in lines {
                let unit_price: BigDecimal = products::table
                    .find(line.product_id)
                    .select(products::price)
                    .first(conn)
                    .optional()?
                    .ok_or_else(|| {
                        DomainError::InvalidInput(format!("unknown product {}", line.product_id))
                    })?;
                new_lines.push(NewOrderDetailRow {
                    id: Uuid::new_v4(),
                    order_id,
                    product_id: line.product_id,
                    qty: line.quantity,
                    subtotal: line_subtotal(line.quantity, &unit_price),
                    unit_price,
                    created_by,
                });
            }
            diesel::insert_into(order_details::table)
                .values(&new_lines)
                .execute(conn)?;

            // 4. Derive the total from what was just inserted
            recompute_total(conn, order_id)?;

            Ok(order_id)
        })?;

        load_order(&mut conn, order_id)
    }

    fn find_by_number(
        &self,
        customer_id: Uuid,
        number_display: &str,
    ) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::number_display.eq(number_display))
            .filter(orders::customer_id.eq(customer_id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = load_lines(&mut conn, &[order.id])?;
        assemble(order, lines).map(Some)
    }

    fn list_processing(&self, customer_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .filter(orders::customer_id.eq(customer_id))
            .filter(orders::status.eq(OrderStatus::Processing.as_str()))
            .order((orders::created_at.desc(), orders::number_display.desc()))
            .select(OrderRow::as_select())
            .load(&mut conn)?;

        let ids: Vec<Uuid> = rows.iter().map(|o| o.id).collect();
        let mut lines_by_order: HashMap<Uuid, Vec<(OrderDetailRow, String)>> = HashMap::new();
        for (line, name) in load_lines(&mut conn, &ids)? {
            lines_by_order
                .entry(line.order_id)
                .or_default()
                .push((line, name));
        }

        rows.into_iter()
            .map(|order| {
                let lines = lines_by_order.remove(&order.id).unwrap_or_default();
                assemble(order, lines)
            })
            .collect()
    }

    fn update_line_quantity(
        &self,
        customer_id: Uuid,
        line_id: Uuid,
        quantity: i32,
        updated_by: Uuid,
    ) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        let order_id = conn.transaction::<_, DomainError, _>(|conn| {
            let (line, order) = lock_owned_line(conn, customer_id, line_id)?;
            ensure_editable(conn, &order)?;

            diesel::update(order_details::table.find(line.id))
                .set((
                    order_details::qty.eq(quantity),
                    order_details::subtotal.eq(line_subtotal(quantity, &line.unit_price)),
                    order_details::updated_by.eq(Some(updated_by)),
                    order_details::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
            recompute_total(conn, order.id)?;

            Ok(order.id)
        })?;

        load_order(&mut conn, order_id)
    }

    fn remove_line(&self, customer_id: Uuid, line_id: Uuid) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        let order_id = conn.transaction::<_, DomainError, _>(|conn| {
            let (line, order) = lock_owned_line(conn, customer_id, line_id)?;
            ensure_editable(conn, &order)?;

            let remaining: i64 = order_details::table
                .filter(order_details::order_id.eq(order.id))
                .count()
                .get_result(conn)?;
            if remaining <= 1 {
                return Err(DomainError::InvalidInput(
                    "an order needs at least one line".to_string(),
                ));
            }

            diesel::delete(order_details::table.find(line.id)).execute(conn)?;
            recompute_total(conn, order.id)?;

            Ok(order.id)
        })?;

        load_order(&mut conn, order_id)
    }
}
