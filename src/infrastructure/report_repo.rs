use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Numeric, Text, Timestamptz};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::billing::BillingStatus;
use crate::domain::errors::DomainError;
use crate::domain::ports::ReportRepository;
use crate::domain::report::{MostSoldProduct, RevenueDetail, UnpaidBill};

pub struct DieselReportRepository {
    pool: DbPool,
}

impl DieselReportRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(QueryableByName)]
struct MostSoldRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    product_id: Uuid,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = BigInt)]
    total_sold: i64,
}

#[derive(QueryableByName)]
struct UnpaidBillRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    billing_id: Uuid,
    #[diesel(sql_type = Text)]
    bill_number: String,
    #[diesel(sql_type = Text)]
    order_number: String,
    #[diesel(sql_type = Text)]
    customer_name: String,
    #[diesel(sql_type = Numeric)]
    tax: BigDecimal,
    #[diesel(sql_type = Numeric)]
    total: BigDecimal,
    #[diesel(sql_type = Text)]
    status: String,
    #[diesel(sql_type = Timestamptz)]
    created_at: DateTime<Utc>,
}

#[derive(QueryableByName)]
struct RevenueRow {
    #[diesel(sql_type = Text)]
    bill_number: String,
    #[diesel(sql_type = Timestamptz)]
    payment_date: DateTime<Utc>,
    #[diesel(sql_type = Numeric)]
    amount: BigDecimal,
    #[diesel(sql_type = Text)]
    method: String,
    #[diesel(sql_type = Text)]
    customer_name: String,
    #[diesel(sql_type = Text)]
    order_number: String,
}

const MOST_SOLD_SQL: &str = r#"
    SELECT p.id AS product_id, p.name, CAST(SUM(od.qty) AS BIGINT) AS total_sold
    FROM products p
    JOIN order_details od ON od.product_id = p.id
    GROUP BY p.id, p.name
    ORDER BY total_sold DESC, p.name ASC
    LIMIT $1
"#;

const UNPAID_BILLS_SQL: &str = r#"
    SELECT b.id AS billing_id,
           b.number_display AS bill_number,
           o.number_display AS order_number,
           c.name AS customer_name,
           b.tax,
           b.total,
           b.status,
           b.created_at
    FROM billings b
    JOIN orders o ON o.id = b.order_id
    JOIN customers c ON c.id = o.customer_id
    WHERE b.status = $1
    ORDER BY b.created_at DESC, b.number_display DESC
"#;

const REVENUE_SQL: &str = r#"
    SELECT b.number_display AS bill_number,
           p.date AS payment_date,
           p.amount,
           p.method,
           c.name AS customer_name,
           o.number_display AS order_number
    FROM payments p
    JOIN billings b ON b.id = p.billing_id
    JOIN orders o ON o.id = b.order_id
    JOIN customers c ON c.id = o.customer_id
    ORDER BY p.date DESC
"#;

impl ReportRepository for DieselReportRepository {
    fn most_sold_products(&self, limit: i64) -> Result<Vec<MostSoldProduct>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<MostSoldRow> = diesel::sql_query(MOST_SOLD_SQL)
            .bind::<BigInt, _>(limit)
            .load(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|r| MostSoldProduct {
                product_id: r.product_id,
                name: r.name,
                total_sold: r.total_sold,
            })
            .collect())
    }

    fn unpaid_bills(&self) -> Result<Vec<UnpaidBill>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<UnpaidBillRow> = diesel::sql_query(UNPAID_BILLS_SQL)
            .bind::<Text, _>(BillingStatus::Unpaid.as_str())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|r| {
                Ok(UnpaidBill {
                    billing_id: r.billing_id,
                    bill_number: r.bill_number,
                    order_number: r.order_number,
                    customer_name: r.customer_name,
                    tax: r.tax,
                    total: r.total,
                    status: r.status.parse()?,
                    created_at: r.created_at,
                })
            })
            .collect()
    }

    fn revenue_details(&self) -> Result<Vec<RevenueDetail>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<RevenueRow> = diesel::sql_query(REVENUE_SQL).load(&mut conn)?;

        rows.into_iter()
            .map(|r| {
                Ok(RevenueDetail {
                    bill_number: r.bill_number,
                    payment_date: r.payment_date,
                    amount: r.amount,
                    method: r
                        .method
                        .parse()
                        .map_err(|e: DomainError| DomainError::Internal(e.to_string()))?,
                    customer_name: r.customer_name,
                    order_number: r.order_number,
                })
            })
            .collect()
    }
}
