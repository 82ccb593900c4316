use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::billing::BillingStatus;
use super::payment::PaymentMethod;

/// How many rows the most-sold report returns when no limit is given.
pub const DEFAULT_MOST_SOLD_LIMIT: i64 = 5;

#[derive(Debug, Clone)]
pub struct MostSoldProduct {
    pub product_id: Uuid,
    pub name: String,
    pub total_sold: i64,
}

#[derive(Debug, Clone)]
pub struct UnpaidBill {
    pub billing_id: Uuid,
    pub bill_number: String,
    pub order_number: String,
    pub customer_name: String,
    pub tax: BigDecimal,
    pub total: BigDecimal,
    pub status: BillingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RevenueDetail {
    pub bill_number: String,
    pub payment_date: DateTime<Utc>,
    pub amount: BigDecimal,
    pub method: PaymentMethod,
    pub customer_name: String,
    pub order_number: String,
}
