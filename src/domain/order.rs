use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Processing,
    Completed,
    Cancel,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancel => "cancel",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(OrderStatus::Processing),
            "completed" => Ok(OrderStatus::Completed),
            "cancel" => Ok(OrderStatus::Cancel),
            other => Err(DomainError::Internal(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderLineInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub number_display: String,
    pub customer_id: Uuid,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub total: BigDecimal,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLineView>,
}

impl OrderView {
    pub fn is_editable(&self) -> bool {
        self.status == OrderStatus::Processing
    }
}

pub fn line_subtotal(quantity: i32, unit_price: &BigDecimal) -> BigDecimal {
    BigDecimal::from(quantity) * unit_price
}

/// Sum of `quantity × unit_price` over the given lines.
///
/// This is the only way an order total is produced; it is recomputed after
/// every line insert, quantity change and removal.
pub fn order_total<'a>(lines: impl IntoIterator<Item = (i32, &'a BigDecimal)>) -> BigDecimal {
    lines
        .into_iter()
        .fold(BigDecimal::from(0), |acc, (qty, price)| {
            acc + line_subtotal(qty, price)
        })
}

pub fn validate_quantity(quantity: i32) -> Result<(), DomainError> {
    if quantity <= 0 {
        return Err(DomainError::InvalidInput(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    Ok(())
}

pub fn validate_lines(lines: &[OrderLineInput]) -> Result<(), DomainError> {
    if lines.is_empty() {
        return Err(DomainError::InvalidInput(
            "an order needs at least one line".to_string(),
        ));
    }
    lines.iter().try_for_each(|l| validate_quantity(l.quantity))
}
