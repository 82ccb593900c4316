use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::billing::BillingView;
use crate::domain::catalog::{CategoryView, ProductView};
use crate::domain::customer::CustomerView;
use crate::domain::errors::DomainError;
use crate::domain::order::OrderLineView;
use crate::domain::payment::PaymentView;
use crate::schema::{billings, categories, customers, order_details, orders, payments, products};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub number_display: String,
    pub customer_id: Uuid,
    pub date: NaiveDate,
    pub status: String,
    pub total: BigDecimal,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub number_display: String,
    pub customer_id: Uuid,
    pub date: NaiveDate,
    pub status: String,
    pub created_by: Uuid,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = order_details)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderDetailRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub qty: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderDetailRow {
    pub fn into_view(self, product_name: String) -> OrderLineView {
        OrderLineView {
            id: self.id,
            product_id: self.product_id,
            product_name,
            quantity: self.qty,
            unit_price: self.unit_price,
            subtotal: self.subtotal,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_details)]
pub struct NewOrderDetailRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub qty: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = billings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BillingRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub number_display: String,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub tax: BigDecimal,
    pub total: BigDecimal,
    pub status: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BillingRow> for BillingView {
    type Error = DomainError;

    fn try_from(row: BillingRow) -> Result<Self, Self::Error> {
        Ok(BillingView {
            id: row.id,
            order_id: row.order_id,
            number_display: row.number_display,
            issue_date: row.issue_date,
            due_date: row.due_date,
            tax: row.tax,
            total: row.total,
            status: row.status.parse()?,
            created_by: row.created_by,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = billings)]
pub struct NewBillingRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub number_display: String,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub tax: BigDecimal,
    pub total: BigDecimal,
    pub status: String,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentRow {
    pub id: Uuid,
    pub billing_id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: BigDecimal,
    pub method: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for PaymentView {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(PaymentView {
            id: row.id,
            billing_id: row.billing_id,
            date: row.date,
            amount: row.amount,
            method: row
                .method
                .parse()
                .map_err(|e: DomainError| DomainError::Internal(e.to_string()))?,
            created_by: row.created_by,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = payments)]
pub struct NewPaymentRow {
    pub id: Uuid,
    pub billing_id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: BigDecimal,
    pub method: String,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for CategoryView {
    fn from(row: CategoryRow) -> Self {
        CategoryView {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
    pub description: String,
    pub category_id: Uuid,
    pub price: BigDecimal,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for ProductView {
    fn from(row: ProductRow) -> Self {
        ProductView {
            id: row.id,
            name: row.name,
            stock: row.stock,
            description: row.description,
            category_id: row.category_id,
            price: row.price,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
    pub description: String,
    pub category_id: Uuid,
    pub price: BigDecimal,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for CustomerView {
    fn from(row: CustomerRow) -> Self {
        CustomerView {
            id: row.id,
            name: row.name,
            address: row.address,
            email: row.email,
            phone_number: row.phone_number,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone_number: String,
}
