use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::billing::{BillingDraft, BillingView, Settlement};
use super::catalog::{CategoryView, NewProduct, ProductView};
use super::customer::{CustomerView, NewCustomer};
use super::errors::DomainError;
use super::order::{OrderLineInput, OrderView};
use super::payment::{NewPayment, PaymentView};
use super::report::{MostSoldProduct, RevenueDetail, UnpaidBill};

pub trait OrderRepository: Send + Sync + 'static {
    /// Number, insert and total an order with its lines as one unit, then
    /// return it as stored.
    fn create(
        &self,
        customer_id: Uuid,
        created_by: Uuid,
        created_at: DateTime<Utc>,
        lines: &[OrderLineInput],
    ) -> Result<OrderView, DomainError>;
    fn find_by_number(
        &self,
        customer_id: Uuid,
        number_display: &str,
    ) -> Result<Option<OrderView>, DomainError>;
    fn list_processing(&self, customer_id: Uuid) -> Result<Vec<OrderView>, DomainError>;
    fn update_line_quantity(
        &self,
        customer_id: Uuid,
        line_id: Uuid,
        quantity: i32,
        updated_by: Uuid,
    ) -> Result<OrderView, DomainError>;
    fn remove_line(&self, customer_id: Uuid, line_id: Uuid) -> Result<OrderView, DomainError>;
}

pub trait BillingRepository: Send + Sync + 'static {
    /// Number and insert a bill computed from an order.
    fn create(&self, draft: &BillingDraft, created_by: Uuid) -> Result<BillingView, DomainError>;
    /// A bill of `customer_id`'s orders that is still `unpaid` or `lesspaid`.
    fn find_unresolved_by_number(
        &self,
        customer_id: Uuid,
        number_display: &str,
    ) -> Result<Option<BillingView>, DomainError>;
    /// A bill of `customer_id`'s orders in any status.
    fn find_by_number(
        &self,
        customer_id: Uuid,
        number_display: &str,
    ) -> Result<Option<BillingView>, DomainError>;
    /// Recompute bill and order status from the payments recorded so far.
    /// Safe to call any number of times.
    fn reconcile(&self, billing_id: Uuid) -> Result<Settlement, DomainError>;
}

pub trait PaymentRepository: Send + Sync + 'static {
    /// Check the amount ceiling, insert the payment and reconcile, all while
    /// holding the bill so no concurrent payment can interleave.
    fn record(&self, payment: &NewPayment) -> Result<Settlement, DomainError>;
    /// Payments of a bill, oldest first.
    fn list_for_billing(&self, billing_id: Uuid) -> Result<Vec<PaymentView>, DomainError>;
}

pub trait CatalogRepository: Send + Sync + 'static {
    fn create_category(&self, name: &str, created_by: Uuid) -> Result<CategoryView, DomainError>;
    fn list_categories(&self) -> Result<Vec<CategoryView>, DomainError>;
    fn create_product(
        &self,
        product: &NewProduct,
        created_by: Uuid,
    ) -> Result<ProductView, DomainError>;
    fn find_product(&self, id: Uuid) -> Result<Option<ProductView>, DomainError>;
    fn list_products(&self) -> Result<Vec<ProductView>, DomainError>;
}

pub trait CustomerRepository: Send + Sync + 'static {
    fn create(&self, customer: &NewCustomer) -> Result<CustomerView, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerView>, DomainError>;
}

pub trait ReportRepository: Send + Sync + 'static {
    fn most_sold_products(&self, limit: i64) -> Result<Vec<MostSoldProduct>, DomainError>;
    fn unpaid_bills(&self) -> Result<Vec<UnpaidBill>, DomainError>;
    fn revenue_details(&self) -> Result<Vec<RevenueDetail>, DomainError>;
}
