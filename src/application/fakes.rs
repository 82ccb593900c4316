//! In-memory stand-ins for the repository ports, shared through one store so
//! orders, bills and payments see each other like they do in the database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::billing::{settle, BillingDraft, BillingStatus, BillingView, Settlement};
use crate::domain::catalog::{CategoryView, NewProduct, ProductView};
use crate::domain::customer::{CustomerView, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::numbering::{last_sequence, DisplayNumber, NumberKind, Period};
use crate::domain::order::{
    line_subtotal, order_total, OrderLineInput, OrderLineView, OrderStatus, OrderView,
};
use crate::domain::payment::{
    ensure_accepts_payments, ensure_within_total, total_paid, NewPayment, PaymentView,
};
use crate::domain::ports::{
    BillingRepository, CatalogRepository, CustomerRepository, OrderRepository,
    PaymentRepository, ReportRepository,
};
use crate::domain::report::{MostSoldProduct, RevenueDetail, UnpaidBill};

#[derive(Default)]
struct Store {
    products: Vec<ProductView>,
    categories: Vec<CategoryView>,
    customers: Vec<CustomerView>,
    orders: Vec<OrderView>,
    bills: Vec<BillingView>,
    payments: Vec<PaymentView>,
    fail_with: Option<String>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeStore {
    inner: Arc<Mutex<Store>>,
}

impl FakeStore {
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make the next write fail the way a dropped connection would.
    pub(crate) fn fail_next_write(&self, message: &str) {
        self.lock().fail_with = Some(message.to_string());
    }

    pub(crate) fn add_product(&self, name: &str, price: BigDecimal) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().products.push(ProductView {
            id,
            name: name.to_string(),
            stock: 100,
            description: String::new(),
            category_id: Uuid::new_v4(),
            price,
        });
        id
    }

    pub(crate) fn payments_of(&self, billing_id: Uuid) -> Vec<PaymentView> {
        self.lock()
            .payments
            .iter()
            .filter(|p| p.billing_id == billing_id)
            .cloned()
            .collect()
    }

    pub(crate) fn order(&self, id: Uuid) -> Option<OrderView> {
        self.lock().orders.iter().find(|o| o.id == id).cloned()
    }

    pub(crate) fn bill(&self, id: Uuid) -> Option<BillingView> {
        self.lock().bills.iter().find(|b| b.id == id).cloned()
    }

    /// Flip a bill to an administrative status directly.
    pub(crate) fn set_bill_status(&self, id: Uuid, status: BillingStatus) {
        if let Some(bill) = self.lock().bills.iter_mut().find(|b| b.id == id) {
            bill.status = status;
        }
    }
}

impl Store {
    fn take_failure(&mut self) -> Result<(), DomainError> {
        match self.fail_with.take() {
            Some(msg) => Err(DomainError::Internal(msg)),
            None => Ok(()),
        }
    }

    fn next_number(&self, kind: NumberKind, at: DateTime<Utc>) -> DisplayNumber {
        let period = Period::of(at);
        let issued: Vec<&str> = match kind {
            NumberKind::Order => self.orders.iter().map(|o| o.number_display.as_str()).collect(),
            NumberKind::Billing => self.bills.iter().map(|b| b.number_display.as_str()).collect(),
        };
        DisplayNumber::following(kind, period, last_sequence(issued, kind, period))
    }

    fn retotal(order: &mut OrderView) {
        order.total = order_total(order.lines.iter().map(|l| (l.quantity, &l.unit_price)));
    }

    fn owned_order_with_line(
        &mut self,
        customer_id: Uuid,
        line_id: Uuid,
    ) -> Result<&mut OrderView, DomainError> {
        let bills = &self.bills;
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.customer_id == customer_id && o.lines.iter().any(|l| l.id == line_id))
            .ok_or_else(|| DomainError::NotFound(format!("order line {line_id}")))?;
        if !order.is_editable() {
            return Err(DomainError::InvalidInput(format!(
                "order {} is {}",
                order.number_display, order.status
            )));
        }
        if bills.iter().any(|b| b.order_id == order.id) {
            return Err(DomainError::Conflict(format!(
                "order {} is already billed",
                order.number_display
            )));
        }
        Ok(order)
    }

    fn reconcile(&mut self, billing_id: Uuid) -> Result<Settlement, DomainError> {
        let paid = total_paid(
            self.payments
                .iter()
                .filter(|p| p.billing_id == billing_id)
                .map(|p| &p.amount),
        );
        let bill = self
            .bills
            .iter_mut()
            .find(|b| b.id == billing_id)
            .ok_or_else(|| DomainError::NotFound(format!("billing {billing_id}")))?;
        bill.status = settle(bill.status, &paid, &bill.total);
        let order_id = bill.order_id;
        let billing_status = bill.status;

        let mut order_status = None;
        if billing_status == BillingStatus::Paid {
            if let Some(order) = self.orders.iter_mut().find(|o| o.id == order_id) {
                order.status = OrderStatus::Completed;
                order_status = Some(OrderStatus::Completed);
            }
        }
        Ok(Settlement {
            billing_id,
            order_id,
            amount_paid: paid,
            billing_status,
            order_status,
        })
    }
}

impl OrderRepository for FakeStore {
    fn create(
        &self,
        customer_id: Uuid,
        created_by: Uuid,
        created_at: DateTime<Utc>,
        lines: &[OrderLineInput],
    ) -> Result<OrderView, DomainError> {
        let mut store = self.lock();
        store.take_failure()?;

        let mut views = Vec::with_capacity(lines.len());
        for line in lines {
            let product = store
                .products
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| {
                    DomainError::InvalidInput(format!("unknown product {}", line.product_id))
                })?;
            views.push(OrderLineView {
                id: Uuid::new_v4(),
                product_id: product.id,
                product_name: product.name.clone(),
                quantity: line.quantity,
                unit_price: product.price.clone(),
                subtotal: line_subtotal(line.quantity, &product.price),
            });
        }

        let mut order = OrderView {
            id: Uuid::new_v4(),
            number_display: store.next_number(NumberKind::Order, created_at).to_string(),
            customer_id,
            date: created_at.date_naive(),
            status: OrderStatus::Processing,
            total: BigDecimal::from(0),
            created_by,
            created_at,
            lines: views,
        };
        Store::retotal(&mut order);
        store.orders.push(order.clone());
        Ok(order)
    }

    fn find_by_number(
        &self,
        customer_id: Uuid,
        number_display: &str,
    ) -> Result<Option<OrderView>, DomainError> {
        Ok(self
            .lock()
            .orders
            .iter()
            .find(|o| o.customer_id == customer_id && o.number_display == number_display)
            .cloned())
    }

    fn list_processing(&self, customer_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        let mut orders: Vec<OrderView> = self
            .lock()
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id && o.status == OrderStatus::Processing)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    fn update_line_quantity(
        &self,
        customer_id: Uuid,
        line_id: Uuid,
        quantity: i32,
        _updated_by: Uuid,
    ) -> Result<OrderView, DomainError> {
        let mut store = self.lock();
        store.take_failure()?;
        let order = store.owned_order_with_line(customer_id, line_id)?;
        if let Some(line) = order.lines.iter_mut().find(|l| l.id == line_id) {
            line.quantity = quantity;
            line.subtotal = line_subtotal(quantity, &line.unit_price);
        }
        Store::retotal(order);
        Ok(order.clone())
    }

    fn remove_line(&self, customer_id: Uuid, line_id: Uuid) -> Result<OrderView, DomainError> {
        let mut store = self.lock();
        store.take_failure()?;
        let order = store.owned_order_with_line(customer_id, line_id)?;
        if order.lines.len() == 1 {
            return Err(DomainError::InvalidInput(
                "an order needs at least one line".to_string(),
            ));
        }
        order.lines.retain(|l| l.id != line_id);
        Store::retotal(order);
        Ok(order.clone())
    }
}

impl BillingRepository for FakeStore {
    fn create(&self, draft: &BillingDraft, created_by: Uuid) -> Result<BillingView, DomainError> {
        let mut store = self.lock();
        store.take_failure()?;
        let order = store
            .orders
            .iter()
            .find(|o| o.id == draft.order_id)
            .ok_or_else(|| DomainError::NotFound(format!("order {}", draft.order_id)))?;
        draft.ensure_current(&order.number_display, order.status, &order.total)?;
        let bill = BillingView {
            id: Uuid::new_v4(),
            order_id: draft.order_id,
            number_display: store
                .next_number(NumberKind::Billing, draft.issue_date)
                .to_string(),
            issue_date: draft.issue_date,
            due_date: draft.due_date,
            tax: draft.tax.clone(),
            total: draft.total.clone(),
            status: BillingStatus::Unpaid,
            created_by,
        };
        store.bills.push(bill.clone());
        Ok(bill)
    }

    fn find_unresolved_by_number(
        &self,
        customer_id: Uuid,
        number_display: &str,
    ) -> Result<Option<BillingView>, DomainError> {
        Ok(BillingRepository::find_by_number(self, customer_id, number_display)?
            .filter(|b| b.status.is_unresolved()))
    }

    fn find_by_number(
        &self,
        customer_id: Uuid,
        number_display: &str,
    ) -> Result<Option<BillingView>, DomainError> {
        let store = self.lock();
        Ok(store
            .bills
            .iter()
            .find(|b| {
                b.number_display == number_display
                    && store
                        .orders
                        .iter()
                        .any(|o| o.id == b.order_id && o.customer_id == customer_id)
            })
            .cloned())
    }

    fn reconcile(&self, billing_id: Uuid) -> Result<Settlement, DomainError> {
        let mut store = self.lock();
        store.take_failure()?;
        store.reconcile(billing_id)
    }
}

impl PaymentRepository for FakeStore {
    fn record(&self, payment: &NewPayment) -> Result<Settlement, DomainError> {
        let mut store = self.lock();
        store.take_failure()?;
        let bill = store
            .bills
            .iter()
            .find(|b| b.id == payment.billing_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("billing {}", payment.billing_id)))?;
        ensure_accepts_payments(bill.status)?;
        let already = total_paid(
            store
                .payments
                .iter()
                .filter(|p| p.billing_id == bill.id)
                .map(|p| &p.amount),
        );
        ensure_within_total(&already, &payment.amount, &bill.total)?;

        store.payments.push(PaymentView {
            id: Uuid::new_v4(),
            billing_id: bill.id,
            date: payment.paid_at,
            amount: payment.amount.clone(),
            method: payment.method,
            created_by: payment.recorded_by,
        });
        store.reconcile(bill.id)
    }

    fn list_for_billing(&self, billing_id: Uuid) -> Result<Vec<PaymentView>, DomainError> {
        Ok(self.payments_of(billing_id))
    }
}

impl CatalogRepository for FakeStore {
    fn create_category(&self, name: &str, _created_by: Uuid) -> Result<CategoryView, DomainError> {
        let mut store = self.lock();
        if store.categories.iter().any(|c| c.name == name) {
            return Err(DomainError::Conflict(format!("category {name} exists")));
        }
        let category = CategoryView {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        store.categories.push(category.clone());
        Ok(category)
    }

    fn list_categories(&self) -> Result<Vec<CategoryView>, DomainError> {
        Ok(self.lock().categories.clone())
    }

    fn create_product(
        &self,
        product: &NewProduct,
        _created_by: Uuid,
    ) -> Result<ProductView, DomainError> {
        let view = ProductView {
            id: Uuid::new_v4(),
            name: product.name.clone(),
            stock: product.stock,
            description: product.description.clone(),
            category_id: product.category_id,
            price: product.price.clone(),
        };
        self.lock().products.push(view.clone());
        Ok(view)
    }

    fn find_product(&self, id: Uuid) -> Result<Option<ProductView>, DomainError> {
        Ok(self.lock().products.iter().find(|p| p.id == id).cloned())
    }

    fn list_products(&self) -> Result<Vec<ProductView>, DomainError> {
        Ok(self.lock().products.clone())
    }
}

impl CustomerRepository for FakeStore {
    fn create(&self, customer: &NewCustomer) -> Result<CustomerView, DomainError> {
        let view = CustomerView {
            id: Uuid::new_v4(),
            name: customer.name.clone(),
            address: customer.address.clone(),
            email: customer.email.clone(),
            phone_number: customer.phone_number.clone(),
        };
        self.lock().customers.push(view.clone());
        Ok(view)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerView>, DomainError> {
        Ok(self.lock().customers.iter().find(|c| c.id == id).cloned())
    }
}

impl ReportRepository for FakeStore {
    fn most_sold_products(&self, limit: i64) -> Result<Vec<MostSoldProduct>, DomainError> {
        let store = self.lock();
        let mut sold: HashMap<Uuid, (String, i64)> = HashMap::new();
        for line in store.orders.iter().flat_map(|o| o.lines.iter()) {
            let entry = sold
                .entry(line.product_id)
                .or_insert_with(|| (line.product_name.clone(), 0));
            entry.1 += i64::from(line.quantity);
        }
        let mut rows: Vec<MostSoldProduct> = sold
            .into_iter()
            .map(|(product_id, (name, total_sold))| MostSoldProduct {
                product_id,
                name,
                total_sold,
            })
            .collect();
        rows.sort_by(|a, b| b.total_sold.cmp(&a.total_sold).then(a.name.cmp(&b.name)));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    fn unpaid_bills(&self) -> Result<Vec<UnpaidBill>, DomainError> {
        Ok(Vec::new())
    }

    fn revenue_details(&self) -> Result<Vec<RevenueDetail>, DomainError> {
        Ok(Vec::new())
    }
}
