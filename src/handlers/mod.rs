pub mod billings;
pub mod catalog;
pub mod customers;
pub mod identity;
pub mod orders;
pub mod payments;
pub mod reports;

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::application::billing_service::BillingService;
use crate::application::catalog_service::CatalogService;
use crate::application::customer_service::CustomerService;
use crate::application::order_service::OrderService;
use crate::application::payment_service::PaymentService;
use crate::application::report_service::ReportService;
use crate::domain::clock::SystemClock;
use crate::errors::AppError;
use crate::infrastructure::billing_repo::DieselBillingRepository;
use crate::infrastructure::catalog_repo::DieselCatalogRepository;
use crate::infrastructure::customer_repo::DieselCustomerRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::payment_repo::DieselPaymentRepository;
use crate::infrastructure::report_repo::DieselReportRepository;

pub type OrderApi = OrderService<DieselOrderRepository, SystemClock>;
pub type BillingApi = BillingService<DieselBillingRepository, SystemClock>;
pub type PaymentApi = PaymentService<DieselPaymentRepository, SystemClock>;
pub type CatalogApi = CatalogService<DieselCatalogRepository>;
pub type CustomerApi = CustomerService<DieselCustomerRepository>;
pub type ReportApi = ReportService<DieselReportRepository>;

/// Money travels as a decimal string, e.g. "220000.00".
pub(crate) fn parse_money(field: &str, value: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(value.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid {field} '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::parse_money;
    use crate::errors::AppError;

    #[test]
    fn money_is_parsed_from_decimal_strings() {
        assert_eq!(parse_money("amount", " 120000.50 ").unwrap().to_string(), "120000.50");
        assert!(matches!(
            parse_money("amount", "12,5"),
            Err(AppError::BadRequest(_))
        ));
    }
}
