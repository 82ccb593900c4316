pub mod billing_service;
pub mod catalog_service;
pub mod customer_service;
pub mod order_service;
pub mod payment_service;
pub mod report_service;

#[cfg(test)]
pub(crate) mod fakes;
