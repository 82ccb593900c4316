pub mod billing_repo;
pub mod catalog_repo;
pub mod customer_repo;
pub mod errors;
pub mod models;
pub mod order_repo;
pub mod payment_repo;
pub mod report_repo;

mod numbering;
mod settlement;

#[cfg(test)]
pub(crate) mod test_support;
