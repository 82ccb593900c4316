pub mod billing;
pub mod catalog;
pub mod clock;
pub mod customer;
pub mod errors;
pub mod identity;
pub mod numbering;
pub mod order;
pub mod payment;
pub mod ports;
pub mod report;
