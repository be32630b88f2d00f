pub mod bill;
pub mod pricing;
pub mod session;
pub mod store;
