pub mod bill;
pub mod catalog;
pub mod health;
pub mod session;
