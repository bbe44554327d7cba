//! Storefront business rules. Everything here is synchronous and free of I/O so the
//! services can compose them over whatever the store returns.

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod loyalty;
pub mod pricing;
