pub mod auth;
pub mod careers;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod products;
pub mod promotions;
pub mod reservations;
pub mod reviews;
pub mod users;
