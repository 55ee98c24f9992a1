//! HTTP handlers for the customer pages.

pub mod api;
pub mod customer;
pub mod pages;
pub use customer::*;
pub use pages::*;
