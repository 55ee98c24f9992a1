//! Route tables, one function per surface.

mod common;
mod customer;
mod graphql;

pub use common::common_routes;
pub use customer::customer_routes;
pub use graphql::graphql_routes;
