//! Customer registry: server-rendered customer pages over a GraphQL API.

pub mod config;
pub mod error;
pub mod flash;
pub mod graphql;
pub mod handlers;
pub mod model;
pub mod render;
pub mod routes;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::AppError;
pub use graphql::{build_schema, CustomerSchema};
pub use model::{Customer, CustomerPatch, NewCustomer, Page, PageRequest};
pub use routes::{common_routes, customer_routes, graphql_routes};
pub use state::AppState;
pub use store::{CustomerStore, MemoryCustomerStore, PgCustomerStore, SharedStore};

use axum::handler::HandlerWithoutStateExt;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Full application: pages, GraphQL, operational routes, then static files from
/// `static_dir`, with the not-found page for anything left over.
pub fn app(state: AppState, static_dir: &str) -> Router {
    let static_files = ServeDir::new(static_dir).not_found_service(handlers::not_found.into_service());
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(graphql_routes(state.clone()))
        .merge(customer_routes(state))
        .fallback_service(static_files)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
