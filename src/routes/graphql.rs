//! GraphQL endpoint: POST executes, GET executes a query string or serves GraphiQL.

use crate::graphql::{graphql_get, graphql_handler};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn graphql_routes(state: AppState) -> Router {
    Router::new()
        .route("/graphql", get(graphql_get).post(graphql_handler))
        .with_state(state)
}
