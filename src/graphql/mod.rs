//! GraphQL API over the customer store.
//!
//! ```graphql
//! query {
//!   customers(page: 1, perPage: 12) { id firstName lastName email createdAt }
//!   countCustomers
//! }
//!
//! mutation {
//!   addCustomer(input: { firstName: "Ada", lastName: "Lovelace", tel: "555", email: "a@b.com", details: "" }) { id }
//! }
//! ```

mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::state::AppState;
use crate::store::SharedStore;
use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Schema, ID};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use uuid::Uuid;

pub type CustomerSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the store injected as context data.
pub fn build_schema(store: SharedStore) -> CustomerSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

/// Execute a GraphQL request (POST body, or GET query string).
pub async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// `GET /graphql`: GraphiQL when the query string carries no document, otherwise execute it.
/// A bare `GET /graphql` still extracts as a request, only with an empty `query`.
pub async fn graphql_get(
    State(state): State<AppState>,
    req: Option<GraphQLRequest>,
) -> Response {
    match req.map(GraphQLRequest::into_inner) {
        Some(req) if !req.query.trim().is_empty() => {
            GraphQLResponse::from(state.schema.execute(req).await).into_response()
        }
        _ => graphiql(),
    }
}

fn graphiql() -> Response {
    Html(GraphiQLSource::build().endpoint("/graphql").finish()).into_response()
}

/// Ids that are not UUIDs cannot name a stored customer.
fn parse_id(id: &ID) -> Option<Uuid> {
    Uuid::parse_str(id.as_str()).ok()
}
