//! Customer page routes. Forms that cannot send PUT or DELETE post to the same
//! path with `_method`, so both verbs are routed to one handler. Form-only
//! paths answer a plain GET with the not-found page.

use crate::handlers::{
    about, add_customer, delete_customer, edit, edit_post, homepage, not_found, post_customer, search_customers,
    view,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(homepage))
        .route("/add", get(add_customer).post(post_customer))
        .route("/view/:id", get(view))
        .route("/edit/:id", get(edit).post(edit_post).put(edit_post))
        .route("/delete/:id", get(not_found).post(delete_customer).delete(delete_customer))
        .route("/search", get(not_found).post(search_customers))
        .route("/about", get(about))
        .with_state(state)
}
