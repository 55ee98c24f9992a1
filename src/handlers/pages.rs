//! Static pages and the not-found fallback.

use crate::error::AppError;
use crate::render::render;
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;

/// GET /about
pub async fn about() -> Result<Html<String>, AppError> {
    render("about.html", context! { title => "About" })
}

/// Any path no route or static file matched.
pub async fn not_found() -> Response {
    AppError::NotFound("page".into()).into_response()
}
