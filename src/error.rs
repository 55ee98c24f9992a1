//! Typed errors, HTTP mapping and GraphQL error codes.

use crate::render;
use async_graphql::{ErrorExtensions, ServerError};
use axum::{
    extract::rejection::{FormRejection, QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("graphql: {0}")]
    Graphql(String),
    #[error("template: {0}")]
    Template(#[from] minijinja::Error),
}

impl AppError {
    /// Value of `extensions.code` on GraphQL error entries.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "BAD_USER_INPUT",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Db(_) | AppError::Unavailable(_) => "STORE_UNAVAILABLE",
            AppError::Graphql(_) | AppError::Template(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Unavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::Graphql(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a client. Database details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Db(_) => "the customer database is unavailable".into(),
            AppError::Template(_) => "the page could not be rendered".into(),
            AppError::NotFound(what) => format!("{} was not found", what),
            other => other.to_string(),
        }
    }

    /// Rebuild an error from a GraphQL error entry using its `code` extension.
    /// Entries without a code come from the executor itself (parse or coercion failures).
    pub fn from_server_error(err: &ServerError) -> Self {
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .and_then(|v| match v {
                async_graphql::Value::String(s) => Some(s.as_str()),
                _ => None,
            });
        let message = err.message.clone();
        match code {
            Some("NOT_FOUND") => AppError::NotFound(message),
            Some("BAD_USER_INPUT") => AppError::Validation(message),
            Some("BAD_REQUEST") => AppError::BadRequest(message),
            Some("STORE_UNAVAILABLE") => AppError::Unavailable(message),
            Some(_) => AppError::Graphql(message),
            None => AppError::BadRequest(message),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        if let AppError::Db(e) = self {
            tracing::error!(error = %e, "store call failed");
        }
        let code = self.code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, ext| ext.set("code", code))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::NotFound(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                tracing::warn!(status = %status, error = %self, "request failed")
            }
            _ => tracing::error!(status = %status, error = %self, "request failed"),
        }
        let page = if status == StatusCode::NOT_FOUND {
            render::not_found_page()
        } else {
            render::error_page(status, &self.public_message())
        };
        match page {
            Ok(html) => (status, html).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "error page could not be rendered");
                (status, Html(format!("<h1>{}</h1>", status))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_graphql_errors() {
        let errors = [
            AppError::NotFound("customer".into()),
            AppError::Validation("firstName is required".into()),
            AppError::Unavailable("down".into()),
        ];
        for err in errors {
            let status = err.status();
            let server_error = err.extend().into_server_error(async_graphql::Pos { line: 1, column: 1 });
            let rebuilt = AppError::from_server_error(&server_error);
            assert_eq!(rebuilt.status(), status);
        }
    }

    #[test]
    fn executor_errors_without_code_are_bad_requests() {
        let server_error = ServerError::new("unknown field", None);
        assert!(matches!(
            AppError::from_server_error(&server_error),
            AppError::BadRequest(_)
        ));
    }

    #[test]
    fn database_details_are_not_public() {
        let err = AppError::Db(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(!err.public_message().contains("pool"));
    }
}
