//! HTML rendering with minijinja. Templates are embedded in the binary and
//! auto-escaped (every template name ends in `.html`).

use crate::error::AppError;
use axum::http::StatusCode;
use axum::response::Html;
use minijinja::{context, Environment, Value};
use std::sync::LazyLock;

pub const SITE_DESCRIPTION: &str = "User Management System";

static VIEWS: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_loader(|name| Ok(template_source(name).map(str::to_owned)));
    env.add_global("description", SITE_DESCRIPTION);
    env
});

fn template_source(name: &str) -> Option<&'static str> {
    Some(match name {
        "layout.html" => include_str!("../templates/layout.html"),
        "index.html" => include_str!("../templates/index.html"),
        "search.html" => include_str!("../templates/search.html"),
        "about.html" => include_str!("../templates/about.html"),
        "404.html" => include_str!("../templates/404.html"),
        "error.html" => include_str!("../templates/error.html"),
        "customer/add.html" => include_str!("../templates/customer/add.html"),
        "customer/edit.html" => include_str!("../templates/customer/edit.html"),
        "customer/view.html" => include_str!("../templates/customer/view.html"),
        "customer/form.html" => include_str!("../templates/customer/form.html"),
        _ => return None,
    })
}

pub fn render(name: &str, ctx: Value) -> Result<Html<String>, AppError> {
    let template = VIEWS.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

pub fn not_found_page() -> Result<Html<String>, AppError> {
    render("404.html", context! { title => "Page Not Found" })
}

pub fn error_page(status: StatusCode, message: &str) -> Result<Html<String>, AppError> {
    render(
        "error.html",
        context! {
            title => "Something went wrong",
            status => status.as_u16(),
            reason => status.canonical_reason().unwrap_or("Error"),
            message => message,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_template_loads() {
        for name in [
            "index.html",
            "search.html",
            "about.html",
            "404.html",
            "error.html",
            "customer/add.html",
            "customer/edit.html",
            "customer/view.html",
        ] {
            assert!(VIEWS.get_template(name).is_ok(), "{} failed to load", name);
        }
    }

    #[test]
    fn values_are_html_escaped() {
        let html = render(
            "customer/view.html",
            context! {
                title => "View Customer",
                customer => context! {
                    id => "1",
                    firstName => "<script>",
                    lastName => "L",
                    tel => "1",
                    email => "e",
                    details => "",
                },
            },
        )
        .unwrap();
        assert!(html.0.contains("&lt;script&gt;"));
        assert!(!html.0.contains("<script>"));
    }

    #[test]
    fn error_page_shows_status() {
        let html = error_page(StatusCode::BAD_GATEWAY, "the customer database is unavailable").unwrap();
        assert!(html.0.contains("502"));
        assert!(html.0.contains("the customer database is unavailable"));
    }
}
