//! Customer pages. Each handler issues one GraphQL operation and renders a template.

use super::api::{
    Added, Api, CustomerList, CustomerLookup, CustomerView, Deleted, SearchResults, Updated, ADD_CUSTOMER,
    DELETE_CUSTOMER, GET_CUSTOMER, LIST_CUSTOMERS, SEARCH_CUSTOMERS, UPDATE_CUSTOMER,
};
use crate::error::AppError;
use crate::flash::Flash;
use crate::render::render;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use minijinja::context;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Fixed page size of the dashboard listing.
pub const PER_PAGE: u32 = 12;

/// Page links shown on each side of the current page.
const PAGE_LINK_RADIUS: u64 = 4;

/// Page numbers linked from the pagination bar: a window around `current`, clipped to `1..=pages`.
pub fn page_links(current: u64, pages: u64) -> Vec<u64> {
    let first = current.saturating_sub(PAGE_LINK_RADIUS).max(1);
    let last = current.saturating_add(PAGE_LINK_RADIUS).min(pages);
    (first..=last).collect()
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
}

impl ListParams {
    /// Missing, non-numeric or non-positive pages fall back to the first page.
    fn page(&self) -> i32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}

/// Posted customer fields. Mapped 1:1 onto the mutation input; `_method` is ignored.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerForm {
    pub first_name: String,
    pub last_name: String,
    pub tel: String,
    pub email: String,
    pub details: String,
}

impl CustomerForm {
    fn into_view(self, id: String) -> CustomerView {
        CustomerView {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            tel: self.tel,
            email: self.email,
            details: self.details,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchForm {
    pub search_term: String,
}

/// GET /: paginated listing with any pending notice.
pub async fn homepage(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListParams>, AppError>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let current = params.page();
    let data: CustomerList = Api::new(&state.schema)
        .execute(LIST_CUSTOMERS, json!({ "page": current, "perPage": PER_PAGE }))
        .await?;
    let pages = data.count_customers.div_ceil(u64::from(PER_PAGE));
    let (jar, flash) = Flash::take(jar);
    let html = render(
        "index.html",
        context! {
            title => "Customers",
            customers => data.customers,
            current => current,
            pages => pages,
            page_links => page_links(current as u64, pages),
            flash => flash.map(Flash::message),
        },
    )?;
    Ok((jar, html))
}

/// GET /add
pub async fn add_customer() -> Result<Html<String>, AppError> {
    render_add(&CustomerForm::default(), None)
}

/// POST /add
pub async fn post_customer(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<CustomerForm>, AppError>,
) -> Result<Response, AppError> {
    let result: Result<Added, AppError> = Api::new(&state.schema)
        .execute(ADD_CUSTOMER, json!({ "input": &form }))
        .await;
    match result {
        Ok(added) => {
            tracing::info!(id = %added.add_customer.id, "customer added from form");
            Ok((Flash::CustomerAdded.set(jar), Redirect::to("/")).into_response())
        }
        Err(AppError::Validation(message)) => {
            let html = render_add(&form, Some(&message))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /view/:id
pub async fn view(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>, AppError> {
    let customer = fetch_customer(&state, &id).await?;
    render(
        "customer/view.html",
        context! { title => "View Customer Data", customer => customer },
    )
}

/// GET /edit/:id: pre-filled form with any pending notice.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let customer = fetch_customer(&state, &id).await?;
    let (jar, flash) = Flash::take(jar);
    let html = render(
        "customer/edit.html",
        context! {
            title => "Edit Customer Data",
            customer => customer,
            flash => flash.map(Flash::message),
        },
    )?;
    Ok((jar, html))
}

/// POST /edit/:id (or PUT): replaces every posted field, then back to the edit form.
pub async fn edit_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<CustomerForm>, AppError>,
) -> Result<Response, AppError> {
    let result: Result<Updated, AppError> = Api::new(&state.schema)
        .execute(UPDATE_CUSTOMER, json!({ "id": &id, "input": &form }))
        .await;
    match result {
        Ok(updated) => {
            let target = format!("/edit/{}", updated.update_customer.id);
            Ok((Flash::CustomerUpdated.set(jar), Redirect::to(&target)).into_response())
        }
        Err(AppError::Validation(message)) => {
            let html = render(
                "customer/edit.html",
                context! {
                    title => "Edit Customer Data",
                    customer => form.into_view(id),
                    error => message,
                },
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
        }
        Err(e) => Err(e),
    }
}

/// POST /delete/:id (or DELETE)
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let deleted: Deleted = Api::new(&state.schema)
        .execute(DELETE_CUSTOMER, json!({ "id": &id }))
        .await?;
    tracing::info!(id = %deleted.delete_customer.id, "customer deleted from form");
    Ok((Flash::CustomerDeleted.set(jar), Redirect::to("/")).into_response())
}

/// POST /search: unpaginated matches.
pub async fn search_customers(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<SearchForm>, AppError>,
) -> Result<Html<String>, AppError> {
    let results: SearchResults = Api::new(&state.schema)
        .execute(SEARCH_CUSTOMERS, json!({ "searchTerm": &form.search_term }))
        .await?;
    render(
        "search.html",
        context! {
            title => "Search Customer Data",
            customers => results.search_customers,
            search_term => form.search_term,
        },
    )
}

async fn fetch_customer(state: &AppState, id: &str) -> Result<CustomerView, AppError> {
    let lookup: CustomerLookup = Api::new(&state.schema)
        .execute(GET_CUSTOMER, json!({ "id": id }))
        .await?;
    lookup
        .customer
        .ok_or_else(|| AppError::NotFound(format!("customer {}", id)))
}

fn render_add(form: &CustomerForm, error: Option<&str>) -> Result<Html<String>, AppError> {
    render(
        "customer/add.html",
        context! {
            title => "Add New Customer",
            customer => form,
            error => error,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_page_param_falls_back_to_first_page() {
        let page = |p: Option<&str>| ListParams { page: p.map(String::from) }.page();
        assert_eq!(page(None), 1);
        assert_eq!(page(Some("abc")), 1);
        assert_eq!(page(Some("0")), 1);
        assert_eq!(page(Some("3")), 3);
    }

    #[test]
    fn page_links_are_a_window_around_current() {
        assert_eq!(page_links(1, 1), vec![1]);
        assert_eq!(page_links(1, 3), vec![1, 2, 3]);
        assert_eq!(page_links(1, 100), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_links(50, 100), (46..=54).collect::<Vec<_>>());
        assert_eq!(page_links(100, 100), vec![96, 97, 98, 99, 100]);
        assert!(page_links(20, 3).is_empty());
    }

    #[test]
    fn listing_renders_with_a_very_large_page_count() {
        let pages = 1_000_000u64;
        let html = render(
            "index.html",
            context! {
                title => "Customers",
                customers => Vec::<CustomerView>::new(),
                current => 2,
                pages => pages,
                page_links => page_links(2, pages),
            },
        )
        .unwrap()
        .0;
        assert!(html.contains("href=\"/?page=6\""));
        assert!(!html.contains("href=\"/?page=7\""));
        assert!(html.contains("href=\"/?page=3\">Next"));
    }

    #[test]
    fn form_serializes_as_mutation_input() {
        let form = CustomerForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            tel: "555".into(),
            email: "a@b.com".into(),
            details: "x".into(),
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["lastName"], "Lovelace");
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
