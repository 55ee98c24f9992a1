//! In-process client for the GraphQL API used by the page handlers.
//!
//! Pages send the same operation documents a remote client would, but execute
//! them directly on the schema instead of over loopback HTTP.

use crate::error::AppError;
use crate::graphql::CustomerSchema;
use async_graphql::{Request, Variables};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const LIST_CUSTOMERS: &str = r#"
query GetCustomers($page: Int, $perPage: Int) {
    customers(page: $page, perPage: $perPage) {
        id firstName lastName tel email details createdAt
    }
    countCustomers
}"#;

pub const GET_CUSTOMER: &str = r#"
query GetCustomer($id: ID!) {
    customer(id: $id) {
        id firstName lastName tel email details createdAt updatedAt
    }
}"#;

pub const ADD_CUSTOMER: &str = r#"
mutation AddCustomer($input: CustomerInput!) {
    addCustomer(input: $input) { id }
}"#;

pub const UPDATE_CUSTOMER: &str = r#"
mutation UpdateCustomer($id: ID!, $input: CustomerUpdateInput!) {
    updateCustomer(id: $id, input: $input) { id }
}"#;

pub const DELETE_CUSTOMER: &str = r#"
mutation DeleteCustomer($id: ID!) {
    deleteCustomer(id: $id) { id }
}"#;

pub const SEARCH_CUSTOMERS: &str = r#"
query SearchCustomers($searchTerm: String!) {
    searchCustomers(searchTerm: $searchTerm) {
        id firstName lastName tel email details
    }
}"#;

/// A customer as selected by the page operations. Fields a query leaves out stay empty.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerView {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub tel: String,
    pub email: String,
    pub details: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerList {
    pub customers: Vec<CustomerView>,
    pub count_customers: u64,
}

#[derive(Debug, Deserialize)]
pub struct CustomerLookup {
    pub customer: Option<CustomerView>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub search_customers: Vec<CustomerView>,
}

/// Mutation payloads only select the id.
#[derive(Debug, Deserialize)]
pub struct IdOnly {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Added {
    pub add_customer: IdOnly,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Updated {
    pub update_customer: IdOnly,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub delete_customer: IdOnly,
}

pub struct Api<'a> {
    schema: &'a CustomerSchema,
}

impl<'a> Api<'a> {
    pub fn new(schema: &'a CustomerSchema) -> Self {
        Self { schema }
    }

    /// Run one operation. The first error entry becomes the returned error; otherwise `data` is decoded into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        variables: serde_json::Value,
    ) -> Result<T, AppError> {
        let request = Request::new(operation).variables(Variables::from_json(variables));
        let response = self.schema.execute(request).await;
        if let Some(err) = response.errors.first() {
            return Err(AppError::from_server_error(err));
        }
        let data = response
            .data
            .into_json()
            .map_err(|e| AppError::Graphql(e.to_string()))?;
        serde_json::from_value(data).map_err(|e| AppError::Graphql(format!("unexpected response shape: {}", e)))
    }
}
