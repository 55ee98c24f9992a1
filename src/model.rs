//! Customer record and the typed inputs that create or change one.

use crate::error::AppError;
use async_graphql::InputObject;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Default and maximum page sizes for list queries.
pub const DEFAULT_PER_PAGE: u32 = 12;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub tel: String,
    pub email: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Case-insensitive substring match over every visible text field.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.tel,
            &self.email,
            &self.details,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }

    /// Apply the provided fields of a patch in place.
    pub fn apply(&mut self, patch: CustomerPatch) {
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.tel {
            self.tel = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.details {
            self.details = v;
        }
    }
}

/// Fields for `addCustomer`. All required; `details` may be empty.
#[derive(Clone, Debug, Default, InputObject)]
#[graphql(name = "CustomerInput")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub tel: String,
    pub email: String,
    pub details: String,
}

impl NewCustomer {
    pub fn validate(&self) -> Result<(), AppError> {
        require("firstName", &self.first_name)?;
        require("lastName", &self.last_name)?;
        require("tel", &self.tel)?;
        require("email", &self.email)
    }
}

/// Fields for `updateCustomer`. Only the fields that are present change.
#[derive(Clone, Debug, Default, InputObject)]
#[graphql(name = "CustomerUpdateInput")]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub tel: Option<String>,
    pub email: Option<String>,
    pub details: Option<String>,
}

impl CustomerPatch {
    /// Provided required fields must not be blank.
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("tel", &self.tel),
            ("email", &self.email),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                require(name, v)?;
            }
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// One page of a listing: `page` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// Clamp raw GraphQL arguments: page >= 1, per_page within 1..=MAX_PER_PAGE.
    pub fn from_args(page: Option<i32>, per_page: Option<i32>) -> Self {
        let page = page.filter(|p| *p >= 1).map_or(1, |p| p as u32);
        let per_page = per_page
            .filter(|n| *n >= 1)
            .map_or(DEFAULT_PER_PAGE, |n| (n as u32).min(MAX_PER_PAGE));
        Self { page, per_page }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> NewCustomer {
        NewCustomer {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            tel: "555".into(),
            email: "a@b.com".into(),
            details: String::new(),
        }
    }

    #[test]
    fn new_customer_allows_empty_details() {
        assert!(ada().validate().is_ok());
    }

    #[test]
    fn new_customer_rejects_blank_required_field() {
        let input = NewCustomer {
            email: "   ".into(),
            ..ada()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn patch_only_checks_present_fields() {
        assert!(CustomerPatch::default().validate().is_ok());
        let patch = CustomerPatch {
            last_name: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn page_request_clamps_arguments() {
        assert_eq!(PageRequest::from_args(None, None), PageRequest::default());
        let req = PageRequest::from_args(Some(0), Some(5000));
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, MAX_PER_PAGE);
        assert_eq!(PageRequest::from_args(Some(3), Some(12)).offset(), 24);
    }
}
