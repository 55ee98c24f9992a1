//! GraphQL object type for customer records.

use crate::model::Customer;
use async_graphql::{Object, ID};

#[Object(name = "Customer")]
impl Customer {
    async fn id(&self) -> ID {
        ID::from(self.id.to_string())
    }

    async fn first_name(&self) -> String {
        self.first_name.clone()
    }

    async fn last_name(&self) -> String {
        self.last_name.clone()
    }

    async fn tel(&self) -> String {
        self.tel.clone()
    }

    async fn email(&self) -> String {
        self.email.clone()
    }

    async fn details(&self) -> String {
        self.details.clone()
    }

    /// RFC 3339, UTC.
    async fn created_at(&self) -> String {
        self.created_at.to_rfc3339()
    }

    /// Null until the first update.
    async fn updated_at(&self) -> Option<String> {
        self.updated_at.map(|t| t.to_rfc3339())
    }
}
