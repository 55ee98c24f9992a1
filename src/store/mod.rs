//! Customer record store: one async trait, a PostgreSQL backend and an in-memory backend.

mod memory;
mod postgres;

pub use memory::MemoryCustomerStore;
pub use postgres::{ensure_customers_table, ensure_database_exists, PgCustomerStore};

use crate::error::AppError;
use crate::model::{Customer, CustomerPatch, NewCustomer, Page, PageRequest};
use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Store handle shared by the GraphQL schema and the readiness probe.
pub type SharedStore = Arc<dyn CustomerStore>;

/// Persistence for customer records. Ids and timestamps are generated here.
/// There is no concurrency token: concurrent updates to one id are last-write-wins.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert a new record with a fresh id and `created_at`; `updated_at` stays empty.
    async fn create(&self, input: NewCustomer) -> Result<Customer, AppError>;

    /// Newest first, limited to the requested page, with the total record count.
    async fn find_all(&self, page: PageRequest) -> Result<Page<Customer>, AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError>;

    /// Records where any visible field contains `term`, ignoring case. A blank term matches nothing.
    async fn find_matching(&self, term: &str) -> Result<Vec<Customer>, AppError>;

    /// Merge the provided fields and refresh `updated_at`. `None` when the id is unknown.
    async fn update_by_id(&self, id: Uuid, patch: CustomerPatch) -> Result<Option<Customer>, AppError>;

    /// Hard delete. Returns the removed record, `None` when the id is unknown.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError>;

    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Current time at the precision PostgreSQL keeps, so stored and returned values compare equal.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for an update, strictly after `created_at` even within one clock tick.
pub(crate) fn update_stamp(created_at: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > created_at {
        now
    } else {
        created_at + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_stamp_is_after_creation() {
        let created = now() + Duration::seconds(5);
        assert!(update_stamp(created) > created);
        let past = now() - Duration::seconds(5);
        assert!(update_stamp(past) > past);
    }
}
