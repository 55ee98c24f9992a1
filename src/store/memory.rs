//! In-memory customer store for development and tests. Records are kept in insertion order.

use super::{now, update_stamp, CustomerStore};
use crate::error::AppError;
use crate::model::{Customer, CustomerPatch, NewCustomer, Page, PageRequest};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryCustomerStore {
    records: RwLock<Vec<Customer>>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn create(&self, input: NewCustomer) -> Result<Customer, AppError> {
        let customer = Customer {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            tel: input.tel,
            email: input.email,
            details: input.details,
            created_at: now(),
            updated_at: None,
        };
        self.records.write().await.push(customer.clone());
        tracing::debug!(id = %customer.id, "customer created");
        Ok(customer)
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Customer>, AppError> {
        let records = self.records.read().await;
        let items = records
            .iter()
            .rev()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .cloned()
            .collect();
        Ok(Page {
            items,
            total: records.len() as u64,
        })
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|c| c.id == id).cloned())
    }

    async fn find_matching(&self, term: &str) -> Result<Vec<Customer>, AppError> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let records = self.records.read().await;
        Ok(records.iter().rev().filter(|c| c.matches(&needle)).cloned().collect())
    }

    async fn update_by_id(&self, id: Uuid, patch: CustomerPatch) -> Result<Option<Customer>, AppError> {
        let mut records = self.records.write().await;
        let Some(customer) = records.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        customer.apply(patch);
        customer.updated_at = Some(update_stamp(customer.created_at));
        tracing::debug!(id = %id, "customer updated");
        Ok(Some(customer.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let mut records = self.records.write().await;
        let position = records.iter().position(|c| c.id == id);
        let removed = position.map(|idx| records.remove(idx));
        if removed.is_some() {
            tracing::debug!(id = %id, "customer deleted");
        }
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(first: &str, last: &str) -> NewCustomer {
        NewCustomer {
            first_name: first.into(),
            last_name: last.into(),
            tel: "555-0100".into(),
            email: format!("{}@example.com", first.to_lowercase()),
            details: "met at the fair".into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_created_at_only() {
        let store = MemoryCustomerStore::new();
        let a = store.create(input("Ada", "Lovelace")).await.unwrap();
        let b = store.create(input("Alan", "Turing")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.updated_at.is_none());
        assert_eq!(store.find_by_id(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn update_changes_only_provided_fields() {
        let store = MemoryCustomerStore::new();
        let created = store.create(input("Ada", "Lovelace")).await.unwrap();
        let patch = CustomerPatch {
            tel: Some("555-0199".into()),
            ..Default::default()
        };
        let updated = store.update_by_id(created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.tel, "555-0199");
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.details, created.details);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.unwrap() > created.created_at);
    }

    #[tokio::test]
    async fn unknown_ids_are_none() {
        let store = MemoryCustomerStore::new();
        let id = Uuid::new_v4();
        assert!(store.find_by_id(id).await.unwrap().is_none());
        assert!(store.update_by_id(id, CustomerPatch::default()).await.unwrap().is_none());
        assert!(store.delete_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_record_and_count_follows() {
        let store = MemoryCustomerStore::new();
        let a = store.create(input("Ada", "Lovelace")).await.unwrap();
        store.create(input("Alan", "Turing")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
        let removed = store.delete_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.find_by_id(a.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_pages_newest_first() {
        let store = MemoryCustomerStore::new();
        for i in 0..13 {
            store.create(input(&format!("Name{}", i), "X")).await.unwrap();
        }
        let first = store.find_all(PageRequest::default()).await.unwrap();
        assert_eq!(first.total, 13);
        assert_eq!(first.items.len(), 12);
        assert_eq!(first.items[0].first_name, "Name12");
        let second = store
            .find_all(PageRequest { page: 2, per_page: 12 })
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].first_name, "Name0");
    }

    #[tokio::test]
    async fn search_ignores_case_and_blank_terms() {
        let store = MemoryCustomerStore::new();
        store.create(input("Ada", "Lovelace")).await.unwrap();
        store.create(input("Alan", "Turing")).await.unwrap();
        let hits = store.find_matching("LOVE").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].last_name, "Lovelace");
        assert!(store.find_matching("nobody").await.unwrap().is_empty());
        assert!(store.find_matching("  ").await.unwrap().is_empty());
    }
}
