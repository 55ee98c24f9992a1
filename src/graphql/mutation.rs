use super::parse_id;
use crate::error::AppError;
use crate::model::{Customer, CustomerPatch, NewCustomer};
use crate::store::SharedStore;
use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

#[derive(Default)]
pub struct MutationRoot;

fn not_found(id: &ID) -> async_graphql::Error {
    AppError::NotFound(format!("customer {}", id.as_str())).extend()
}

#[Object]
impl MutationRoot {
    async fn add_customer(&self, ctx: &Context<'_>, input: NewCustomer) -> Result<Customer> {
        input.validate().map_err(|e| e.extend())?;
        let store = ctx.data::<SharedStore>()?;
        let customer = store.create(input).await.map_err(|e| e.extend())?;
        tracing::info!(id = %customer.id, "customer added");
        Ok(customer)
    }

    /// Only the fields present in `input` change; `updatedAt` is refreshed.
    /// An unknown id is reported before any input problem.
    async fn update_customer(&self, ctx: &Context<'_>, id: ID, input: CustomerPatch) -> Result<Customer> {
        let uuid = parse_id(&id).ok_or_else(|| not_found(&id))?;
        let store = ctx.data::<SharedStore>()?;
        if let Err(invalid) = input.validate() {
            let existing = store.find_by_id(uuid).await.map_err(|e| e.extend())?;
            return Err(match existing {
                Some(_) => invalid.extend(),
                None => not_found(&id),
            });
        }
        let customer = store
            .update_by_id(uuid, input)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| not_found(&id))?;
        tracing::info!(id = %customer.id, "customer updated");
        Ok(customer)
    }

    /// Hard delete; returns the removed record.
    async fn delete_customer(&self, ctx: &Context<'_>, id: ID) -> Result<Customer> {
        let uuid = parse_id(&id).ok_or_else(|| not_found(&id))?;
        let store = ctx.data::<SharedStore>()?;
        let customer = store
            .delete_by_id(uuid)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| not_found(&id))?;
        tracing::info!(id = %customer.id, "customer deleted");
        Ok(customer)
    }
}
