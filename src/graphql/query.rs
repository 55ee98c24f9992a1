use super::parse_id;
use crate::model::{Customer, PageRequest};
use crate::store::SharedStore;
use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Customers newest first. `page` is 1-based; `perPage` defaults to 12 and is capped at 100.
    async fn customers(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        per_page: Option<i32>,
    ) -> Result<Vec<Customer>> {
        let store = ctx.data::<SharedStore>()?;
        let page = store
            .find_all(PageRequest::from_args(page, per_page))
            .await
            .map_err(|e| e.extend())?;
        Ok(page.items)
    }

    async fn count_customers(&self, ctx: &Context<'_>) -> Result<u64> {
        let store = ctx.data::<SharedStore>()?;
        store.count().await.map_err(|e| e.extend())
    }

    /// Null when no customer has this id.
    async fn customer(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Customer>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let store = ctx.data::<SharedStore>()?;
        store.find_by_id(id).await.map_err(|e| e.extend())
    }

    async fn search_customers(&self, ctx: &Context<'_>, search_term: String) -> Result<Vec<Customer>> {
        let store = ctx.data::<SharedStore>()?;
        store
            .find_matching(&search_term)
            .await
            .map_err(|e| e.extend())
    }
}
