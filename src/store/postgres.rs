//! PostgreSQL customer store. One row per customer document in table `customers`.

use super::{now, CustomerStore};
use crate::error::AppError;
use crate::model::{Customer, CustomerPatch, NewCustomer, Page, PageRequest};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

const COLUMNS: &str = "id, first_name, last_name, tel, email, details, created_at, updated_at";

#[derive(Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn create(&self, input: NewCustomer) -> Result<Customer, AppError> {
        let sql = format!(
            "INSERT INTO customers (id, first_name, last_name, tel, email, details, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.tel)
            .bind(&input.email)
            .bind(&input.details)
            .bind(now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Customer>, AppError> {
        let sql = format!(
            "SELECT {} FROM customers ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
            COLUMNS
        );
        tracing::debug!(sql = %sql, page = page.page, per_page = page.per_page, "query");
        let items = sqlx::query_as::<_, Customer>(&sql)
            .bind(i64::from(page.per_page))
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;
        let total = self.count().await?;
        Ok(Page { items, total })
    }

    async fn count(&self) -> Result<u64, AppError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(n.max(0) as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let sql = format!("SELECT {} FROM customers WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id = %id, "query");
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_matching(&self, term: &str) -> Result<Vec<Customer>, AppError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} FROM customers \
             WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR tel ILIKE $1 \
             OR email ILIKE $1 OR details ILIKE $1 \
             ORDER BY created_at DESC, id DESC",
            COLUMNS
        );
        let pattern = format!("%{}%", escape_like(term));
        tracing::debug!(sql = %sql, pattern = %pattern, "query");
        let rows = sqlx::query_as::<_, Customer>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_by_id(&self, id: Uuid, patch: CustomerPatch) -> Result<Option<Customer>, AppError> {
        // updated_at must land strictly after created_at.
        let sql = format!(
            "UPDATE customers SET \
             first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), \
             tel = COALESCE($4, tel), \
             email = COALESCE($5, email), \
             details = COALESCE($6, details), \
             updated_at = GREATEST($7, created_at + INTERVAL '1 microsecond') \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = %id, "query");
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .bind(patch.first_name)
            .bind(patch.last_name)
            .bind(patch.tel)
            .bind(patch.email)
            .bind(patch.details)
            .bind(now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let sql = format!("DELETE FROM customers WHERE id = $1 RETURNING {}", COLUMNS);
        tracing::debug!(sql = %sql, id = %id, "query");
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create the `customers` table if it does not exist.
pub async fn ensure_customers_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            tel TEXT NOT NULL,
            email TEXT NOT NULL,
            details TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS customers_created_at_idx ON customers (created_at DESC)")
        .execute(pool)
        .await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Escape LIKE wildcards so the term matches literally (default escape character is `\`).
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
