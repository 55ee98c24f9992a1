//! Server binary: loads configuration, connects the store, serves the app.

use customer_registry::store::{ensure_customers_table, ensure_database_exists};
use customer_registry::{app, AppConfig, AppState, MemoryCustomerStore, PgCustomerStore, SharedStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("customer_registry=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let store: SharedStore = match &config.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await?;
            ensure_customers_table(&pool).await?;
            tracing::info!("using PostgreSQL customer store");
            Arc::new(PgCustomerStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; customers are kept in memory and lost on restart");
            Arc::new(MemoryCustomerStore::new())
        }
    };

    let app = app(AppState::new(store), &config.static_dir);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
