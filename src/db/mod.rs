pub mod enums;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager as DbConnectionManager};
use diesel::PgConnection;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

pub use store::{SharedStore, Store};

pub type DbPool = r2d2::Pool<DbConnectionManager<PgConnection>>;

const BOOTSTRAP_SQL: &str = include_str!("bootstrap.sql");

pub fn build_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let manager = DbConnectionManager::<PgConnection>::new(&config.url);
    let pool = r2d2::Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)?;
    Ok(pool)
}

/// Creates any missing tables. Safe to run on every start.
pub fn init_schema(pool: &DbPool) -> AppResult<()> {
    let mut conn = pool.get()?;
    conn.batch_execute(BOOTSTRAP_SQL)?;
    tracing::info!("Database schema is up to date");
    Ok(())
}

/// Runs synchronous store work on tokio's blocking pool.
pub async fn run_blocking<F, T>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::internal(format!("Blocking task failed: {}", e)))?
}
