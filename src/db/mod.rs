//! Document store: JSON documents grouped into collections.
//!
//! Postgres keeps every collection in a single JSONB table. Without a
//! `DATABASE_URL` the server runs on the in-memory backend, which is also
//! what the tests use.

pub mod memory;

use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{sync::Arc, time::Duration};

use crate::content::Collection;
pub use memory::MemoryStore;

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl DbConfig {
    pub fn from_env(url: &str) -> Self {
        let num = |key: &str, default: u64| {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };
        Self {
            url: url.to_string(),
            max_connections: num("DB_POOL_MAX", 10) as u32,
            min_connections: num("DB_POOL_MIN", 2) as u32,
            connect_timeout_secs: num("DB_CONNECT_TIMEOUT", 10),
            idle_timeout_secs: num("DB_IDLE_TIMEOUT", 300),
        }
    }
}

pub async fn init_pool(config: &DbConfig) -> Result<Arc<PgPool>, sqlx::Error> {
    tracing::info!("Initializing database connection pool...");
    tracing::debug!(
        "Database URL: {}",
        config.url.replace(
            |c: char| !c.is_ascii_alphanumeric() && c != ':' && c != '/' && c != '@' && c != '.',
            "*"
        )
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(1800))
        .test_before_acquire(true)
        .connect(&config.url)
        .await?;

    sqlx::query("SELECT 1").fetch_one(&pool).await?;

    tracing::info!("Database connection pool initialized successfully");
    Ok(Arc::new(pool))
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            data JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            PRIMARY KEY (collection, id)
        )
    "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_documents_collection_created
            ON documents(collection, created_at)
    "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

#[derive(Debug, Clone)]
pub enum DocumentStore {
    Postgres(Arc<PgPool>),
    Memory(MemoryStore),
}

impl DocumentStore {
    pub fn memory() -> Self {
        DocumentStore::Memory(MemoryStore::default())
    }

    pub fn backend(&self) -> &'static str {
        match self {
            DocumentStore::Postgres(_) => "postgres",
            DocumentStore::Memory(_) => "memory",
        }
    }

    /// All documents of a collection in insertion order.
    pub async fn list(&self, collection: Collection) -> Result<Vec<Value>, sqlx::Error> {
        match self {
            DocumentStore::Postgres(pool) => {
                let rows: Vec<(Value,)> = sqlx::query_as(
                    "SELECT data FROM documents WHERE collection = $1 ORDER BY created_at, id",
                )
                .bind(collection.as_str())
                .fetch_all(pool.as_ref())
                .await?;
                Ok(rows.into_iter().map(|(data,)| data).collect())
            }
            DocumentStore::Memory(store) => store.list(collection).await,
        }
    }

    pub async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, sqlx::Error> {
        match self {
            DocumentStore::Postgres(pool) => {
                let row: Option<(Value,)> =
                    sqlx::query_as("SELECT data FROM documents WHERE collection = $1 AND id = $2")
                        .bind(collection.as_str())
                        .bind(id)
                        .fetch_optional(pool.as_ref())
                        .await?;
                Ok(row.map(|(data,)| data))
            }
            DocumentStore::Memory(store) => store.get(collection, id).await,
        }
    }

    pub async fn insert(&self, collection: Collection, id: &str, data: &Value) -> Result<(), sqlx::Error> {
        match self {
            DocumentStore::Postgres(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO documents (collection, id, data, created_at, updated_at)
                    VALUES ($1, $2, $3, now(), now())
                    "#,
                )
                .bind(collection.as_str())
                .bind(id)
                .bind(data)
                .execute(pool.as_ref())
                .await?;
                Ok(())
            }
            DocumentStore::Memory(store) => store.insert(collection, id, data.clone()).await,
        }
    }

    /// Replace an existing document. Returns `false` when there was nothing to replace.
    pub async fn put(&self, collection: Collection, id: &str, data: &Value) -> Result<bool, sqlx::Error> {
        match self {
            DocumentStore::Postgres(pool) => {
                let result = sqlx::query(
                    r#"
                    UPDATE documents SET data = $3, updated_at = now()
                    WHERE collection = $1 AND id = $2
                    "#,
                )
                .bind(collection.as_str())
                .bind(id)
                .bind(data)
                .execute(pool.as_ref())
                .await?;
                Ok(result.rows_affected() > 0)
            }
            DocumentStore::Memory(store) => store.put(collection, id, data.clone()).await,
        }
    }

    pub async fn delete(&self, collection: Collection, id: &str) -> Result<bool, sqlx::Error> {
        match self {
            DocumentStore::Postgres(pool) => {
                let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
                    .bind(collection.as_str())
                    .bind(id)
                    .execute(pool.as_ref())
                    .await?;
                Ok(result.rows_affected() > 0)
            }
            DocumentStore::Memory(store) => store.delete(collection, id).await,
        }
    }

    pub async fn count(&self, collection: Collection) -> Result<i64, sqlx::Error> {
        match self {
            DocumentStore::Postgres(pool) => {
                let (total,): (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM documents WHERE collection = $1")
                        .bind(collection.as_str())
                        .fetch_one(pool.as_ref())
                        .await?;
                Ok(total)
            }
            DocumentStore::Memory(store) => Ok(store.list(collection).await?.len() as i64),
        }
    }

    pub async fn health_check(&self) -> Result<Duration, sqlx::Error> {
        let start = std::time::Instant::now();
        match self {
            DocumentStore::Postgres(pool) => {
                sqlx::query("SELECT 1").fetch_one(pool.as_ref()).await?;
            }
            DocumentStore::Memory(store) => {
                store.list(Collection::Projects).await?;
            }
        }
        Ok(start.elapsed())
    }
}
