use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use super::store::{MessageStore, StoreError};
use crate::config::DatabaseConfig;
use crate::models::Message;

const UNIQUE_VIOLATION: &str = "23505";

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS messages (
        id          BIGINT PRIMARY KEY,
        user_id     BIGINT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL,
        title       VARCHAR(50) NOT NULL,
        text        VARCHAR(500) NOT NULL
    )
"#;

/// PostgreSQL-backed message store
#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from config and make sure the messages table exists
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| StoreError::QueryError("DATABASE_URL is not configured".to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        let store = Self::new(pool);
        store.ensure_schema().await?;

        info!("Connected message store to PostgreSQL");
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn list(&self) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query_as::<_, Message>(
            "SELECT id, user_id, created_at, title, text FROM messages ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> Result<Option<Message>, StoreError> {
        let row = sqlx::query_as::<_, Message>(
            "SELECT id, user_id, created_at, title, text FROM messages WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, message: Message) -> Result<Message, StoreError> {
        let result = sqlx::query(
            "INSERT INTO messages (id, user_id, created_at, title, text) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(message.id)
        .bind(message.user_id)
        .bind(message.created_at)
        .bind(&message.title)
        .bind(&message.text)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(message),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateKey(message.id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, message: Message) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE messages SET title = $3, text = $4 WHERE id = $1 AND user_id = $2",
        )
        .bind(message.id)
        .bind(message.user_id)
        .bind(&message.title)
        .bind(&message.text)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::WriteConflict(message.id));
        }
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<Option<Message>, StoreError> {
        let row = sqlx::query_as::<_, Message>(
            "DELETE FROM messages WHERE id = $1 RETURNING id, user_id, created_at, title, text",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
