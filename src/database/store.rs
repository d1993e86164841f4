use async_trait::async_trait;
use thiserror::Error;

use crate::models::Message;

/// Errors from a message store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Message {0} already exists")]
    DuplicateKey(i64),

    /// An update targeted a row that was not there at write time
    #[error("Write conflict on message {0}")]
    WriteConflict(i64),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Keyed persistence for messages.
///
/// Implementations must make each single-record write atomic; nothing else
/// is serialized by the service layer.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// All messages in store iteration order
    async fn list(&self) -> Result<Vec<Message>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Message>, StoreError>;

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.find(id).await?.is_some())
    }

    /// Insert a new record; `DuplicateKey` if the id is taken
    async fn insert(&self, message: Message) -> Result<Message, StoreError>;

    /// Replace title and text of the record with this id and owner.
    /// Owner and creation time are never rewritten. `WriteConflict` if no
    /// row matches both id and `user_id`.
    async fn update(&self, message: Message) -> Result<(), StoreError>;

    /// Remove and return the record, or `None` if it was not there
    async fn remove(&self, id: i64) -> Result<Option<Message>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
