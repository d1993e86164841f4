use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, error, info};

use crate::database::{MessageStore, StoreError};
use crate::models::{FieldErrors, Message, MessageInput};

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Invalid message: {message}")]
    InvalidInput {
        message: String,
        field_errors: Option<FieldErrors>,
    },
    #[error("Message {0} not found")]
    NotFound(i64),
    #[error("Message {0} belongs to another user")]
    Unauthorized(i64),
    #[error("Message {0} already exists")]
    Conflict(i64),
    #[error("Store failure: {0}")]
    Fatal(#[from] StoreError),
}

impl MessageError {
    fn invalid_fields(field_errors: FieldErrors) -> Self {
        MessageError::InvalidInput {
            message: "One or more fields are invalid".to_string(),
            field_errors: Some(field_errors),
        }
    }
}

/// Owner-scoped CRUD over the message collection.
///
/// Check order for every mutation: input shape, then existence, then
/// ownership. A malformed request from a non-owner reports invalid input.
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    audit: bool,
}

impl MessageService {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store, audit: false }
    }

    /// Emit an `audit` event for every committed mutation
    pub fn with_audit_logging(mut self, enabled: bool) -> Self {
        self.audit = enabled;
        self
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.health_check().await
    }

    /// Every message, readable by any authenticated user
    pub async fn list(&self) -> Result<Vec<Message>, MessageError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Message, MessageError> {
        self.store.find(id).await?.ok_or(MessageError::NotFound(id))
    }

    /// Create a message owned by `caller_id`. The id is chosen by the client.
    pub async fn create(&self, caller_id: i64, input: MessageInput) -> Result<Message, MessageError> {
        let valid = input.validate().map_err(MessageError::invalid_fields)?;

        if self.store.exists(valid.id).await? {
            debug!("Create rejected: message {} already exists", valid.id);
            return Err(MessageError::Conflict(valid.id));
        }

        let message = valid.into_message(caller_id, creation_time());

        let stored = match self.store.insert(message).await {
            Ok(stored) => stored,
            // Lost an insert race to another create with the same id
            Err(StoreError::DuplicateKey(id)) => return Err(MessageError::Conflict(id)),
            Err(e) => return Err(e.into()),
        };

        if self.audit {
            info!(target: "audit", user_id = caller_id, message_id = stored.id, "message created");
        }
        Ok(stored)
    }

    /// Replace title and text of a message the caller owns.
    /// Owner and creation time are carried over from the stored record.
    pub async fn update(&self, caller_id: i64, id: i64, input: MessageInput) -> Result<(), MessageError> {
        if input.id != id {
            return Err(MessageError::InvalidInput {
                message: format!("Path id {} does not match body id {}", id, input.id),
                field_errors: None,
            });
        }
        let valid = input.validate().map_err(MessageError::invalid_fields)?;

        let existing = self.get(id).await?;
        if existing.user_id != caller_id {
            return Err(MessageError::Unauthorized(id));
        }

        let message = valid.into_message(existing.user_id, existing.created_at);

        match self.store.update(message).await {
            Ok(()) => {}
            Err(StoreError::WriteConflict(_)) => {
                // Deleted, or deleted and re-created by someone else, since the read
                match self.store.find(id).await? {
                    None => return Err(MessageError::NotFound(id)),
                    Some(current) if current.user_id != caller_id => {
                        return Err(MessageError::Unauthorized(id));
                    }
                    Some(_) => {
                        error!("Unexpected write conflict updating message {}", id);
                        return Err(MessageError::Fatal(StoreError::WriteConflict(id)));
                    }
                }
            }
            Err(e) => return Err(e.into()),
        }

        if self.audit {
            info!(target: "audit", user_id = caller_id, message_id = id, "message updated");
        }
        Ok(())
    }

    /// Remove a message the caller owns and return it
    pub async fn delete(&self, caller_id: i64, id: i64) -> Result<Message, MessageError> {
        let existing = self.get(id).await?;
        if existing.user_id != caller_id {
            return Err(MessageError::Unauthorized(id));
        }

        let removed = self
            .store
            .remove(id)
            .await?
            .ok_or(MessageError::NotFound(id))?;

        if self.audit {
            info!(target: "audit", user_id = caller_id, message_id = id, "message deleted");
        }
        Ok(removed)
    }
}

// TIMESTAMPTZ stores microseconds
fn creation_time() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
