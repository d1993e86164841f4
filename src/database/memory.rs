use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{MessageStore, StoreError};
use crate::models::Message;

/// In-process store keyed by message id. Iterates in ascending id order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    messages: Arc<RwLock<BTreeMap<i64, Message>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given records
    pub fn with_messages(messages: impl IntoIterator<Item = Message>) -> Self {
        let map = messages.into_iter().map(|m| (m.id, m)).collect();
        Self {
            messages: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Message>, StoreError> {
        let messages = self.messages.read().await;
        Ok(messages.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Message>, StoreError> {
        let messages = self.messages.read().await;
        Ok(messages.get(&id).cloned())
    }

    async fn insert(&self, message: Message) -> Result<Message, StoreError> {
        let mut messages = self.messages.write().await;
        if messages.contains_key(&message.id) {
            return Err(StoreError::DuplicateKey(message.id));
        }
        messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn update(&self, message: Message) -> Result<(), StoreError> {
        let mut messages = self.messages.write().await;
        match messages.get_mut(&message.id) {
            Some(slot) if slot.user_id == message.user_id => {
                slot.title = message.title;
                slot.text = message.text;
                Ok(())
            }
            _ => Err(StoreError::WriteConflict(message.id)),
        }
    }

    async fn remove(&self, id: i64) -> Result<Option<Message>, StoreError> {
        let mut messages = self.messages.write().await;
        Ok(messages.remove(&id))
    }
}
