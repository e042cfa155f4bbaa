//! In-memory document store.
//!
//! Reference implementation of the store contract, used throughout the test
//! suite. Clones share the same underlying map.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  documents: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of documents currently stored.
  pub async fn len(&self) -> usize {
    self.documents.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.documents.read().await.is_empty()
  }
}

#[async_trait]
impl DocumentStore for MemoryStore {
  async fn get(&self, key: &str) -> Result<Value, StoreError> {
    let documents = self.documents.read().await;
    documents.get(key).cloned().ok_or_else(|| StoreError::NotFound { key: key.to_string() })
  }

  async fn insert(&self, key: &str, value: &Value) -> Result<(), StoreError> {
    let mut documents = self.documents.write().await;
    if documents.contains_key(key) {
      return Err(StoreError::AlreadyExists { key: key.to_string() });
    }
    documents.insert(key.to_string(), value.clone());
    Ok(())
  }

  async fn upsert(&self, key: &str, value: &Value) -> Result<(), StoreError> {
    let mut documents = self.documents.write().await;
    documents.insert(key.to_string(), value.clone());
    Ok(())
  }
}
