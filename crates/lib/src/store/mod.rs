//! Document store client interface.
//!
//! The manifest core talks to the remote key-value document store through
//! [`DocumentStore`]: one JSON document per key, create-only `insert`,
//! create-or-replace `upsert`. Two implementations are provided:
//! [`MemoryStore`] (tests and reference semantics) and [`HttpStore`] (the
//! bucket-scoped HTTP document API).

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

mod http;
mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("document not found: {key}")]
  NotFound { key: String },

  #[error("document already exists: {key}")]
  AlreadyExists { key: String },

  #[error("failed to decode document {key}: {message}")]
  Decode { key: String, message: String },

  #[error("connection error: {0}")]
  Connection(String),

  #[error("backend error: {0}")]
  Backend(String),
}

impl StoreError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, StoreError::NotFound { .. })
  }

  pub fn is_already_exists(&self) -> bool {
    matches!(self, StoreError::AlreadyExists { .. })
  }
}

/// A remote key-value document store holding one JSON document per key.
///
/// Writes are last-writer-wins: `upsert` replaces the whole document, and no
/// compare-and-swap primitive is exposed. Callers that read-modify-write must
/// accept the resulting race window (see [`ManifestRepository`]).
///
/// [`ManifestRepository`]: crate::manifest::ManifestRepository
#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// Fetch the document stored under `key`.
  ///
  /// Fails with [`StoreError::NotFound`] if no document exists.
  async fn get(&self, key: &str) -> Result<Value, StoreError>;

  /// Create the document under `key`.
  ///
  /// Create-only: fails with [`StoreError::AlreadyExists`] if the key is
  /// taken.
  async fn insert(&self, key: &str, value: &Value) -> Result<(), StoreError>;

  /// Create or replace the document under `key`.
  async fn upsert(&self, key: &str, value: &Value) -> Result<(), StoreError>;
}
