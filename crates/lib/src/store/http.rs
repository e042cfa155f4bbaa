//! HTTP document store client.
//!
//! Talks to a bucket-scoped JSON document API:
//!
//! ```text
//! GET  /<bucket>/<key>   200 document | 404
//! POST /<bucket>/<key>   201 created  | 409 already exists
//! PUT  /<bucket>/<key>   200/201 replaced or created
//! ```
//!
//! Any other status surfaces as a backend error with the status line.
//! Authentication and retry policy are the deployment's concern, not this
//! client's.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use super::{DocumentStore, StoreError};

pub struct HttpStore {
  client: reqwest::Client,
  base_url: String,
}

impl HttpStore {
  /// Connect to `http://<host>:<port>/<bucket>`.
  pub fn new(host: &str, port: u16, bucket: &str) -> Self {
    Self::with_base_url(&format!("http://{}:{}", host, port), bucket)
  }

  /// Connect to an explicit base URL, e.g. a local test server.
  pub fn with_base_url(base_url: &str, bucket: &str) -> Self {
    Self {
      client: reqwest::Client::new(),
      base_url: format!("{}/{}", base_url.trim_end_matches('/'), bucket),
    }
  }

  fn document_url(&self, key: &str) -> String {
    format!("{}/{}", self.base_url, key)
  }
}

fn request_error(err: reqwest::Error) -> StoreError {
  if err.is_connect() {
    StoreError::Connection(err.to_string())
  } else {
    StoreError::Backend(err.to_string())
  }
}

#[async_trait]
impl DocumentStore for HttpStore {
  async fn get(&self, key: &str) -> Result<Value, StoreError> {
    let url = self.document_url(key);
    debug!(%url, "GET document");

    let response = self.client.get(&url).send().await.map_err(request_error)?;
    match response.status() {
      StatusCode::NOT_FOUND => Err(StoreError::NotFound { key: key.to_string() }),
      status if status.is_success() => response.json::<Value>().await.map_err(|e| StoreError::Decode {
        key: key.to_string(),
        message: e.to_string(),
      }),
      status => Err(StoreError::Backend(format!("GET {} returned {}", key, status))),
    }
  }

  async fn insert(&self, key: &str, value: &Value) -> Result<(), StoreError> {
    let url = self.document_url(key);
    debug!(%url, "POST document");

    let response = self.client.post(&url).json(value).send().await.map_err(request_error)?;
    match response.status() {
      StatusCode::CONFLICT => Err(StoreError::AlreadyExists { key: key.to_string() }),
      status if status.is_success() => Ok(()),
      status => Err(StoreError::Backend(format!("POST {} returned {}", key, status))),
    }
  }

  async fn upsert(&self, key: &str, value: &Value) -> Result<(), StoreError> {
    let url = self.document_url(key);
    debug!(%url, "PUT document");

    let response = self.client.put(&url).json(value).send().await.map_err(request_error)?;
    if response.status().is_success() {
      Ok(())
    } else {
      Err(StoreError::Backend(format!("PUT {} returned {}", key, response.status())))
    }
  }
}
