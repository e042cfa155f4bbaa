//! Manifest persistence against the document store.
//!
//! The repository owns creation, retrieval, and persistence of manifest
//! documents. Reading never writes: a missing manifest becomes a blank one
//! only in memory, and nothing reaches the store until a caller commits.
//!
//! Mutation goes through [`ManifestUpdate`], a handle that couples the
//! mutated manifest to the key it was read from. The only way to persist a
//! mutation is [`ManifestUpdate::commit`]; a dropped handle persists
//! nothing.
//!
//! # Concurrent writers
//!
//! Persistence is a whole-document upsert, last-writer-wins. Two concurrent
//! updates of the same manifest key can silently lose one writer's change
//! (a dropped revision entry or a reverted current pointer). The store
//! interface exposes no compare-and-swap, so this race is accepted and
//! relied on to be rare: deploys to one target are expected to be
//! low-concurrency.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::DeployError;
use crate::manifest::Manifest;
use crate::store::{DocumentStore, StoreError};

pub struct ManifestRepository {
  store: Arc<dyn DocumentStore>,
}

impl ManifestRepository {
  pub fn new(store: Arc<dyn DocumentStore>) -> Self {
    Self { store }
  }

  /// Fetch the manifest stored under `key`.
  ///
  /// Fails with [`DeployError::ManifestNotFound`] if absent; callers that
  /// want lazy creation use [`Self::begin_update`] or
  /// [`Self::fetch_or_create`] instead.
  pub async fn fetch(&self, key: &str) -> Result<Manifest, DeployError> {
    let value = self.store.get(key).await.map_err(|e| {
      if e.is_not_found() {
        DeployError::ManifestNotFound { key: key.to_string() }
      } else {
        DeployError::ManifestFetch {
          key: key.to_string(),
          source: e,
        }
      }
    })?;

    decode_manifest(key, value)
  }

  /// Fetch the manifest, or return a blank one if none is stored yet.
  ///
  /// The blank manifest is not persisted; the store is only written once a
  /// subsequent update commits.
  pub async fn fetch_or_create(&self, key: &str) -> Result<Manifest, DeployError> {
    match self.fetch(key).await {
      Ok(manifest) => Ok(manifest),
      Err(DeployError::ManifestNotFound { .. }) => {
        debug!(key, "manifest not found, starting from blank");
        Ok(Manifest::blank())
      }
      Err(e) => Err(e),
    }
  }

  /// Replace the manifest stored under `key`, last-writer-wins.
  pub async fn persist(&self, key: &str, manifest: &Manifest) -> Result<(), DeployError> {
    let value = encode_manifest(key, manifest)?;
    self
      .store
      .upsert(key, &value)
      .await
      .map_err(|e| DeployError::ManifestPersist {
        key: key.to_string(),
        source: e,
      })
  }

  /// Begin an update with lazy-create semantics: an absent manifest starts
  /// blank.
  pub async fn begin_update(&self, key: &str) -> Result<ManifestUpdate<'_>, DeployError> {
    let manifest = self.fetch_or_create(key).await?;
    Ok(ManifestUpdate {
      repository: self,
      key: key.to_string(),
      manifest,
    })
  }

  /// Begin an update that requires the manifest to exist, failing with
  /// [`DeployError::ManifestNotFound`] otherwise.
  pub async fn begin_update_strict(&self, key: &str) -> Result<ManifestUpdate<'_>, DeployError> {
    let manifest = self.fetch(key).await?;
    Ok(ManifestUpdate {
      repository: self,
      key: key.to_string(),
      manifest,
    })
  }
}

/// An in-flight manifest update.
///
/// Holds the manifest read from the store together with the key it belongs
/// to, so mutation and persistence cannot drift apart. Mutations apply in
/// memory; [`commit`](Self::commit) writes the whole document back.
pub struct ManifestUpdate<'a> {
  repository: &'a ManifestRepository,
  key: String,
  manifest: Manifest,
}

impl std::fmt::Debug for ManifestUpdate<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ManifestUpdate")
      .field("key", &self.key)
      .field("manifest", &self.manifest)
      .finish_non_exhaustive()
  }
}

impl ManifestUpdate<'_> {
  /// The manifest as read (plus any mutations applied through this handle).
  pub fn manifest(&self) -> &Manifest {
    &self.manifest
  }

  /// Record a revision as the most recent upload, pruning history beyond
  /// the retention cap.
  pub fn record_revision(&mut self, revision: &str) {
    self.manifest.record_revision(revision);
  }

  /// Point `current` at the given revision.
  pub fn set_current(&mut self, revision: &str) {
    self.manifest.set_current(revision);
  }

  /// Persist the mutated manifest.
  pub async fn commit(self) -> Result<(), DeployError> {
    self.repository.persist(&self.key, &self.manifest).await
  }
}

fn encode_manifest(key: &str, manifest: &Manifest) -> Result<Value, DeployError> {
  serde_json::to_value(manifest).map_err(|e| DeployError::ManifestPersist {
    key: key.to_string(),
    source: StoreError::Decode {
      key: key.to_string(),
      message: e.to_string(),
    },
  })
}

fn decode_manifest(key: &str, value: Value) -> Result<Manifest, DeployError> {
  serde_json::from_value(value).map_err(|e| DeployError::ManifestFetch {
    key: key.to_string(),
    source: StoreError::Decode {
      key: key.to_string(),
      message: e.to_string(),
    },
  })
}
