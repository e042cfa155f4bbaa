//! Revision upload.
//!
//! One logical unit of work: read the artifact, check the manifest for the
//! revision, store the artifact document, record the revision (pruning old
//! entries), persist the manifest. Each step is a distinct failure point;
//! a persist failure after a successful artifact insert leaves the artifact
//! stored but unlisted (see [`DeployError::ManifestPersist`]).

use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use crate::error::DeployError;
use crate::manifest::{ManifestRepository, RevisionArtifact};
use crate::store::{DocumentStore, StoreError};

/// What an upload did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
  /// The artifact was stored and the manifest updated.
  Uploaded,
  /// The revision was already listed; nothing was written.
  AlreadyUploaded,
}

/// Upload the artifact at `artifact_path` as `revision`.
///
/// Idempotent against the manifest: a revision already listed completes as
/// [`UploadOutcome::AlreadyUploaded`] without touching the store. The check
/// is a membership test on the manifest's revision list only; it does not
/// verify that the artifact document itself still exists.
pub async fn upload_revision(
  store: &dyn DocumentStore,
  repository: &ManifestRepository,
  artifact_path: &Path,
  manifest_key: &str,
  revision: &str,
) -> Result<UploadOutcome, DeployError> {
  let content = fs::read_to_string(artifact_path).await.map_err(|e| DeployError::ArtifactRead {
    path: artifact_path.to_path_buf(),
    source: e,
  })?;

  let mut update = repository.begin_update(manifest_key).await?;

  if update.manifest().is_listed(revision) {
    debug!(revision, key = manifest_key, "revision already listed, skipping upload");
    return Ok(UploadOutcome::AlreadyUploaded);
  }

  let artifact = RevisionArtifact { content };
  let value = serde_json::to_value(&artifact).map_err(|e| DeployError::Upload {
    revision: revision.to_string(),
    source: StoreError::Decode {
      key: revision.to_string(),
      message: e.to_string(),
    },
  })?;

  store.insert(revision, &value).await.map_err(|e| DeployError::Upload {
    revision: revision.to_string(),
    source: e,
  })?;

  update.record_revision(revision);
  update.commit().await?;

  info!(revision, key = manifest_key, "revision uploaded");
  Ok(UploadOutcome::Uploaded)
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;
  use std::sync::Arc;

  use super::*;
  use crate::store::MemoryStore;

  const KEY: &str = "my-app:index.html:manifest";

  fn write_artifact(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("index.html");
    std::fs::write(&path, content).unwrap();
    path
  }

  #[tokio::test]
  async fn upload_stores_artifact_and_updates_manifest() {
    let store = MemoryStore::new();
    let repo = ManifestRepository::new(Arc::new(store.clone()));
    let temp = tempfile::TempDir::new().unwrap();
    let artifact = write_artifact(&temp, "<html>v1</html>");

    let outcome = upload_revision(&store, &repo, &artifact, KEY, "v1").await.unwrap();

    assert_eq!(outcome, UploadOutcome::Uploaded);
    assert_eq!(
      store.get("v1").await.unwrap(),
      serde_json::json!({"content": "<html>v1</html>"})
    );
    let manifest = repo.fetch(KEY).await.unwrap();
    assert_eq!(manifest.revisions, vec!["v1"]);
    assert_eq!(manifest.current, "");
  }

  #[tokio::test]
  async fn second_upload_of_same_revision_is_a_noop() {
    let store = MemoryStore::new();
    let repo = ManifestRepository::new(Arc::new(store.clone()));
    let temp = tempfile::TempDir::new().unwrap();
    let artifact = write_artifact(&temp, "<html>v1</html>");

    upload_revision(&store, &repo, &artifact, KEY, "v1").await.unwrap();
    let outcome = upload_revision(&store, &repo, &artifact, KEY, "v1").await.unwrap();

    assert_eq!(outcome, UploadOutcome::AlreadyUploaded);
    let manifest = repo.fetch(KEY).await.unwrap();
    assert_eq!(manifest.revisions, vec!["v1"]);
    // Manifest plus one artifact document, nothing duplicated
    assert_eq!(store.len().await, 2);
  }

  #[tokio::test]
  async fn missing_artifact_fails_before_any_store_io() {
    let store = MemoryStore::new();
    let repo = ManifestRepository::new(Arc::new(store.clone()));

    let err = upload_revision(&store, &repo, Path::new("/nonexistent/index.html"), KEY, "v1")
      .await
      .unwrap_err();

    assert!(matches!(err, DeployError::ArtifactRead { .. }));
    assert!(store.is_empty().await);
  }
}
