//! Revision activation.
//!
//! Independent of upload: fetch the manifest, point `current` at the given
//! revision, persist. The revision is not checked against the revision
//! list — activation trusts the caller.

use tracing::info;

use crate::error::DeployError;
use crate::manifest::ManifestRepository;

/// Mark `revision` as the active one for the deploy target.
///
/// Fails with [`DeployError::ManifestNotFound`] if no manifest exists yet
/// (activation is only meaningful after at least one upload). Returns the
/// activated revision identifier.
pub async fn activate_revision(
  repository: &ManifestRepository,
  manifest_key: &str,
  revision: &str,
) -> Result<String, DeployError> {
  let mut update = repository.begin_update_strict(manifest_key).await?;
  update.set_current(revision);

  update.commit().await.map_err(|e| match e {
    DeployError::ManifestPersist { source, .. } => DeployError::Activation {
      revision: revision.to_string(),
      source,
    },
    other => other,
  })?;

  info!(revision, key = manifest_key, "revision activated");
  Ok(revision.to_string())
}
