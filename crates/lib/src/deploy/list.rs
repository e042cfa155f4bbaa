//! Revision listing.

use crate::error::DeployError;
use crate::manifest::{ManifestRepository, RevisionStatus};

/// The known revisions of a deploy target, most-recent-first, each flagged
/// active if it matches the current pointer.
///
/// Fails soft on a missing manifest: a target that was never deployed lists
/// as empty rather than erroring. Never mutates the manifest.
pub async fn list_revisions(
  repository: &ManifestRepository,
  manifest_key: &str,
) -> Result<Vec<RevisionStatus>, DeployError> {
  match repository.fetch(manifest_key).await {
    Ok(manifest) => Ok(manifest.statuses()),
    Err(DeployError::ManifestNotFound { .. }) => Ok(Vec::new()),
    Err(e) => Err(e),
  }
}
