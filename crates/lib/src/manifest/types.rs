//! Manifest and artifact document types.
//!
//! One manifest document exists per deploy target, stored as JSON under the
//! key `<project>:<file_pattern>:manifest`:
//!
//! ```json
//! {
//!   "revisions": ["deadbeef", "cafebabe"],
//!   "current": "cafebabe"
//! }
//! ```
//!
//! `revisions` is most-recent-first and capped at [`RETENTION_CAP`] entries.
//! `current` is the active revision identifier, or empty before the first
//! activation.

use serde::{Deserialize, Serialize};

use crate::consts::RETENTION_CAP;

/// The manifest document for one deploy target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  /// Known revision identifiers, most-recent-first.
  pub revisions: Vec<String>,
  /// The active revision identifier, empty if none has been activated.
  pub current: String,
}

impl Manifest {
  /// A manifest with no revisions and no active pointer, the state a deploy
  /// target is in before its first upload.
  pub fn blank() -> Self {
    Self::default()
  }

  /// Whether `revision` is listed in the revision history.
  pub fn is_listed(&self, revision: &str) -> bool {
    self.revisions.iter().any(|r| r == revision)
  }

  /// Record `revision` as the most recent upload and prune history beyond
  /// the retention cap. Recording an already-listed revision is a no-op so
  /// the list never holds duplicates.
  pub fn record_revision(&mut self, revision: &str) {
    if self.is_listed(revision) {
      return;
    }
    self.revisions.insert(0, revision.to_string());
    self.revisions.truncate(RETENTION_CAP);
  }

  /// Mark `revision` as active. No membership check: activation trusts the
  /// caller, and upstream tooling is expected to offer only listed
  /// revisions.
  pub fn set_current(&mut self, revision: &str) {
    self.current = revision.to_string();
  }

  /// Derived listing view: every known revision, flagged active if it
  /// matches the current pointer.
  pub fn statuses(&self) -> Vec<RevisionStatus> {
    self
      .revisions
      .iter()
      .map(|revision| RevisionStatus {
        revision: revision.clone(),
        active: !self.current.is_empty() && *revision == self.current,
      })
      .collect()
  }
}

/// One entry of the revision listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevisionStatus {
  pub revision: String,
  pub active: bool,
}

/// The uploaded artifact document, stored under the revision identifier.
///
/// Immutable once written: an existing revision is never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionArtifact {
  /// Full text of the deployed artifact, e.g. an HTML entry point.
  pub content: String,
}
