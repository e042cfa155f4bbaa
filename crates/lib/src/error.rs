//! Operation-level error type.
//!
//! Every deploy operation fails with exactly one [`DeployError`] kind, each
//! carrying the identifier it concerns and the underlying store or I/O error
//! as its source. Two conversions are deliberately NOT errors: a missing
//! manifest during upload becomes a blank manifest, and re-uploading a
//! listed revision completes as a no-op.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum DeployError {
  /// The manifest document does not exist. Fatal for activation; the upload
  /// path converts this into a blank manifest instead.
  #[error("manifest not found: {key}")]
  ManifestNotFound { key: String },

  /// The local artifact file is missing or unreadable.
  #[error("failed to read artifact {path}: {source}")]
  ArtifactRead {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Storing the revision artifact document failed. Includes the case where
  /// the key already holds a document that the manifest never listed.
  #[error("failed to upload revision {revision}: {source}")]
  Upload {
    revision: String,
    #[source]
    source: StoreError,
  },

  /// Writing the updated manifest failed. When this follows a successful
  /// artifact insert, the artifact is durably stored but unlisted.
  #[error("failed to persist manifest {key}: {source}")]
  ManifestPersist {
    key: String,
    #[source]
    source: StoreError,
  },

  /// Writing the manifest with its new current pointer failed.
  #[error("failed to activate revision {revision}: {source}")]
  Activation {
    revision: String,
    #[source]
    source: StoreError,
  },

  /// Reading or decoding the manifest failed for a reason other than
  /// absence.
  #[error("failed to fetch manifest {key}: {source}")]
  ManifestFetch {
    key: String,
    #[source]
    source: StoreError,
  },

  #[error(transparent)]
  Config(#[from] ConfigError),
}
