//! Manifest document types and persistence.
//!
//! A manifest tracks the uploaded revisions of one deploy target and which
//! of them is currently active.

mod repository;
mod types;

pub use repository::{ManifestRepository, ManifestUpdate};
pub use types::{Manifest, RevisionArtifact, RevisionStatus};
