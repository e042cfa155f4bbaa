//! Deploy operations: upload, activate, list.
//!
//! Each operation is a single read-modify-write (or read-only view) against
//! the manifest of one deploy target. Operations are independent; activation
//! in particular never uploads and upload never activates.

mod activate;
mod list;
mod upload;

pub use activate::activate_revision;
pub use list::list_revisions;
pub use upload::{UploadOutcome, upload_revision};
