use std::path::Path;

use anyhow::Result;
use drydock_lib::DeployError;
use drydock_lib::deploy::{UploadOutcome, upload_revision};
use tracing::debug;

use super::{connect, load_config};
use crate::output::{print_error, print_info, print_success};

pub async fn cmd_deploy(config_path: &Path, revision: Option<&str>, artifact: Option<&Path>) -> Result<()> {
  let config = load_config(config_path);

  let revision = match config.resolve_revision(revision) {
    Ok(revision) => revision,
    Err(e) => {
      print_error(&e.to_string());
      std::process::exit(1);
    }
  };

  let artifact_path = artifact.map(Path::to_path_buf).unwrap_or_else(|| config.artifact_path());
  debug!(%revision, artifact = %artifact_path.display(), key = %config.manifest_key(), "deploying");

  let (store, repository) = connect(&config);

  match upload_revision(store.as_ref(), &repository, &artifact_path, &config.manifest_key(), &revision).await {
    Ok(UploadOutcome::Uploaded) => {
      print_success(&format!("Uploaded revision `{}`", revision));
      Ok(())
    }
    Ok(UploadOutcome::AlreadyUploaded) => {
      print_info(&format!("Revision `{}` is already uploaded, nothing to do", revision));
      Ok(())
    }
    Err(e) => {
      print_error(&format!("Failed to upload `{}`: {}", revision, e));
      if matches!(&e, DeployError::Upload { source, .. } if source.is_already_exists()) {
        print_info("Did you try to re-upload an existing revision? Run `drydock list` to investigate");
      }
      std::process::exit(1);
    }
  }
}
