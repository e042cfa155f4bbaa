use std::path::Path;

use anyhow::Result;
use drydock_lib::deploy::activate_revision;
use tracing::debug;

use super::{connect, load_config};
use crate::output::{print_error, print_info, print_success};

pub async fn cmd_activate(config_path: &Path, revision: &str) -> Result<()> {
  let config = load_config(config_path);
  debug!(%revision, key = %config.manifest_key(), "activating");

  let (_store, repository) = connect(&config);

  match activate_revision(&repository, &config.manifest_key(), revision).await {
    Ok(activated) => {
      print_success(&format!("Activated revision `{}`", activated));
      print_info("Run `drydock list` to see what revision is current");
      Ok(())
    }
    Err(e) => {
      print_error(&format!("Activation failed for revision `{}`: {}", revision, e));
      print_info("Check your document store settings");
      std::process::exit(1);
    }
  }
}
