use std::path::Path;

use anyhow::Result;
use drydock_lib::deploy::list_revisions;
use drydock_lib::manifest::RevisionStatus;
use serde::Serialize;

use super::{connect, load_config};
use crate::output::{OutputFormat, print_error, print_info, print_json};

pub async fn cmd_list(config_path: &Path, output: OutputFormat) -> Result<()> {
  let config = load_config(config_path);
  let (_store, repository) = connect(&config);

  let revisions = match list_revisions(&repository, &config.manifest_key()).await {
    Ok(revisions) => revisions,
    Err(e) => {
      print_error(&format!("Failed to list revisions: {}", e));
      std::process::exit(1);
    }
  };

  if output.is_json() {
    #[derive(Serialize)]
    struct ListOutput {
      revisions: Vec<RevisionStatus>,
    }

    print_json(&ListOutput { revisions })?;
  } else {
    if revisions.is_empty() {
      print_info("No revisions uploaded");
      return Ok(());
    }

    for status in &revisions {
      let marker = if status.active { " (active)" } else { "" };
      println!("{}{}", status.revision, marker);
    }

    print_info(&format!("{} revision(s) total", revisions.len()));
  }

  Ok(())
}
