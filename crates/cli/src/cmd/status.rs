use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::load_config;
use crate::output::{OutputFormat, print_info, print_json, print_stat};

/// Show the resolved configuration for the current project. Works offline:
/// nothing here touches the store.
pub fn cmd_status(config_path: &Path, output: OutputFormat) -> Result<()> {
  let config = load_config(config_path);

  let store_url = format!("http://{}:{}/{}", config.host, config.port, config.bucket);
  let artifact_path = config.artifact_path();
  let artifact_present = artifact_path.exists();

  if output.is_json() {
    #[derive(Serialize)]
    struct StatusOutput {
      project: String,
      store_url: String,
      manifest_key: String,
      artifact_path: String,
      artifact_present: bool,
      default_revision: Option<String>,
    }

    print_json(&StatusOutput {
      project: config.project.clone(),
      store_url,
      manifest_key: config.manifest_key(),
      artifact_path: artifact_path.display().to_string(),
      artifact_present,
      default_revision: config.revision.clone(),
    })?;
  } else {
    print_info(&format!("drydock v{}", env!("CARGO_PKG_VERSION")));
    println!();
    print_stat("Project", &config.project);
    print_stat("Store", &store_url);
    print_stat("Manifest key", &config.manifest_key());

    let artifact_note = if artifact_present { "" } else { " (missing)" };
    print_stat("Artifact", &format!("{}{}", artifact_path.display(), artifact_note));

    if let Some(revision) = &config.revision {
      print_stat("Default revision", revision);
    }
  }

  Ok(())
}
