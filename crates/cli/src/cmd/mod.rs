use std::path::Path;
use std::sync::Arc;

use drydock_lib::DeployConfig;
use drydock_lib::manifest::ManifestRepository;
use drydock_lib::store::{DocumentStore, HttpStore};

use crate::output::print_error;

mod activate;
mod deploy;
mod list;
mod status;

pub use activate::cmd_activate;
pub use deploy::cmd_deploy;
pub use list::cmd_list;
pub use status::cmd_status;

/// Load and resolve the project config, exiting with an error message if it
/// is missing or invalid.
fn load_config(path: &Path) -> DeployConfig {
  match DeployConfig::load(path) {
    Ok(config) => config,
    Err(e) => {
      print_error(&e.to_string());
      std::process::exit(1);
    }
  }
}

/// Store client and manifest repository for the configured target.
fn connect(config: &DeployConfig) -> (Arc<dyn DocumentStore>, ManifestRepository) {
  let store: Arc<dyn DocumentStore> = Arc::new(HttpStore::new(&config.host, config.port, &config.bucket));
  let repository = ManifestRepository::new(store.clone());
  (store, repository)
}
