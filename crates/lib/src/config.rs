//! Deploy configuration.
//!
//! Configuration is read from a TOML project file (default
//! [`DEFAULT_CONFIG_FILE`](crate::consts::DEFAULT_CONFIG_FILE)) and resolved
//! once, before any store I/O, into a
//! [`DeployConfig`] with every default applied and every required field
//! checked. Derived values (manifest key, artifact path) are pure functions
//! of the resolved struct.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::consts::{DEFAULT_DIST_DIR, DEFAULT_FILE_PATTERN, DEFAULT_PORT, MANIFEST_KEY_SUFFIX};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config file not found: {path}")]
  NotFound { path: PathBuf },

  #[error("failed to read config {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("missing required config field `{0}`")]
  MissingField(&'static str),

  #[error("no revision given: pass one as an argument or set `revision` in the project config")]
  MissingRevision,
}

/// The raw project file, every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
  pub host: Option<String>,
  pub port: Option<u16>,
  pub bucket: Option<String>,
  pub project: Option<String>,
  pub file_pattern: Option<String>,
  pub dist_dir: Option<PathBuf>,
  pub revision: Option<String>,
}

/// Fully resolved configuration, validated once at startup.
#[derive(Debug, Clone)]
pub struct DeployConfig {
  /// Document store host. Required.
  pub host: String,
  /// Document store port.
  pub port: u16,
  /// Bucket holding the manifest and artifact documents. Required.
  pub bucket: String,
  /// Project name, the first component of the manifest key. Required.
  pub project: String,
  /// Artifact file name within the dist directory.
  pub file_pattern: String,
  /// Directory the build pipeline writes artifacts to.
  pub dist_dir: PathBuf,
  /// Default revision identifier, used when none is given explicitly.
  pub revision: Option<String>,
}

impl DeployConfig {
  /// Read and resolve the project file at `path`.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(ConfigError::NotFound { path: path.to_path_buf() });
      }
      Err(e) => {
        return Err(ConfigError::Read {
          path: path.to_path_buf(),
          source: e,
        });
      }
    };

    let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;

    Self::resolve(file)
  }

  /// Apply defaults and check required fields.
  pub fn resolve(file: ConfigFile) -> Result<Self, ConfigError> {
    Ok(Self {
      host: file.host.ok_or(ConfigError::MissingField("host"))?,
      port: file.port.unwrap_or(DEFAULT_PORT),
      bucket: file.bucket.ok_or(ConfigError::MissingField("bucket"))?,
      project: file.project.ok_or(ConfigError::MissingField("project"))?,
      file_pattern: file.file_pattern.unwrap_or_else(|| DEFAULT_FILE_PATTERN.to_string()),
      dist_dir: file.dist_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR)),
      revision: file.revision,
    })
  }

  /// The manifest document key for this deploy target.
  pub fn manifest_key(&self) -> String {
    manifest_key(&self.project, &self.file_pattern)
  }

  /// Path of the artifact the uploader reads.
  pub fn artifact_path(&self) -> PathBuf {
    self.dist_dir.join(&self.file_pattern)
  }

  /// The revision to operate on: an explicit identifier wins, then the
  /// configured default.
  pub fn resolve_revision(&self, explicit: Option<&str>) -> Result<String, ConfigError> {
    explicit
      .map(str::to_string)
      .or_else(|| self.revision.clone())
      .ok_or(ConfigError::MissingRevision)
  }
}

/// Manifest key derivation: `<project>:<file_pattern>:manifest`.
pub fn manifest_key(project: &str, file_pattern: &str) -> String {
  format!("{}:{}:{}", project, file_pattern, MANIFEST_KEY_SUFFIX)
}
