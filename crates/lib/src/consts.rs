//! Fixed constants shared across the crate.

/// Maximum number of revision identifiers retained in a manifest.
///
/// Older entries are discarded on each update; their artifact documents stay
/// in the store unreferenced.
pub const RETENTION_CAP: usize = 10;

/// Suffix of every manifest document key (`<project>:<file_pattern>:manifest`).
pub const MANIFEST_KEY_SUFFIX: &str = "manifest";

/// Default artifact file name within the dist directory.
pub const DEFAULT_FILE_PATTERN: &str = "index.html";

/// Default directory the build pipeline writes artifacts to.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Default document store port.
pub const DEFAULT_PORT: u16 = 8091;

/// Default project configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "drydock.toml";
