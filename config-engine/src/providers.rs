//! Configuration sources, lowest precedence first

use config::{Environment, File, FileFormat, FileSourceFile, Map};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "PLANTGUARD";
pub const ENV_SEPARATOR: &str = "__";

/// A configuration file; the format follows its extension (YAML, TOML, JSON)
pub fn file_source(path: &Path) -> File<FileSourceFile, FileFormat> {
    File::from(path).required(true)
}

/// `PLANTGUARD__SECTION__KEY` variables
///
/// `overrides` replaces the process environment, which keeps tests hermetic.
pub fn env_source(overrides: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
        .source(overrides)
}

/// Per-user data location for the credential database
pub fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("org", "plantguard", "plantguard")
        .map(|dirs| dirs.data_local_dir().join(credential_store::config::DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(credential_store::config::DEFAULT_DB_FILE))
}
