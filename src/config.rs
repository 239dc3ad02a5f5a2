//! Where the store lives.

use std::env;
use std::path::PathBuf;

/// Environment variable naming the backing file.
pub const PATH_VAR: &str = "TASKFILE_PATH";

/// Backing file used when nothing else is configured.
pub const DEFAULT_PATH: &str = "data/database.json";

/// Store configuration. The backing path is the only option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// JSON file holding every task.
    pub path: PathBuf,
}

impl StoreConfig {
    /// Uses an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads `TASKFILE_PATH`, after loading a `.env` file if one exists,
    /// falling back to [`DEFAULT_PATH`].
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = lookup(PATH_VAR)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_PATH), PathBuf::from);
        Self { path }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_path_from_environment() {
        let config = StoreConfig::from_lookup(|key| {
            (key == PATH_VAR).then(|| "/srv/tasks.json".to_string())
        });
        assert_eq!(config.path, PathBuf::from("/srv/tasks.json"));
    }

    #[test]
    fn falls_back_to_default_when_unset_or_blank() {
        assert_eq!(StoreConfig::from_lookup(|_| None), StoreConfig::default());
        assert_eq!(StoreConfig::from_lookup(|_| Some("  ".into())), StoreConfig::default());
    }
}
