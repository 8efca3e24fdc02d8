//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank environment values count as unset.
//! - Missing log directory means file logging stays off.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "FITPROMPT_DB_PATH";
pub const LOG_DIR_ENV: &str = "FITPROMPT_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "FITPROMPT_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "fitprompt.sqlite3";

/// Paths and levels needed to boot the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_dir: None,
            log_level: default_log_level().to_string(),
        }
    }
}

impl CoreConfig {
    /// Reads `FITPROMPT_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
        }
    }
}

/// Default database location under the system temp directory.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{default_db_path, CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.db_path, default_db_path());
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "   "),
            (LOG_DIR_ENV, ""),
            (LOG_LEVEL_ENV, " "),
        ]));
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn values_are_trimmed_and_applied() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /tmp/fit.db "),
            (LOG_DIR_ENV, "/var/log/fitprompt"),
            (LOG_LEVEL_ENV, "warn"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/tmp/fit.db"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/fitprompt")));
        assert_eq!(config.log_level, "warn");
    }
}
