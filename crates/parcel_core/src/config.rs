//! Runtime configuration read from the environment.
//!
//! # Invariants
//! - The database location always resolves to a non-empty path.
//! - Logging stays disabled unless a log directory is configured.
//!
//! # See also
//! - `crate::logging::init_logging` for level and directory validation.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "PARCEL_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "PARCEL_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "PARCEL_LOG_DIR";
pub const DEFAULT_DB_PATH: &str = "tracker.db";

/// Settings needed to open the tracker database and start logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: PathBuf::from(read(DB_PATH_VAR).unwrap_or_else(|| DEFAULT_DB_PATH.into())),
            log_level: read(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_VAR),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::{TrackerConfig, DB_PATH_VAR, DEFAULT_DB_PATH, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = TrackerConfig::default();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn lookup_values_override_defaults_and_blanks_are_ignored() {
        let vars = HashMap::from([
            (DB_PATH_VAR, "/var/lib/parcels.db"),
            (LOG_LEVEL_VAR, "warn"),
            (LOG_DIR_VAR, "   "),
        ]);
        let config = TrackerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/var/lib/parcels.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }
}
