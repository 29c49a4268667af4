/// Configuration for the profile subsystem
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Profile subsystem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Repository root; the canonical profile lives at `<repo>/root/profile`
    pub repo_path: PathBuf,
    /// SQLite database holding pointer-record cache entries
    pub datastore_db: PathBuf,
    /// Lifetime granted to a pointer record on every stamp, in seconds
    pub pointer_lifetime_secs: i64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from("./data"),
            datastore_db: PathBuf::from("./data/datastore.db"),
            // one week
            pointer_lifetime_secs: 7 * 24 * 60 * 60,
        }
    }
}

impl ProfileConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            repo_path: env::var("AGORA_REPO_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.repo_path),
            datastore_db: env::var("AGORA_DATASTORE_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.datastore_db),
            pointer_lifetime_secs: env::var("AGORA_POINTER_LIFETIME_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.pointer_lifetime_secs),
        }
    }

    /// Path of the canonical local profile document
    pub fn profile_path(&self) -> PathBuf {
        self.repo_path.join("root").join("profile")
    }

    /// Pointer-record lifetime as a duration
    pub fn pointer_lifetime(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.pointer_lifetime_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetime_is_one_week() {
        let config = ProfileConfig::default();
        assert_eq!(config.pointer_lifetime(), chrono::Duration::days(7));
    }

    #[test]
    fn test_profile_path_layout() {
        let config = ProfileConfig {
            repo_path: PathBuf::from("/srv/agora"),
            ..Default::default()
        };
        assert_eq!(config.profile_path(), PathBuf::from("/srv/agora/root/profile"));
    }
}
