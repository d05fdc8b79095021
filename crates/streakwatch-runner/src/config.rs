use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scrapable::Target;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Couldn't parse {path} got: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Targets to check, keyed by scraper name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetsConfig(BTreeMap<String, Vec<Target>>);

impl TargetsConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs_err::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Like [`load`](Self::load) but an unreadable file yields no targets.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("Config file not found at {}", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config: {e}");
                Self::default()
            }
        }
    }

    pub fn targets_for(&self, scraper: &str) -> Vec<Target> {
        self.0.get(scraper).cloned().unwrap_or_default()
    }

    pub fn insert(&mut self, scraper: impl Into<String>, targets: Vec<Target>) {
        self.0.insert(scraper.into(), targets);
    }
}

/// Appends a command line target unless the username is already configured.
pub fn with_adhoc(mut targets: Vec<Target>, username: Option<&str>) -> Vec<Target> {
    if let Some(username) = username {
        if targets.iter().any(|t| t.username == username) {
            log::warn!("Target {username} already configured, ignoring command line duplicate");
        } else {
            targets.push(Target::adhoc(username));
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_users_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "duolingo": [
                    {{"username": "pepsi", "lastStreak": 773, "lastStreakDate": "2024-01-01"}},
                    {{"username": "cola"}}
                ],
                "other": []
            }}"#
        )
        .unwrap();

        let config = TargetsConfig::load(file.path()).unwrap();
        let targets = config.targets_for("duolingo");

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].username, "pepsi");
        assert_eq!(targets[0].last_streak, 773);
        assert_eq!(targets[1], Target::adhoc("cola"));
        assert!(config.targets_for("other").is_empty());
        assert!(config.targets_for("missing").is_empty());
    }

    #[test]
    fn parse_error_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = TargetsConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn broken_or_missing_file_degrades_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"duolingo": "nope"}}"#).unwrap();
        assert_eq!(TargetsConfig::load_or_default(file.path()), TargetsConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("users.json");
        assert_eq!(TargetsConfig::load_or_default(missing), TargetsConfig::default());
    }

    #[test]
    fn adhoc_target_is_appended_once() {
        let configured = vec![Target::adhoc("pepsi")];

        let targets = with_adhoc(configured.clone(), Some("cola"));
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].last_streak, 0);

        let targets = with_adhoc(configured.clone(), Some("pepsi"));
        assert_eq!(targets, configured);

        assert_eq!(with_adhoc(configured.clone(), None), configured);
    }
}
