//! Preference stores: a TOML file for real sessions, a map for everything else.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use feedhub_platform::{PreferenceStore, Result};
use tracing::{debug, info};

use crate::error::IoError;

const PREFERENCES_FILE: &str = "preferences.toml";

/// `preferences.toml` under the per-user config directory.
pub fn default_preferences_path() -> std::result::Result<PathBuf, IoError> {
    let dirs = ProjectDirs::from("org", "feedhub", "Feedback Hub").ok_or(IoError::NoConfigDir)?;
    Ok(dirs.config_dir().join(PREFERENCES_FILE))
}

/// Flat string table persisted as TOML. Read once on open, rewritten on every save.
#[derive(Debug)]
pub struct TomlPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl TomlPreferenceStore {
    pub fn open(path: impl Into<PathBuf>) -> std::result::Result<Self, IoError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(source) => toml::from_str(&source)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no preferences at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(err) => return Err(err.into()),
        };
        info!("preferences: {}", path.display());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> std::result::Result<(), IoError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string(&self.values)?)?;
        Ok(())
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()?;
        Ok(())
    }
}

/// Non-persistent store, used when no config directory is available.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferenceStore::open(dir.path().join("preferences.toml")).unwrap();
        assert_eq!(store.load("fh_theme").unwrap(), None);
    }

    #[test]
    fn saved_values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut store = TomlPreferenceStore::open(&path).unwrap();
        store.save("fh_theme", "dark").unwrap();
        drop(store);

        let reopened = TomlPreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.load("fh_theme").unwrap().as_deref(), Some("dark"));
        let on_disk = fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("fh_theme = \"dark\""));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "fh_theme = [unterminated").unwrap();
        assert!(matches!(TomlPreferenceStore::open(&path), Err(IoError::Parse(_))));
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryPreferenceStore::default();
        store.save("fh_theme", "light").unwrap();
        assert_eq!(store.load("fh_theme").unwrap().as_deref(), Some("light"));
        assert_eq!(store.load("other").unwrap(), None);
    }
}
