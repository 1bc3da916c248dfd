//! Settings store.
//!
//! Settings are a single JSON object stored under one namespace key in a
//! simple string-to-string mapping. [`JsonFileBackend`] keeps that mapping in
//! a JSON file on disk; [`MemoryBackend`] keeps it in memory for tests.
//!
//! Loading never fails: a missing or unreadable value yields empty settings.
//! Saving merges a [`SettingsPatch`] into the current settings and persists
//! the whole object.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::error::{GardenError, Result};

/// Namespace key the settings object is stored under.
pub const SETTINGS_KEY: &str = "garden-tracker-settings";

/// User settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
}

/// A partial update to [`Settings`].
///
/// The outer `Option` says whether a field is touched at all; `Some(None)`
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub openai_api_key: Option<Option<String>>,
}

impl SettingsPatch {
    fn apply(self, settings: &mut Settings) {
        if let Some(key) = self.openai_api_key {
            settings.openai_api_key = key;
        }
    }
}

/// Persistent string-to-string mapping the settings object lives in.
pub trait KeyValueBackend: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory mapping.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing serialization.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Mapping persisted as a JSON object in a file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(GardenError::FileSystem {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Writes a sibling temp file and renames it over the settings file, so
    /// a reader sees either the old contents or the new ones.
    fn write_atomic(&self, contents: &str) -> Result<()> {
        let tmp = self.temp_path();
        fs::write(&tmp, contents).map_err(|e| GardenError::FileSystem {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| GardenError::FileSystem {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map().unwrap_or_else(|e| {
            error!("Discarding unreadable settings file {}: {e}", self.path.display());
            BTreeMap::new()
        });
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GardenError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let contents = serde_json::to_string_pretty(&map)?;
        self.write_atomic(&contents)
    }
}

/// Loads, merges and persists [`Settings`].
pub struct SettingsStore {
    backend: Box<dyn KeyValueBackend>,
    settings: Settings,
}

impl SettingsStore {
    /// Wraps `backend` and loads whatever it holds.
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        let mut store = Self {
            backend: Box::new(backend),
            settings: Settings::default(),
        };
        store.load();
        store
    }

    /// Opens the settings file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileBackend::new(path))
    }

    /// Opens `$XDG_CONFIG_HOME/garden/settings.json`.
    pub fn open_default() -> Result<Self> {
        let path = xdg::BaseDirectories::with_prefix("garden")
            .place_config_file("settings.json")
            .map_err(|e| GardenError::XdgDirectory(e.to_string()))?;
        Ok(Self::open(path))
    }

    /// Re-reads settings from the backend. Absent or corrupt values reset to
    /// empty settings.
    pub fn load(&mut self) {
        self.settings = match self.backend.get(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                error!("Failed to parse settings: {e}");
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(e) => {
                error!("Failed to read settings: {e}");
                Settings::default()
            }
        };
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Merges `patch` into the current settings and persists the result.
    pub fn save(&mut self, patch: SettingsPatch) -> Result<()> {
        patch.apply(&mut self.settings);
        let raw = serde_json::to_string(&self.settings)?;
        self.backend.set(SETTINGS_KEY, &raw)?;
        debug!("Saved settings");
        Ok(())
    }

    pub fn get_api_key(&self) -> Option<&str> {
        self.settings.openai_api_key.as_deref()
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) -> Result<()> {
        self.save(SettingsPatch {
            openai_api_key: Some(Some(key.into())),
        })
    }

    pub fn clear_api_key(&mut self) -> Result<()> {
        self.save(SettingsPatch {
            openai_api_key: Some(None),
        })
    }

    /// Whether an API key is set and not blank.
    pub fn has_api_key(&self) -> bool {
        self.get_api_key().is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_empty_backend_loads_empty_settings() {
        let store = SettingsStore::new(MemoryBackend::new());
        assert_eq!(store.settings(), &Settings::default());
        assert!(!store.has_api_key());
    }

    #[test]
    fn test_corrupt_value_resets_to_empty() {
        let backend = MemoryBackend::new().with_value(SETTINGS_KEY, "{not json");
        let store = SettingsStore::new(backend);
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_api_key_lifecycle() {
        let mut store = SettingsStore::new(MemoryBackend::new());

        store.set_api_key("sk-test").unwrap();
        assert_eq!(store.get_api_key(), Some("sk-test"));
        assert!(store.has_api_key());

        store.clear_api_key().unwrap();
        assert_eq!(store.get_api_key(), None);
        assert!(!store.has_api_key());
    }

    #[test]
    fn test_blank_key_is_not_a_key() {
        let mut store = SettingsStore::new(MemoryBackend::new());
        store.set_api_key("   ").unwrap();
        assert_eq!(store.get_api_key(), Some("   "));
        assert!(!store.has_api_key());
    }

    #[test]
    fn test_empty_patch_keeps_fields() {
        let mut store = SettingsStore::new(MemoryBackend::new());
        store.set_api_key("sk-1").unwrap();
        store.save(SettingsPatch::default()).unwrap();
        assert_eq!(store.get_api_key(), Some("sk-1"));
    }

    #[test]
    fn test_serialized_field_name() {
        let settings = Settings {
            openai_api_key: Some("k".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&settings).unwrap(),
            r#"{"openaiApiKey":"k"}"#
        );
        assert_eq!(serde_json::to_string(&Settings::default()).unwrap(), "{}");
    }

    #[test]
    fn test_file_backend_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config").join("settings.json");

        let mut store = SettingsStore::open(&path);
        store.set_api_key("sk-file").unwrap();

        let reopened = SettingsStore::open(&path);
        assert_eq!(reopened.get_api_key(), Some("sk-file"));

        let raw = fs::read_to_string(&path).unwrap();
        let map: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert!(map.contains_key(SETTINGS_KEY));
    }

    #[test]
    fn test_file_backend_corrupt_value_resets() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"garden-tracker-settings":"{oops"}"#).unwrap();

        let mut store = SettingsStore::open(&path);
        assert_eq!(store.settings(), &Settings::default());

        store.set_api_key("sk-new").unwrap();
        assert_eq!(SettingsStore::open(&path).get_api_key(), Some("sk-new"));
    }

    #[test]
    fn test_file_backend_unreadable_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "garbage").unwrap();

        let mut store = SettingsStore::open(&path);
        assert!(!store.has_api_key());
        store.set_api_key("sk-2").unwrap();
        assert_eq!(SettingsStore::open(&path).get_api_key(), Some("sk-2"));
    }

    #[test]
    fn test_file_backend_writes_through_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let tmp = dir.path().join("settings.json.tmp");

        let mut store = SettingsStore::open(&path);
        store.set_api_key("sk-old").unwrap();

        // Leftover from an interrupted save.
        fs::write(&tmp, "{\"garden-tracker-").unwrap();
        assert_eq!(SettingsStore::open(&path).get_api_key(), Some("sk-old"));

        store.set_api_key("sk-new").unwrap();
        assert!(!tmp.exists());
        assert_eq!(SettingsStore::open(&path).get_api_key(), Some("sk-new"));
    }
}
