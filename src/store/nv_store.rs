use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::store::schema::OptionsData;
use crate::store::setting::{BUILTIN_SETTINGS, Setting};
use crate::store::{SettingsStore, StoreError};

/// Options block backed by a JSON file.
///
/// Writes are staged in memory; nothing reaches the disk until
/// [`SettingsStore::persist_all`].
pub struct NvStore {
    path: PathBuf,
    settings: Vec<Setting>,
    values: BTreeMap<String, String>,
}

impl NvStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_with(path, BUILTIN_SETTINGS.to_vec())
    }

    pub fn open_with(path: impl Into<PathBuf>, settings: Vec<Setting>) -> Result<Self, StoreError> {
        if settings.is_empty() {
            return Err(StoreError::NoSettings);
        }
        let path = path.into();
        let data = Self::load(&path);
        Ok(Self {
            path,
            settings,
            values: data.values,
        })
    }

    /// Missing, unreadable or stale files open as an empty block.
    fn load(path: &Path) -> OptionsData {
        if !path.exists() {
            return OptionsData::default();
        }
        let parsed = fs::read_to_string(path)
            .map_err(StoreError::from)
            .and_then(|content| Ok(serde_json::from_str::<OptionsData>(&content)?));
        match parsed {
            Ok(data) if !data.needs_reset() => data,
            Ok(data) => {
                tracing::warn!(
                    "Ignoring {} with schema version {}",
                    path.display(),
                    data.schema_version
                );
                OptionsData::default()
            }
            Err(err) => {
                tracing::warn!("Could not load {}: {}", path.display(), err);
                OptionsData::default()
            }
        }
    }

    fn registered(&self, setting: &Setting) -> Result<(), StoreError> {
        if self.settings.iter().any(|s| s.name == setting.name) {
            Ok(())
        } else {
            Err(StoreError::Unknown(setting.name.to_string()))
        }
    }
}

impl SettingsStore for NvStore {
    fn settings(&self) -> &[Setting] {
        &self.settings
    }

    fn read(&self, setting: &Setting) -> Result<String, StoreError> {
        self.registered(setting)?;
        self.values
            .get(setting.name)
            .cloned()
            .ok_or(StoreError::NotSet)
    }

    fn write(&mut self, setting: &Setting, value: &str) -> Result<(), StoreError> {
        self.registered(setting)?;
        if value.is_empty() {
            self.values.remove(setting.name);
            return Ok(());
        }
        let stored = setting.kind.canonicalize(value)?;
        self.values.insert(setting.name.to_string(), stored);
        Ok(())
    }

    fn persist_all(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = OptionsData {
            saved_at: Some(Utc::now()),
            values: self.values.clone(),
            ..OptionsData::default()
        };
        let json = serde_json::to_string_pretty(&data)?;

        let tmp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::info!("Saved {} options to {}", self.values.len(), self.path.display());
        Ok(())
    }
}
