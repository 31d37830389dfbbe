use std::collections::BTreeMap;

use crate::store::setting::{BUILTIN_SETTINGS, Setting};
use crate::store::{SettingsStore, StoreError};

/// Store that never touches the disk. Backs `--ephemeral` sessions.
pub struct MemoryStore {
    settings: Vec<Setting>,
    values: BTreeMap<&'static str, String>,
}

impl MemoryStore {
    pub fn new(settings: Vec<Setting>) -> Self {
        Self {
            settings,
            values: BTreeMap::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(BUILTIN_SETTINGS.to_vec())
    }
}

impl SettingsStore for MemoryStore {
    fn settings(&self) -> &[Setting] {
        &self.settings
    }

    fn read(&self, setting: &Setting) -> Result<String, StoreError> {
        self.values
            .get(setting.name)
            .cloned()
            .ok_or(StoreError::NotSet)
    }

    fn write(&mut self, setting: &Setting, value: &str) -> Result<(), StoreError> {
        if value.is_empty() {
            self.values.remove(setting.name);
        } else {
            let stored = setting.kind.canonicalize(value)?;
            self.values.insert(setting.name, stored);
        }
        Ok(())
    }

    fn persist_all(&mut self) -> Result<(), StoreError> {
        tracing::debug!("Ephemeral store: {} options discarded", self.values.len());
        Ok(())
    }
}
