pub mod error;
pub mod memory;
pub mod nv_store;
pub mod schema;
pub mod setting;

pub use error::StoreError;
pub use setting::{BUILTIN_SETTINGS, MAX_VALUE_LEN, Setting, SettingType};

/// Key/value backing for the console's settings.
pub trait SettingsStore {
    /// The fixed, ordered list of settings this store serves.
    fn settings(&self) -> &[Setting];

    fn describe(&self, setting: &Setting) -> String {
        format!(
            "{} ({}) - {}",
            setting.name,
            setting.kind.label(),
            setting.description
        )
    }

    fn read(&self, setting: &Setting) -> Result<String, StoreError>;

    fn write(&mut self, setting: &Setting, value: &str) -> Result<(), StoreError>;

    /// Write the whole collection to durable storage.
    fn persist_all(&mut self) -> Result<(), StoreError>;
}
