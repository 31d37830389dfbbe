use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// On-disk layout of the options file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptionsData {
    pub schema_version: u32,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl Default for OptionsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            saved_at: None,
            values: BTreeMap::new(),
        }
    }
}

impl OptionsData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
