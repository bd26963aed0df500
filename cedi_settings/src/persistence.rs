//! Settings persistence layer
//!
//! Overrides are stored as versioned JSON. Loading is safe against corruption:
//! a damaged or foreign file yields no overrides rather than an error.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{SettingKey, SettingValue, SettingsRegistry};

/// Serializable container for settings overrides
/// Uses BTreeMap for stable ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverridesData {
    /// Version of the settings format (for future migrations)
    pub version: u32,
    pub overrides: BTreeMap<String, SettingValue>,
}

impl SettingsOverridesData {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            overrides: BTreeMap::new(),
        }
    }

    pub fn from_registry(registry: &SettingsRegistry) -> Self {
        let mut data = Self::new();
        for (key, value) in registry.export_overrides() {
            data.overrides.insert(key.as_str().to_string(), value);
        }
        data
    }

    pub fn to_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides
            .iter()
            .map(|(key, value)| (SettingKey::new(key.as_str()), value.clone()))
            .collect()
    }
}

impl Default for SettingsOverridesData {
    fn default() -> Self {
        Self::new()
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(#[source] serde_json::Error),

    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(#[source] serde_json::Error),

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    #[error("Settings file I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Serializes settings overrides to JSON bytes
pub fn serialize_overrides(data: &SettingsOverridesData) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec_pretty(data).map_err(PersistenceError::SerializationFailed)
}

/// Deserializes settings overrides from JSON bytes
pub fn deserialize_overrides(bytes: &[u8]) -> PersistenceResult<SettingsOverridesData> {
    let data: SettingsOverridesData =
        serde_json::from_slice(bytes).map_err(PersistenceError::DeserializationFailed)?;

    if data.version != SettingsOverridesData::CURRENT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(data.version));
    }

    Ok(data)
}

/// Attempts to load settings from bytes, falling back to no overrides on error
pub fn load_overrides_safe(bytes: &[u8]) -> SettingsOverridesData {
    deserialize_overrides(bytes).unwrap_or_default()
}

/// Read overrides from a file; a missing file means no overrides
pub fn load_overrides_file(path: &Path) -> PersistenceResult<SettingsOverridesData> {
    match fs::read(path) {
        Ok(bytes) => deserialize_overrides(&bytes),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(SettingsOverridesData::new()),
        Err(err) => Err(err.into()),
    }
}

pub fn save_overrides_file(path: &Path, data: &SettingsOverridesData) -> PersistenceResult<()> {
    let bytes = serialize_overrides(data)?;
    fs::write(path, bytes)?;
    Ok(())
}
