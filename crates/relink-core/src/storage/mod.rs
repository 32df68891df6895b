//! Key/value settings storage and the `Persistable` capability.
//!
//! A [`SettingsStorage`] is an ordered tree of named values. Components save
//! themselves into a fresh storage and load from one, nesting child storages
//! for their children. The tree serializes with serde, so the same layout
//! is written to TOML or JSON files by [`crate::config`].

mod span;
mod value;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

pub use span::Span;
pub use value::{FromSetting, SettingValue};

/// Capability of types that can be written to and restored from settings.
pub trait Persistable {
    /// Restore state from `storage`.
    fn load(&mut self, storage: &SettingsStorage) -> Result<(), PolicyError>;

    /// Serialize state into a new storage.
    fn save(&self) -> SettingsStorage;
}

/// Ordered key/value tree used as the persistence unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsStorage {
    entries: BTreeMap<String, SettingValue>,
}

impl SettingsStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set_value(&mut self, key: &str, value: impl Into<SettingValue>) -> &mut Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    /// Read and convert the value under `key`.
    ///
    /// Fails with `MissingField` if the key is absent and `TypeMismatch` if
    /// it holds a different kind of value.
    pub fn get_value<T: FromSetting>(&self, key: &str) -> Result<T, PolicyError> {
        let value = self.entries.get(key).ok_or_else(|| PolicyError::missing(key))?;
        T::from_setting(key, value)
    }

    /// Like [`get_value`](Self::get_value), but an absent key yields `None`.
    pub fn try_get_value<T: FromSetting>(&self, key: &str) -> Result<Option<T>, PolicyError> {
        self.entries
            .get(key)
            .map(|value| T::from_setting(key, value))
            .transpose()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.entries.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
