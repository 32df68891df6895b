//! Values held by a settings storage and typed conversion out of them.

use serde::{Deserialize, Serialize};

use super::{SettingsStorage, Span};
use crate::error::PolicyError;

/// One value in a [`SettingsStorage`].
///
/// Spans are stored as text (see [`Span`]) so the files stay editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<SettingValue>),
    Storage(SettingsStorage),
}

impl SettingValue {
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Int(_) => "integer",
            SettingValue::Text(_) => "text",
            SettingValue::List(_) => "list",
            SettingValue::Storage(_) => "storage",
        }
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Int(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        SettingValue::Int(i64::from(v))
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Text(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::Text(v)
    }
}

impl From<Span> for SettingValue {
    fn from(v: Span) -> Self {
        SettingValue::Text(v.to_string())
    }
}

impl From<SettingsStorage> for SettingValue {
    fn from(v: SettingsStorage) -> Self {
        SettingValue::Storage(v)
    }
}

impl<T: Into<SettingValue>> From<Vec<T>> for SettingValue {
    fn from(v: Vec<T>) -> Self {
        SettingValue::List(v.into_iter().map(Into::into).collect())
    }
}

/// Types that can be read back out of a [`SettingValue`].
pub trait FromSetting: Sized {
    /// Convert `value`, stored under `key`, into `Self`.
    fn from_setting(key: &str, value: &SettingValue) -> Result<Self, PolicyError>;
}

fn mismatch(key: &str, expected: &'static str, value: &SettingValue) -> PolicyError {
    PolicyError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: value.kind(),
    }
}

impl FromSetting for bool {
    fn from_setting(key: &str, value: &SettingValue) -> Result<Self, PolicyError> {
        match value {
            SettingValue::Bool(v) => Ok(*v),
            other => Err(mismatch(key, "bool", other)),
        }
    }
}

impl FromSetting for i64 {
    fn from_setting(key: &str, value: &SettingValue) -> Result<Self, PolicyError> {
        match value {
            SettingValue::Int(v) => Ok(*v),
            other => Err(mismatch(key, "integer", other)),
        }
    }
}

impl FromSetting for i32 {
    fn from_setting(key: &str, value: &SettingValue) -> Result<Self, PolicyError> {
        match value {
            SettingValue::Int(v) => {
                i32::try_from(*v).map_err(|_| mismatch(key, "32-bit integer", value))
            }
            other => Err(mismatch(key, "integer", other)),
        }
    }
}

impl FromSetting for String {
    fn from_setting(key: &str, value: &SettingValue) -> Result<Self, PolicyError> {
        match value {
            SettingValue::Text(v) => Ok(v.clone()),
            other => Err(mismatch(key, "text", other)),
        }
    }
}

impl FromSetting for Span {
    fn from_setting(key: &str, value: &SettingValue) -> Result<Self, PolicyError> {
        match value {
            SettingValue::Text(v) => v.parse(),
            other => Err(mismatch(key, "duration text", other)),
        }
    }
}

impl FromSetting for SettingsStorage {
    fn from_setting(key: &str, value: &SettingValue) -> Result<Self, PolicyError> {
        match value {
            SettingValue::Storage(v) => Ok(v.clone()),
            other => Err(mismatch(key, "storage", other)),
        }
    }
}

impl<T: FromSetting> FromSetting for Vec<T> {
    fn from_setting(key: &str, value: &SettingValue) -> Result<Self, PolicyError> {
        match value {
            SettingValue::List(items) => items.iter().map(|v| T::from_setting(key, v)).collect(),
            other => Err(mismatch(key, "list", other)),
        }
    }
}
