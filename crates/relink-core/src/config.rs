//! Policy file on disk: `~/.config/relink/reconnection.toml`.
//!
//! The file holds the saved [`ReconnectionPolicySet`] storage tree. Paths
//! ending in `.json` are written and read as JSON, anything else as TOML.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::reconnection::ReconnectionPolicySet;
use crate::storage::{Persistable, SettingsStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        }
    }

    pub fn encode(self, storage: &SettingsStorage) -> Result<String> {
        Ok(match self {
            FileFormat::Toml => toml::to_string_pretty(storage).context("serialize policy as TOML")?,
            FileFormat::Json => {
                serde_json::to_string_pretty(storage).context("serialize policy as JSON")?
            }
        })
    }

    pub fn decode(self, text: &str) -> Result<SettingsStorage> {
        Ok(match self {
            FileFormat::Toml => toml::from_str(text).context("parse TOML policy")?,
            FileFormat::Json => serde_json::from_str(text).context("parse JSON policy")?,
        })
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("relink")?;
    Ok(xdg_dirs.place_config_file("reconnection.toml")?)
}

/// Save `set` to `path` (creates the parent dir if needed).
pub fn save_to_path(set: &ReconnectionPolicySet, path: &Path) -> Result<()> {
    let text = FileFormat::for_path(path).encode(&set.save())?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir: {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("write policy: {}", path.display()))?;
    tracing::debug!("saved reconnection policy to {}", path.display());
    Ok(())
}

/// Load a policy set from `path`. A missing file yields `None`; a file
/// with out-of-range or missing values is an error.
pub fn load_from_path(path: &Path) -> Result<Option<ReconnectionPolicySet>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read policy: {}", path.display())),
    };
    let storage = FileFormat::for_path(path)
        .decode(&text)
        .with_context(|| format!("parse policy: {}", path.display()))?;
    let mut set = ReconnectionPolicySet::new();
    set.load(&storage)
        .with_context(|| format!("invalid policy: {}", path.display()))?;
    Ok(Some(set))
}

/// Load the policy set from `path`, writing defaults there if none exists.
pub fn load_or_init_at(path: &Path) -> Result<ReconnectionPolicySet> {
    if let Some(set) = load_from_path(path)? {
        return Ok(set);
    }
    let set = ReconnectionPolicySet::new();
    save_to_path(&set, path)?;
    tracing::info!("created default reconnection policy at {}", path.display());
    Ok(set)
}

/// Load the policy set from the default config path, creating it if needed.
pub fn load_or_init() -> Result<ReconnectionPolicySet> {
    load_or_init_at(&config_path()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn format_follows_extension() {
        assert_eq!(FileFormat::for_path(Path::new("a/b.json")), FileFormat::Json);
        assert_eq!(FileFormat::for_path(Path::new("a/b.JSON")), FileFormat::Json);
        assert_eq!(FileFormat::for_path(Path::new("a/b.toml")), FileFormat::Toml);
        assert_eq!(FileFormat::for_path(Path::new("a/policy")), FileFormat::Toml);
    }

    #[test]
    fn default_set_toml_layout() {
        let text = FileFormat::Toml
            .encode(&ReconnectionPolicySet::new().save())
            .unwrap();
        assert!(text.contains("[ConnectionSettings]"), "{text}");
        assert!(text.contains("[ExportSettings.WorkingTime]"), "{text}");
        assert!(text.contains("Interval = \"10s\""), "{text}");
        assert!(text.contains("ReAttemptCount = 100"), "{text}");
    }

    #[test]
    fn hand_written_toml_loads() {
        let text = r#"
            [ConnectionSettings]
            Interval = "5s"
            AttemptCount = -1
            ReAttemptCount = 20
            TimeOutInterval = "0s"

            [ConnectionSettings.WorkingTime]
            IsEnabled = true
            Times = ["10:00-18:45"]

            [ExportSettings]
            Interval = "1m"
            AttemptCount = 0
            ReAttemptCount = 100
            TimeOutInterval = "30s"
        "#;
        let storage = FileFormat::Toml.decode(text).unwrap();
        let mut set = ReconnectionPolicySet::new();
        set.load(&storage).unwrap();

        assert_eq!(set.connection().interval(), Duration::from_secs(5));
        assert_eq!(set.connection().attempt_count(), -1);
        assert_eq!(set.connection().timeout(), None);
        assert!(set.working_time().is_enabled());
        assert_eq!(set.export().interval(), Duration::from_secs(60));
        assert!(!set.export().working_time().is_enabled());
    }
}
