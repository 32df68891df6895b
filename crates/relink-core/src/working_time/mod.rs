//! Session window: the hours during which (re)connecting is meaningful.
//!
//! Retry policies treat this as an opaque nested settings object and only
//! forward it; the supervisor asks [`WorkingTime::is_active_at`] before it
//! dials. A fresh window is disabled and empty, which permits any time.

mod range;

use std::time::Duration;

use crate::error::PolicyError;
use crate::storage::{Persistable, SettingsStorage};

pub use range::TimeRange;

const KEY_IS_ENABLED: &str = "IsEnabled";
const KEY_TIMES: &str = "Times";

/// Permitted operating hours for a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingTime {
    is_enabled: bool,
    times: Vec<TimeRange>,
}

impl WorkingTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enabled window with the given sessions.
    pub fn with_sessions(times: impl IntoIterator<Item = TimeRange>) -> Self {
        Self {
            is_enabled: true,
            times: times.into_iter().collect(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.is_enabled = enabled;
    }

    pub fn times(&self) -> &[TimeRange] {
        &self.times
    }

    pub fn set_times(&mut self, times: Vec<TimeRange>) {
        self.times = times;
    }

    pub fn add_time(&mut self, range: TimeRange) {
        self.times.push(range);
    }

    /// Whether a connection may be attempted at `time_of_day`.
    ///
    /// A disabled window, or one without sessions, never gates.
    pub fn is_active_at(&self, time_of_day: Duration) -> bool {
        if !self.is_enabled || self.times.is_empty() {
            return true;
        }
        self.times.iter().any(|r| r.contains(time_of_day))
    }
}

impl Persistable for WorkingTime {
    /// Merge from `storage`; absent keys keep their current value.
    fn load(&mut self, storage: &SettingsStorage) -> Result<(), PolicyError> {
        let is_enabled = storage.try_get_value::<bool>(KEY_IS_ENABLED)?;
        let times = storage
            .try_get_value::<Vec<String>>(KEY_TIMES)?
            .map(|list| {
                list.iter()
                    .map(|s| s.parse::<TimeRange>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        if let Some(v) = is_enabled {
            self.is_enabled = v;
        }
        if let Some(v) = times {
            self.times = v;
        }
        Ok(())
    }

    fn save(&self) -> SettingsStorage {
        let mut storage = SettingsStorage::new();
        storage
            .set_value(KEY_IS_ENABLED, self.is_enabled)
            .set_value(
                KEY_TIMES,
                self.times.iter().map(ToString::to_string).collect::<Vec<_>>(),
            );
        storage
    }
}
