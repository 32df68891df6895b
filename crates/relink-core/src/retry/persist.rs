//! Settings storage layout for retry parameters.

use crate::error::PolicyError;
use crate::storage::{Persistable, SettingsStorage, Span};

use super::settings::RetrySettings;
use super::{KEY_ATTEMPT_COUNT, KEY_INTERVAL, KEY_RE_ATTEMPT_COUNT, KEY_TIMEOUT_INTERVAL, KEY_WORKING_TIME};

impl RetrySettings {
    /// Build the state `load` would produce, without touching `self`.
    ///
    /// `WorkingTime` is optional and merged into a copy of the current
    /// window; the four scalars are required and pass through the setters.
    pub(crate) fn merged_from(&self, storage: &SettingsStorage) -> Result<Self, PolicyError> {
        let mut staged = self.clone();

        if let Some(wt) = storage.try_get_value::<SettingsStorage>(KEY_WORKING_TIME)? {
            staged.working_time_mut().load(&wt)?;
        }
        staged.set_interval(storage.get_value::<Span>(KEY_INTERVAL)?)?;
        staged.set_attempt_count(storage.get_value::<i32>(KEY_ATTEMPT_COUNT)?)?;
        staged.set_re_attempt_count(storage.get_value::<i32>(KEY_RE_ATTEMPT_COUNT)?)?;
        staged.set_timeout_interval(storage.get_value::<Span>(KEY_TIMEOUT_INTERVAL)?)?;

        Ok(staged)
    }
}

impl Persistable for RetrySettings {
    fn load(&mut self, storage: &SettingsStorage) -> Result<(), PolicyError> {
        *self = self.merged_from(storage)?;
        Ok(())
    }

    fn save(&self) -> SettingsStorage {
        let mut storage = SettingsStorage::new();
        storage
            .set_value(KEY_WORKING_TIME, self.working_time().save())
            .set_value(KEY_INTERVAL, self.interval_span())
            .set_value(KEY_ATTEMPT_COUNT, self.attempt_count())
            .set_value(KEY_RE_ATTEMPT_COUNT, self.re_attempt_count())
            .set_value(KEY_TIMEOUT_INTERVAL, self.timeout_span());
        storage
    }
}
