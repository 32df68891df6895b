//! Retry policy: validated settings plus lifecycle notifications.

use std::fmt;
use std::time::Duration;

use crate::error::PolicyError;
use crate::notify::{Notifier, PolicyEvent};
use crate::storage::{Persistable, SettingsStorage, Span};
use crate::working_time::WorkingTime;

use super::decide::{AttemptLimit, ConnectionPhase, RetryDecision};
use super::settings::RetrySettings;

/// Reconnection parameters for one connection.
///
/// The supervisor that owns the connection reads the budgets and calls
/// [`notify_restored`](Self::notify_restored) / [`notify_timed_out`](Self::notify_timed_out)
/// at the matching lifecycle points. This type tracks no connection state.
///
/// Not `Clone`: the notification registries belong to this instance. Clone
/// [`settings`](Self::settings) for a plain copy of the values.
pub struct RetryPolicy {
    settings: RetrySettings,
    restored: Notifier,
    timed_out: Notifier,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicy {
    /// Policy with default values: 10s interval, no initial retries,
    /// 100 recovery retries, 30s timeout and an empty session window.
    pub fn new() -> Self {
        Self::from_settings(RetrySettings::default())
    }

    pub fn from_settings(settings: RetrySettings) -> Self {
        Self {
            settings,
            restored: Notifier::new(PolicyEvent::Restored),
            timed_out: Notifier::new(PolicyEvent::TimedOut),
        }
    }

    /// Current values as a plain struct.
    pub fn settings(&self) -> &RetrySettings {
        &self.settings
    }

    pub(crate) fn replace_settings(&mut self, settings: RetrySettings) {
        self.settings = settings;
    }

    pub fn interval(&self) -> Duration {
        self.settings.interval()
    }

    pub fn attempt_count(&self) -> i32 {
        self.settings.attempt_count()
    }

    pub fn re_attempt_count(&self) -> i32 {
        self.settings.re_attempt_count()
    }

    pub fn timeout_interval(&self) -> Duration {
        self.settings.timeout_interval()
    }

    pub fn working_time(&self) -> &WorkingTime {
        self.settings.working_time()
    }

    pub fn working_time_mut(&mut self) -> &mut WorkingTime {
        self.settings.working_time_mut()
    }

    /// Set the spacing between attempts. Negative spans fail with
    /// `InvalidRange` and keep the previous value.
    pub fn set_interval(&mut self, value: impl Into<Span>) -> Result<(), PolicyError> {
        self.settings.set_interval(value)
    }

    /// Set the initial-connect budget (`-1` = unbounded). Values below `-1`
    /// fail with `InvalidRange`.
    pub fn set_attempt_count(&mut self, value: i32) -> Result<(), PolicyError> {
        self.settings.set_attempt_count(value)
    }

    /// Set the mid-session recovery budget (`-1` = unbounded).
    pub fn set_re_attempt_count(&mut self, value: i32) -> Result<(), PolicyError> {
        self.settings.set_re_attempt_count(value)
    }

    /// Set the connect/disconnect timeout; zero turns monitoring off.
    pub fn set_timeout_interval(&mut self, value: impl Into<Span>) -> Result<(), PolicyError> {
        self.settings.set_timeout_interval(value)
    }

    pub fn set_working_time(
        &mut self,
        value: impl Into<Option<WorkingTime>>,
    ) -> Result<(), PolicyError> {
        self.settings.set_working_time(value)
    }

    pub fn attempt_limit(&self, phase: ConnectionPhase) -> AttemptLimit {
        self.settings.attempt_limit(phase)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.settings.timeout()
    }

    pub fn decide(&self, phase: ConnectionPhase, retries_made: u32) -> RetryDecision {
        self.settings.decide(phase, retries_made)
    }

    /// Registry fired by [`notify_restored`](Self::notify_restored).
    pub fn restored(&self) -> &Notifier {
        &self.restored
    }

    /// Registry fired by [`notify_timed_out`](Self::notify_timed_out).
    pub fn timed_out(&self) -> &Notifier {
        &self.timed_out
    }

    /// Tell subscribers the connection was re-established.
    pub fn notify_restored(&self) {
        self.restored.notify();
    }

    /// Tell subscribers a connect/disconnect attempt timed out.
    pub fn notify_timed_out(&self) {
        self.timed_out.notify();
    }
}

impl Persistable for RetryPolicy {
    /// Restore from `storage`. Either every value is applied or, on error,
    /// none is.
    fn load(&mut self, storage: &SettingsStorage) -> Result<(), PolicyError> {
        match self.settings.merged_from(storage) {
            Ok(staged) => {
                self.settings = staged;
                tracing::debug!(settings = ?self.settings, "loaded retry policy");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, label = e.as_label(), "rejected stored retry policy");
                Err(e)
            }
        }
    }

    fn save(&self) -> SettingsStorage {
        self.settings.save()
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("settings", &self.settings)
            .field("restored", &self.restored)
            .field("timed_out", &self.timed_out)
            .finish()
    }
}
