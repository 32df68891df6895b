//! Validated retry parameters for one connection.

use std::time::Duration;

use crate::error::PolicyError;
use crate::storage::Span;
use crate::working_time::WorkingTime;

use super::{KEY_ATTEMPT_COUNT, KEY_INTERVAL, KEY_RE_ATTEMPT_COUNT, KEY_TIMEOUT_INTERVAL, KEY_WORKING_TIME};

/// Attempt count sentinel meaning "retry forever".
pub const UNBOUNDED: i32 = -1;

pub const DEFAULT_INTERVAL: Span = Span::from_secs(10);
pub const DEFAULT_ATTEMPT_COUNT: i32 = 0;
pub const DEFAULT_RE_ATTEMPT_COUNT: i32 = 100;
pub const DEFAULT_TIMEOUT_INTERVAL: Span = Span::from_secs(30);

/// Plain value of the five policy fields.
///
/// Setters enforce the lower bounds and leave the field untouched on
/// failure. [`RetryPolicy::settings`](super::RetryPolicy::settings) hands out
/// a reference that callers can clone as a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySettings {
    interval: Span,
    attempt_count: i32,
    re_attempt_count: i32,
    timeout_interval: Span,
    working_time: WorkingTime,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            attempt_count: DEFAULT_ATTEMPT_COUNT,
            re_attempt_count: DEFAULT_RE_ATTEMPT_COUNT,
            timeout_interval: DEFAULT_TIMEOUT_INTERVAL,
            working_time: WorkingTime::new(),
        }
    }
}

fn non_negative(field: &'static str, value: Span) -> Result<Span, PolicyError> {
    if value.is_negative() {
        return Err(PolicyError::InvalidRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn attempt_bound(field: &'static str, value: i32) -> Result<i32, PolicyError> {
    if value < UNBOUNDED {
        return Err(PolicyError::InvalidRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

impl RetrySettings {
    /// Spacing between connection attempts.
    pub fn interval(&self) -> Duration {
        self.interval.to_std().unwrap_or_default()
    }

    /// Initial-connect retry budget; `-1` is unbounded.
    pub fn attempt_count(&self) -> i32 {
        self.attempt_count
    }

    /// Budget for recovering a connection lost mid-session; `-1` is unbounded.
    pub fn re_attempt_count(&self) -> i32 {
        self.re_attempt_count
    }

    /// Connect/disconnect timeout; zero disables monitoring.
    pub fn timeout_interval(&self) -> Duration {
        self.timeout_interval.to_std().unwrap_or_default()
    }

    pub fn working_time(&self) -> &WorkingTime {
        &self.working_time
    }

    pub fn working_time_mut(&mut self) -> &mut WorkingTime {
        &mut self.working_time
    }

    pub fn set_interval(&mut self, value: impl Into<Span>) -> Result<(), PolicyError> {
        self.interval = non_negative(KEY_INTERVAL, value.into())?;
        Ok(())
    }

    pub fn set_attempt_count(&mut self, value: i32) -> Result<(), PolicyError> {
        self.attempt_count = attempt_bound(KEY_ATTEMPT_COUNT, value)?;
        Ok(())
    }

    pub fn set_re_attempt_count(&mut self, value: i32) -> Result<(), PolicyError> {
        self.re_attempt_count = attempt_bound(KEY_RE_ATTEMPT_COUNT, value)?;
        Ok(())
    }

    pub fn set_timeout_interval(&mut self, value: impl Into<Span>) -> Result<(), PolicyError> {
        self.timeout_interval = non_negative(KEY_TIMEOUT_INTERVAL, value.into())?;
        Ok(())
    }

    /// Replace the session window. `None` is rejected with `NullArgument`.
    pub fn set_working_time(
        &mut self,
        value: impl Into<Option<WorkingTime>>,
    ) -> Result<(), PolicyError> {
        let value: Option<WorkingTime> = value.into();
        let value = value.ok_or(PolicyError::NullArgument {
            field: KEY_WORKING_TIME,
        })?;
        self.working_time = value;
        Ok(())
    }

    pub(crate) fn interval_span(&self) -> Span {
        self.interval
    }

    pub(crate) fn timeout_span(&self) -> Span {
        self.timeout_interval
    }
}
