//! Read-only helpers a connection supervisor uses to interpret the budgets.

use std::time::Duration;

use super::settings::{RetrySettings, UNBOUNDED};

/// Which budget applies to the next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    /// The connection has never been established.
    Initial,
    /// The connection was established and then lost.
    Recovery,
}

/// Interpreted attempt count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptLimit {
    Unbounded,
    Limited(u32),
}

impl AttemptLimit {
    pub(crate) fn from_count(count: i32) -> Self {
        if count == UNBOUNDED {
            return AttemptLimit::Unbounded;
        }
        AttemptLimit::Limited(u32::try_from(count).unwrap_or(0))
    }

    /// Whether another retry fits after `retries_made` retries.
    pub fn allows(self, retries_made: u32) -> bool {
        match self {
            AttemptLimit::Unbounded => true,
            AttemptLimit::Limited(n) => retries_made < n,
        }
    }
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Budget exhausted; give up.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

impl RetrySettings {
    pub fn attempt_limit(&self, phase: ConnectionPhase) -> AttemptLimit {
        match phase {
            ConnectionPhase::Initial => AttemptLimit::from_count(self.attempt_count()),
            ConnectionPhase::Recovery => AttemptLimit::from_count(self.re_attempt_count()),
        }
    }

    /// Timeout to enforce, or `None` when monitoring is disabled.
    pub fn timeout(&self) -> Option<Duration> {
        let t = self.timeout_interval();
        (!t.is_zero()).then_some(t)
    }

    /// Decide whether to retry after a failure.
    ///
    /// `retries_made` counts retries already performed in `phase`, not
    /// including the first attempt. Session gating is separate: see
    /// [`WorkingTime::is_active_at`](crate::working_time::WorkingTime::is_active_at).
    pub fn decide(&self, phase: ConnectionPhase, retries_made: u32) -> RetryDecision {
        if self.attempt_limit(phase).allows(retries_made) {
            RetryDecision::RetryAfter(self.interval())
        } else {
            RetryDecision::NoRetry
        }
    }
}
