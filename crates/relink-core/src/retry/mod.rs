//! Retry policy for one connection: budgets, spacing, timeout, session window.
//!
//! Persisted keys:
//! - `WorkingTime` (nested, optional on load)
//! - `Interval`, `TimeOutInterval` (duration text, e.g. `10s`)
//! - `AttemptCount`, `ReAttemptCount` (integers, `-1` = unbounded)

mod decide;
mod persist;
mod policy;
mod settings;

pub use decide::{AttemptLimit, ConnectionPhase, RetryDecision};
pub use policy::RetryPolicy;
pub use settings::{
    RetrySettings, DEFAULT_ATTEMPT_COUNT, DEFAULT_INTERVAL, DEFAULT_RE_ATTEMPT_COUNT,
    DEFAULT_TIMEOUT_INTERVAL, UNBOUNDED,
};

pub const KEY_WORKING_TIME: &str = "WorkingTime";
pub const KEY_INTERVAL: &str = "Interval";
pub const KEY_ATTEMPT_COUNT: &str = "AttemptCount";
pub const KEY_RE_ATTEMPT_COUNT: &str = "ReAttemptCount";
pub const KEY_TIMEOUT_INTERVAL: &str = "TimeOutInterval";
