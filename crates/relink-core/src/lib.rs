//! Reconnection policy model for trading-venue connectors.
//!
//! A [`ReconnectionPolicySet`] holds two [`RetryPolicy`] values, one for the
//! primary connection and one for the export channel. Each policy carries
//! validated retry budgets, spacing, a timeout and a session window, raises
//! `restored` / `timed out` notifications, and persists itself through a
//! [`SettingsStorage`] tree.

pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod reconnection;
pub mod retry;
pub mod storage;
pub mod working_time;

pub use error::PolicyError;
pub use notify::{Notifier, PolicyEvent, SubscriptionId};
pub use reconnection::{ReconnectionPolicySet, SharedPolicySet};
pub use retry::{AttemptLimit, ConnectionPhase, RetryDecision, RetryPolicy, RetrySettings};
pub use storage::{Persistable, SettingValue, SettingsStorage, Span};
pub use working_time::{TimeRange, WorkingTime};
