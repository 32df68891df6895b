//! The pair of retry policies a connector owns: one for the primary
//! connection, one for the export channel.

use std::sync::{Arc, RwLock};

use crate::error::PolicyError;
use crate::retry::RetryPolicy;
use crate::storage::{Persistable, SettingsStorage};
use crate::working_time::WorkingTime;

pub const KEY_CONNECTION_SETTINGS: &str = "ConnectionSettings";
pub const KEY_EXPORT_SETTINGS: &str = "ExportSettings";

/// Reconnection settings for a connector.
///
/// The two policies are independent. The set-level session window is the
/// connection policy's window; the export policy keeps its own.
#[derive(Debug, Default)]
pub struct ReconnectionPolicySet {
    connection: RetryPolicy,
    export: RetryPolicy,
}

/// One policy set behind a single lock, for supervisors that share it
/// across threads.
pub type SharedPolicySet = Arc<RwLock<ReconnectionPolicySet>>;

impl ReconnectionPolicySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedPolicySet {
        Arc::new(RwLock::new(self))
    }

    /// Policy for initial connect and mid-session reconnects.
    pub fn connection(&self) -> &RetryPolicy {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut RetryPolicy {
        &mut self.connection
    }

    /// Policy for the export channel.
    pub fn export(&self) -> &RetryPolicy {
        &self.export
    }

    pub fn export_mut(&mut self) -> &mut RetryPolicy {
        &mut self.export
    }

    /// Session window of the connection policy.
    pub fn working_time(&self) -> &WorkingTime {
        self.connection.working_time()
    }

    /// Replace the connection policy's session window.
    pub fn set_working_time(
        &mut self,
        value: impl Into<Option<WorkingTime>>,
    ) -> Result<(), PolicyError> {
        self.connection.set_working_time(value)
    }
}

impl Persistable for ReconnectionPolicySet {
    /// Both `ConnectionSettings` and `ExportSettings` are required. Nothing
    /// is applied unless both blocks load cleanly.
    fn load(&mut self, storage: &SettingsStorage) -> Result<(), PolicyError> {
        let connection = storage.get_value::<SettingsStorage>(KEY_CONNECTION_SETTINGS)?;
        let export = storage.get_value::<SettingsStorage>(KEY_EXPORT_SETTINGS)?;

        let connection = self.connection.settings().merged_from(&connection)?;
        let export = self.export.settings().merged_from(&export)?;

        self.connection.replace_settings(connection);
        self.export.replace_settings(export);
        tracing::debug!(
            connection = ?self.connection.settings(),
            export = ?self.export.settings(),
            "loaded reconnection policy set"
        );
        Ok(())
    }

    fn save(&self) -> SettingsStorage {
        let mut storage = SettingsStorage::new();
        storage
            .set_value(KEY_CONNECTION_SETTINGS, self.connection.save())
            .set_value(KEY_EXPORT_SETTINGS, self.export.save());
        storage
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::retry::UNBOUNDED;
    use crate::working_time::TimeRange;

    fn window(range: &str) -> WorkingTime {
        WorkingTime::with_sessions([range.parse::<TimeRange>().unwrap()])
    }

    #[test]
    fn new_set_has_two_default_policies() {
        let set = ReconnectionPolicySet::new();
        assert_eq!(set.connection().settings(), RetryPolicy::new().settings());
        assert_eq!(set.export().settings(), RetryPolicy::new().settings());
    }

    #[test]
    fn working_time_forwards_to_connection_only() {
        let mut set = ReconnectionPolicySet::new();
        let w = window("09:30-16:00");
        set.set_working_time(w.clone()).unwrap();

        assert_eq!(set.connection().working_time(), &w);
        assert_eq!(set.working_time(), &w);
        assert_eq!(set.export().working_time(), &WorkingTime::new());

        set.connection_mut()
            .set_working_time(window("00:00-01:00"))
            .unwrap();
        assert_eq!(set.working_time(), &window("00:00-01:00"));
    }

    #[test]
    fn absent_working_time_is_rejected_at_set_level() {
        let mut set = ReconnectionPolicySet::new();
        set.set_working_time(window("09:30-16:00")).unwrap();
        assert!(matches!(
            set.set_working_time(None::<WorkingTime>),
            Err(PolicyError::NullArgument { .. })
        ));
        assert_eq!(set.working_time(), &window("09:30-16:00"));
    }

    #[test]
    fn save_nests_both_policies() {
        let storage = ReconnectionPolicySet::new().save();
        let keys: Vec<&str> = storage.keys().collect();
        assert_eq!(keys, ["ConnectionSettings", "ExportSettings"]);
        let conn = storage.get_value::<SettingsStorage>("ConnectionSettings").unwrap();
        assert!(conn.contains_key("TimeOutInterval"));
    }

    #[test]
    fn load_of_save_reproduces_both_policies() {
        let mut set = ReconnectionPolicySet::new();
        set.connection_mut().set_attempt_count(UNBOUNDED).unwrap();
        set.set_working_time(window("22:00-06:00")).unwrap();
        set.export_mut().set_interval(Duration::from_secs(60)).unwrap();
        set.export_mut().set_re_attempt_count(0).unwrap();

        let mut restored = ReconnectionPolicySet::new();
        restored.load(&set.save()).unwrap();
        assert_eq!(restored.connection().settings(), set.connection().settings());
        assert_eq!(restored.export().settings(), set.export().settings());
    }

    #[test]
    fn load_without_export_settings_fails_and_leaves_connection_untouched() {
        let mut source = ReconnectionPolicySet::new();
        source.connection_mut().set_attempt_count(9).unwrap();
        let mut storage = source.save();
        storage.remove("ExportSettings");

        let mut set = ReconnectionPolicySet::new();
        assert_eq!(
            set.load(&storage),
            Err(PolicyError::MissingField {
                key: "ExportSettings".into()
            })
        );
        assert_eq!(set.connection().attempt_count(), 0);
    }

    #[test]
    fn load_with_invalid_export_leaves_connection_untouched() {
        let mut source = ReconnectionPolicySet::new();
        source.connection_mut().set_attempt_count(9).unwrap();
        let mut storage = source.save();
        let mut export = storage.get_value::<SettingsStorage>("ExportSettings").unwrap();
        export.set_value("Interval", "-1s");
        storage.set_value("ExportSettings", export);

        let mut set = ReconnectionPolicySet::new();
        assert!(matches!(
            set.load(&storage),
            Err(PolicyError::InvalidRange { field: "Interval", .. })
        ));
        assert_eq!(set.connection().attempt_count(), 0);
    }

    #[test]
    fn shared_set_is_mutated_under_one_lock() {
        let shared = ReconnectionPolicySet::new().into_shared();
        {
            let mut guard = shared.write().unwrap();
            guard.export_mut().set_attempt_count(4).unwrap();
        }
        let reader = Arc::clone(&shared);
        let count = std::thread::spawn(move || reader.read().unwrap().export().attempt_count())
            .join()
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn subscribers_survive_load() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let mut set = ReconnectionPolicySet::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        set.connection().timed_out().subscribe(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });

        let storage = ReconnectionPolicySet::new().save();
        set.load(&storage).unwrap();
        set.connection().notify_timed_out();
        set.export().notify_timed_out();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
