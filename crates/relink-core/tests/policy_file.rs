//! Integration test: policy sets round-trip through TOML and JSON files.

use std::fs;
use std::time::Duration;

use relink_core::config::{load_from_path, load_or_init_at, save_to_path};
use relink_core::retry::UNBOUNDED;
use relink_core::{
    ConnectionPhase, PolicyError, ReconnectionPolicySet, RetryDecision, TimeRange, WorkingTime,
};
use tempfile::tempdir;

fn configured_set() -> ReconnectionPolicySet {
    let mut set = ReconnectionPolicySet::new();
    let window = WorkingTime::with_sessions([
        "10:00-14:00".parse::<TimeRange>().unwrap(),
        "14:05-18:45".parse::<TimeRange>().unwrap(),
    ]);
    set.set_working_time(window).unwrap();
    set.connection_mut().set_attempt_count(UNBOUNDED).unwrap();
    set.connection_mut()
        .set_interval(Duration::from_millis(2_500))
        .unwrap();
    set.export_mut()
        .set_timeout_interval(Duration::ZERO)
        .unwrap();
    set.export_mut().set_re_attempt_count(3).unwrap();
    set
}

#[test]
fn toml_and_json_files_round_trip() {
    let dir = tempdir().unwrap();
    let set = configured_set();

    for name in ["policy.toml", "policy.json"] {
        let path = dir.path().join("nested").join(name);
        save_to_path(&set, &path).unwrap();
        let loaded = load_from_path(&path).unwrap().expect("file exists");
        assert_eq!(loaded.connection().settings(), set.connection().settings(), "{name}");
        assert_eq!(loaded.export().settings(), set.export().settings(), "{name}");
    }
}

#[test]
fn missing_file_loads_as_none_and_init_writes_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reconnection.toml");
    assert!(load_from_path(&path).unwrap().is_none());

    let set = load_or_init_at(&path).unwrap();
    assert!(path.exists());
    assert_eq!(set.connection().re_attempt_count(), 100);

    let again = load_from_path(&path).unwrap().unwrap();
    assert_eq!(again.export().settings(), set.export().settings());
}

#[test]
fn file_with_negative_interval_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    save_to_path(&ReconnectionPolicySet::new(), &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::write(&path, text.replacen("Interval = \"10s\"", "Interval = \"-10s\"", 1)).unwrap();

    let err = load_from_path(&path).unwrap_err();
    let policy_err = err
        .downcast_ref::<PolicyError>()
        .expect("policy error in chain");
    assert_eq!(policy_err.as_label(), "invalid_range");
}

#[test]
fn file_without_export_block_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(
        &path,
        r#"{"ConnectionSettings": {"Interval": "1s", "AttemptCount": 1,
            "ReAttemptCount": 1, "TimeOutInterval": "5s"}}"#,
    )
    .unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert_eq!(
        err.downcast_ref::<PolicyError>(),
        Some(&PolicyError::MissingField {
            key: "ExportSettings".into()
        })
    );
}

#[test]
fn loaded_policy_drives_supervisor_decisions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("policy.toml");
    save_to_path(&configured_set(), &path).unwrap();
    let set = load_from_path(&path).unwrap().unwrap();

    assert_eq!(
        set.connection().decide(ConnectionPhase::Initial, 1_000),
        RetryDecision::RetryAfter(Duration::from_millis(2_500))
    );
    assert_eq!(set.export().decide(ConnectionPhase::Recovery, 3), RetryDecision::NoRetry);
    assert_eq!(set.export().timeout(), None);
    assert!(!set
        .working_time()
        .is_active_at(Duration::from_secs(14 * 3_600 + 60)));
    assert!(set.working_time().is_active_at(Duration::from_secs(15 * 3_600)));
}
