//! `relink set <connection|export> ...` – edit one policy and save.

use anyhow::{Context, Result};
use relink_core::{config, RetryPolicy, Span, TimeRange};
use std::path::Path;

use crate::cli::Target;

/// Field changes requested on the command line; `None` leaves a field as is.
#[derive(Debug, Default)]
pub struct PolicyEdit {
    pub interval: Option<Span>,
    pub attempts: Option<i32>,
    pub re_attempts: Option<i32>,
    pub timeout: Option<Span>,
    pub sessions: Vec<TimeRange>,
    pub session_enabled: Option<bool>,
}

impl PolicyEdit {
    /// Apply the edit. Stops at the first rejected value.
    pub fn apply(&self, policy: &mut RetryPolicy) -> Result<()> {
        if let Some(v) = self.interval {
            policy.set_interval(v).context("--interval")?;
        }
        if let Some(v) = self.attempts {
            policy.set_attempt_count(v).context("--attempts")?;
        }
        if let Some(v) = self.re_attempts {
            policy.set_re_attempt_count(v).context("--re-attempts")?;
        }
        if let Some(v) = self.timeout {
            policy.set_timeout_interval(v).context("--timeout")?;
        }
        if !self.sessions.is_empty() {
            let wt = policy.working_time_mut();
            wt.set_times(self.sessions.clone());
            wt.set_enabled(true);
        }
        if let Some(v) = self.session_enabled {
            policy.working_time_mut().set_enabled(v);
        }
        Ok(())
    }
}

pub fn run_set(path: &Path, target: Target, edit: &PolicyEdit) -> Result<()> {
    let mut set = config::load_or_init_at(path)?;
    let policy = match target {
        Target::Connection => set.connection_mut(),
        Target::Export => set.export_mut(),
    };
    edit.apply(policy)?;
    config::save_to_path(&set, path)?;
    tracing::info!(?target, "updated reconnection policy");
    println!("Updated {:?} policy in {}", target, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn apply_sets_requested_fields_only() {
        let mut p = RetryPolicy::new();
        let edit = PolicyEdit {
            attempts: Some(-1),
            sessions: vec!["09:00-17:00".parse().unwrap()],
            ..PolicyEdit::default()
        };
        edit.apply(&mut p).unwrap();
        assert_eq!(p.attempt_count(), -1);
        assert_eq!(p.interval(), Duration::from_secs(10));
        assert!(p.working_time().is_enabled());
        assert_eq!(p.working_time().times().len(), 1);
    }

    #[test]
    fn apply_rejects_negative_interval() {
        let mut p = RetryPolicy::new();
        let edit = PolicyEdit {
            interval: Some(Span::from_secs(-1)),
            ..PolicyEdit::default()
        };
        let err = edit.apply(&mut p).unwrap_err();
        assert!(format!("{err:#}").contains("Interval out of range"));
        assert_eq!(p.interval(), Duration::from_secs(10));
    }
}
