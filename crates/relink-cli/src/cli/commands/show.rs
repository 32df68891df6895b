//! `relink show` – print both policies of the stored set.

use anyhow::Result;
use relink_core::retry::UNBOUNDED;
use relink_core::{config, RetryPolicy, WorkingTime};
use std::path::Path;

fn attempts(n: i32) -> String {
    if n == UNBOUNDED {
        "unbounded".to_string()
    } else {
        n.to_string()
    }
}

fn sessions(wt: &WorkingTime) -> String {
    if wt.times().is_empty() {
        return "any time".to_string();
    }
    let ranges: Vec<String> = wt.times().iter().map(ToString::to_string).collect();
    if wt.is_enabled() {
        ranges.join(",")
    } else {
        format!("off ({})", ranges.join(","))
    }
}

fn row(name: &str, p: &RetryPolicy) -> String {
    let timeout = match p.timeout() {
        Some(t) => format!("{t:?}"),
        None => "off".to_string(),
    };
    format!(
        "{:<11} {:<9} {:<10} {:<12} {:<8} {}",
        name,
        format!("{:?}", p.interval()),
        attempts(p.attempt_count()),
        attempts(p.re_attempt_count()),
        timeout,
        sessions(p.working_time())
    )
}

pub fn run_show(path: &Path) -> Result<()> {
    let set = config::load_or_init_at(path)?;
    println!(
        "{:<11} {:<9} {:<10} {:<12} {:<8} {}",
        "POLICY", "INTERVAL", "ATTEMPTS", "RE-ATTEMPTS", "TIMEOUT", "SESSIONS"
    );
    println!("{}", row("connection", set.connection()));
    println!("{}", row("export", set.export()));
    Ok(())
}
