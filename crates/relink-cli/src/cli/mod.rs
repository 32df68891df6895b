//! CLI for inspecting and editing reconnection policies.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use relink_core::{config, Span, TimeRange};
use std::path::PathBuf;

use commands::{run_check, run_init, run_set, run_show, PolicyEdit};

/// Top-level CLI for relink.
#[derive(Debug, Parser)]
#[command(name = "relink")]
#[command(about = "relink: reconnection policies for trading connectors", long_about = None)]
pub struct Cli {
    /// Policy file (default: ~/.config/relink/reconnection.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Which policy of the set a command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Connection,
    Export,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show both policies.
    Show,

    /// Write a default policy file (keeps an existing one unless --force).
    Init {
        /// Overwrite an existing file with defaults.
        #[arg(long)]
        force: bool,
    },

    /// Change fields of one policy and save the file.
    Set {
        /// Policy to edit.
        #[arg(value_enum)]
        target: Target,

        /// Spacing between attempts, e.g. 10s, 1m30s, 250ms.
        #[arg(long, allow_hyphen_values = true)]
        interval: Option<Span>,

        /// Initial-connect retries (-1 = unbounded).
        #[arg(long, allow_negative_numbers = true)]
        attempts: Option<i32>,

        /// Retries after a lost connection (-1 = unbounded).
        #[arg(long, allow_negative_numbers = true)]
        re_attempts: Option<i32>,

        /// Connect/disconnect timeout; 0s disables monitoring.
        #[arg(long, allow_hyphen_values = true)]
        timeout: Option<Span>,

        /// Session range HH:MM-HH:MM; repeat for several. Replaces existing sessions.
        #[arg(long = "session", value_name = "RANGE")]
        sessions: Vec<TimeRange>,

        /// Enable or disable session gating.
        #[arg(long, value_name = "BOOL")]
        session_enabled: Option<bool>,
    },

    /// Validate a policy file without changing it.
    Check {
        /// Path to the policy file (.toml or .json).
        path: PathBuf,
    },
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let policy_path = match cli.config {
            Some(p) => p,
            None => config::config_path()?,
        };
        tracing::debug!("policy file: {}", policy_path.display());

        match cli.command {
            CliCommand::Show => run_show(&policy_path)?,
            CliCommand::Init { force } => run_init(&policy_path, force)?,
            CliCommand::Set {
                target,
                interval,
                attempts,
                re_attempts,
                timeout,
                sessions,
                session_enabled,
            } => {
                let edit = PolicyEdit {
                    interval,
                    attempts,
                    re_attempts,
                    timeout,
                    sessions,
                    session_enabled,
                };
                run_set(&policy_path, target, &edit)?;
            }
            CliCommand::Check { path } => run_check(&path)?,
        }

        Ok(())
    }
}
