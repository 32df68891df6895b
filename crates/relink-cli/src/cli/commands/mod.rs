//! CLI command handlers, one file per command.

mod check;
mod init;
mod set;
mod show;

pub use check::run_check;
pub use init::run_init;
pub use set::{run_set, PolicyEdit};
pub use show::run_show;
