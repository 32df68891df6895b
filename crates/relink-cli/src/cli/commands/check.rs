//! `relink check <path>` – validate a policy file.

use anyhow::{bail, Result};
use relink_core::config;
use std::path::Path;

pub fn run_check(path: &Path) -> Result<()> {
    match config::load_from_path(path)? {
        Some(_) => println!("{}: ok", path.display()),
        None => bail!("no policy file at {}", path.display()),
    }
    Ok(())
}
