//! `relink init` – write a default policy file.

use anyhow::Result;
use relink_core::config;
use relink_core::ReconnectionPolicySet;
use std::path::Path;

pub fn run_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Policy file already exists: {}", path.display());
        return Ok(());
    }
    config::save_to_path(&ReconnectionPolicySet::new(), path)?;
    println!("Wrote default policy to {}", path.display());
    Ok(())
}
