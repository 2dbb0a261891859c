//! Init command

use achibot::Config;
use anyhow::{Result, bail};
use std::path::Path;

pub fn run(config_path: &str, force: bool) -> Result<()> {
    if Path::new(config_path).exists() && !force {
        bail!(
            "Configuration file {} already exists (use --force to overwrite)",
            config_path
        );
    }

    Config::default().save(config_path)?;
    println!("Wrote default configuration to {}", config_path);

    Ok(())
}
