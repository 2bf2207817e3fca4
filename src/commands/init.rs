use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{CONFIG_FILE, DEFAULT_CONFIG_TOML};
use crate::helpers::atomic_write;

/// Outcome of `pulse init`.
#[derive(Debug)]
pub struct InitResult {
    pub path: PathBuf,
    pub created: bool,
}

/// Writes a default `pulse.toml` into `dir` unless one is already there.
pub fn run(dir: &Path) -> Result<InitResult> {
    let path = dir.join(CONFIG_FILE);

    if path.exists() {
        return Ok(InitResult {
            path,
            created: false,
        });
    }

    atomic_write(&path, DEFAULT_CONFIG_TOML.as_bytes())?;
    tracing::info!(path = %path.display(), "wrote default configuration");

    Ok(InitResult {
        path,
        created: true,
    })
}
