#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::{Command, Output};

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn openings_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_openings"))
}

/// An `openings` invocation isolated from the caller's environment.
pub fn openings_command() -> Command {
    let mut cmd = Command::new(openings_binary());
    cmd.env_remove("OPENINGS_CATALOG")
        .env_remove("OPENINGS_ALLOWED_CATALOG_SCHEMAS")
        .env_remove("OPENINGS_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if !output.status.success() {
        bail!(
            "command {:?} failed with {:?}\nstdout: {}\nstderr: {}",
            cmd.get_program(),
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}
