//! Per-user data directory: `$HOMELEDGER_HOME` when set, else `~/.homeledger`.

use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

pub const HOME_OVERRIDE_ENV: &str = "HOMELEDGER_HOME";

fn resolve_home(override_dir: Option<OsString>, user_home: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    match user_home.filter(|h| !h.is_empty()) {
        Some(home) => Ok(PathBuf::from(home).join(".homeledger")),
        None => bail!("HOME is not set; set {HOME_OVERRIDE_ENV} to choose a data directory"),
    }
}

pub fn homeledger_home() -> Result<PathBuf> {
    resolve_home(std::env::var_os(HOME_OVERRIDE_ENV), std::env::var_os("HOME"))
}

pub fn ensure_homeledger_home() -> Result<PathBuf> {
    let dir = homeledger_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
