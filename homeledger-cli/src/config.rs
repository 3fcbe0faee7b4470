use anyhow::{Context, Result};
use homeledger_core::{DEFAULT_TIMEZONE, SystemClock};
use homeledger_finance::DEFAULT_PREVIEW_ROWS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_homeledger_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub import: ImportSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    /// IANA zone used to decide what "today" is for date fallbacks
    pub timezone: String,
    pub preview_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Default filter when RUST_LOG is unset (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for ImportSection {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn clock(&self) -> Result<SystemClock> {
        SystemClock::from_tz_name(&self.import.timezone).context("config import.timezone")
    }
}

pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(ensure_homeledger_home()?.join("config.toml")),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = config_path(explicit)?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, explicit: Option<&Path>) -> Result<PathBuf> {
    let p = config_path(explicit)?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = config_path(explicit)?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default(), explicit)?;
    println!("Wrote {}", written.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg = parse_config("[import]\ntimezone = \"Europe/Berlin\"\n").unwrap();
        assert_eq!(cfg.import.timezone, "Europe/Berlin");
        assert_eq!(cfg.import.preview_rows, DEFAULT_PREVIEW_ROWS);
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }

    #[test]
    fn test_bad_timezone_is_an_error() {
        let cfg = parse_config("[import]\ntimezone = \"Nowhere/Special\"\n").unwrap();
        assert!(cfg.clock().is_err());
    }

    #[test]
    fn test_save_then_load_explicit_path() {
        let path = std::env::temp_dir().join(format!("homeledger-config-{}.toml", std::process::id()));
        let mut cfg = Config::default();
        cfg.import.preview_rows = 12;
        save_config(&cfg, Some(&path)).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), cfg);
        std::fs::remove_file(path).ok();
    }
}
