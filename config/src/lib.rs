//! Load configuration from XDG `config.toml` and project `.env`, then apply to the process
//! environment with priority: **existing env > .env > XDG**.
//!
//! The XDG file may carry a raw `[env]` table and a typed `[gemini]` table; the latter is
//! flattened into the same env keys the `pillar` crate reads (`GEMINI_API_KEY`,
//! `PILLAR_MODEL`, `GEMINI_BASE_URL`).

mod dotenv;
mod xdg_toml;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

pub use xdg_toml::{config_file_path, ENV_API_KEY, ENV_BASE_URL, ENV_MODEL};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Where an applied key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Dotenv,
    Xdg,
}

/// Keys that `load_and_apply` actually set, with their origin. Values are not recorded so the
/// report is safe to log.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub applied: BTreeMap<String, ConfigSource>,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.applied.keys().map(String::as_str)
    }
}

/// Picks the value for each key missing from the process env: `.env` first, then XDG.
fn merge(
    dotenv_map: &HashMap<String, String>,
    xdg_map: &HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String, ConfigSource)> {
    let mut keys: Vec<&String> = dotenv_map.keys().chain(xdg_map.keys()).collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .filter(|k| !is_set(k))
        .filter_map(|k| {
            if let Some(v) = dotenv_map.get(k) {
                Some((k.clone(), v.clone(), ConfigSource::Dotenv))
            } else {
                xdg_map
                    .get(k)
                    .map(|v| (k.clone(), v.clone(), ConfigSource::Xdg))
            }
        })
        .collect()
}

/// Loads config from XDG `config.toml` and optional project `.env`, then sets environment
/// variables only for keys that are **not** already set.
///
/// * `app_name`: e.g. `"pillar"`, used for `$XDG_CONFIG_HOME/<app_name>/config.toml`.
/// * `override_dir`: if `Some`, look for `.env` in this directory instead of the current one.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<LoadReport, LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    let mut report = LoadReport::default();
    for (key, value, source) in merge(&dotenv_map, &xdg_map, |k| std::env::var_os(k).is_some()) {
        std::env::set_var(&key, value);
        report.applied.insert(key, source);
    }
    Ok(report)
}

/// Serializes tests that touch process-wide env vars such as `XDG_CONFIG_HOME`.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
