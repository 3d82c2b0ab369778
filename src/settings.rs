use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const SETTINGS_PATH_ENV: &str = "CRUMBS_SETTINGS";
const BIND_ENV: &str = "CRUMBS_BIND";
const DB_PATH_ENV: &str = "CRUMBS_DB_PATH";
const ALLOW_HISTORY_EDITS_ENV: &str = "CRUMBS_ALLOW_HISTORY_EDITS";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind_addr: String,
    pub database_path: PathBuf,
    /// Allow editing or deleting logged interactions. Edits do not
    /// re-reconcile later rows, so this is off unless asked for.
    pub allow_history_edits: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".into(),
            database_path: PathBuf::from("crumbs.sqlite3"),
            allow_history_edits: false,
        }
    }
}

impl Settings {
    /// Load settings from `path` (defaults when absent), then apply env overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Self::from_file(path)?;
        Ok(settings.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        match serde_json::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                warn!(
                    "Ignoring unreadable settings file {}: {err}",
                    path.display()
                );
                Ok(Self::default())
            }
        }
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.trim().is_empty()) {
            self.bind_addr = bind.trim().to_string();
        }
        if let Some(db_path) = lookup(DB_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(db_path.trim());
        }
        if let Some(raw) = lookup(ALLOW_HISTORY_EDITS_ENV) {
            match parse_flag(&raw) {
                Some(flag) => self.allow_history_edits = flag,
                None => warn!("Ignoring {ALLOW_HISTORY_EDITS_ENV}={raw}: expected a boolean"),
            }
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
