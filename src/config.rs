//! Application Settings
//!
//! Defaults, overridden by `franchise-ops.toml` when present, then by
//! `FRANCHISE_OPS__*` environment variables.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use rolling_logger::LoggerConfig;

pub const CONFIG_FILE: &str = "franchise-ops.toml";
pub const ENV_PREFIX: &str = "FRANCHISE_OPS__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app_name: String,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub log_max_file_bytes: u64,
    pub log_max_files: usize,
    pub log_buffer_lines: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "FranchiseOps".into(),
            log_dir: PathBuf::from("./logs"),
            log_level: "info".into(),
            log_max_file_bytes: 1024 * 1024,
            log_max_files: 5,
            log_buffer_lines: 500,
        }
    }
}

impl Settings {
    /// Apply `FRANCHISE_OPS__*` overrides; unparsable numbers are ignored
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(v) = var("APP_NAME") {
            self.app_name = v;
        }
        if let Some(v) = var("LOG_DIR") {
            self.log_dir = PathBuf::from(v);
        }
        if let Some(v) = var("LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some(v) = var("LOG_MAX_FILE_BYTES").and_then(|v| v.parse().ok()) {
            self.log_max_file_bytes = v;
        }
        if let Some(v) = var("LOG_MAX_FILES").and_then(|v| v.parse().ok()) {
            self.log_max_files = v;
        }
        if let Some(v) = var("LOG_BUFFER_LINES").and_then(|v| v.parse().ok()) {
            self.log_buffer_lines = v;
        }
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.log_level_filter(),
            max_file_bytes: self.log_max_file_bytes,
            max_files: self.log_max_files,
            buffer_lines: self.log_buffer_lines,
        }
    }
}

/// Load settings from `franchise-ops.toml` in the working directory
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE))
}

pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<Settings>(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };

    settings.apply_env(|key| std::env::var(key).ok());
    settings
}
