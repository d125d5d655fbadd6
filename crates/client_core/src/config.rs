use std::{fs, io, time::Duration};

use serde::Deserialize;

use crate::notify::{DEFAULT_NOTIFICATION_LIMIT, DEFAULT_NOTIFICATION_TTL};

pub const SETTINGS_FILE: &str = "site.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Backend origin; `/api/...` is appended per call. Never defaulted.
    pub backend_url: Option<String>,
    pub log_filter: String,
    pub notification_limit: usize,
    pub notification_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: None,
            log_filter: "info".into(),
            notification_limit: DEFAULT_NOTIFICATION_LIMIT,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    backend_url: Option<String>,
    log_filter: Option<String>,
    notification_limit: Option<usize>,
    notification_ttl_secs: Option<u64>,
}

/// Defaults, then `site.toml` in the working directory, then environment.
///
/// Returns the settings plus one message per ignored input. Nothing is
/// logged here since this runs before tracing is set up.
pub fn load_settings() -> (Settings, Vec<String>) {
    let mut warnings = Vec::new();
    let raw = match fs::read_to_string(SETTINGS_FILE) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            warnings.push(format!("ignoring unreadable {SETTINGS_FILE}: {err}"));
            None
        }
    };
    let (settings, resolve_warnings) =
        resolve_settings(raw.as_deref(), |key| std::env::var(key).ok());
    warnings.extend(resolve_warnings);
    (settings, warnings)
}

pub fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> (Settings, Vec<String>) {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    if let Some(raw) = file {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.backend_url {
                    settings.backend_url = Some(v);
                }
                if let Some(v) = file_cfg.log_filter {
                    settings.log_filter = v;
                }
                if let Some(v) = file_cfg.notification_limit {
                    settings.notification_limit = v;
                }
                if let Some(v) = file_cfg.notification_ttl_secs {
                    settings.notification_ttl = Duration::from_secs(v);
                }
            }
            Err(err) => warnings.push(format!("ignoring malformed {SETTINGS_FILE}: {err}")),
        }
    }

    for key in ["REACT_APP_BACKEND_URL", "BACKEND_URL", "APP__BACKEND_URL"] {
        if let Some(v) = env(key) {
            settings.backend_url = Some(v);
        }
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = env("APP__NOTIFICATION_LIMIT") {
        match v.parse::<usize>() {
            Ok(parsed) => settings.notification_limit = parsed,
            Err(_) => {
                warnings.push(format!("ignoring APP__NOTIFICATION_LIMIT={v}: not a number"))
            }
        }
    }

    if let Some(v) = env("APP__NOTIFICATION_TTL_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.notification_ttl = Duration::from_secs(parsed),
            Err(_) => {
                warnings.push(format!("ignoring APP__NOTIFICATION_TTL_SECS={v}: not a number"))
            }
        }
    }

    (settings, warnings)
}
