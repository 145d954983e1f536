use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const SETTINGS_FILE: &str = "checklist.toml";
const CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub credentials_path: PathBuf,
    pub request_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:9090/escalasoft/".into(),
            credentials_path: default_credentials_path(),
            request_timeout_seconds: 30,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    service_url: Option<String>,
    credentials_path: Option<PathBuf>,
    request_timeout_seconds: Option<u64>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file when it exists, then the environment.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse '{}'", path.display()))?;
            if let Some(v) = file_cfg.service_url {
                settings.service_url = v;
            }
            if let Some(v) = file_cfg.credentials_path {
                settings.credentials_path = v;
            }
            if let Some(v) = file_cfg.request_timeout_seconds {
                settings.request_timeout_seconds = v;
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    }

    if let Some(v) = env("CHECKLIST_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = env("CHECKLIST_CREDENTIALS_PATH") {
        settings.credentials_path = PathBuf::from(v);
    }
    if let Some(v) = env("APP__CREDENTIALS_PATH") {
        settings.credentials_path = PathBuf::from(v);
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
        settings.request_timeout_seconds = v
            .trim()
            .parse()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECONDS must be whole seconds, got '{v}'"))?;
    }

    validate_service_url(&settings.service_url)?;
    if settings.request_timeout_seconds == 0 {
        bail!("request timeout must be at least one second");
    }
    Ok(settings)
}

fn validate_service_url(raw: &str) -> anyhow::Result<()> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid service url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("service url '{raw}' must use http or https");
    }
    Ok(())
}

fn default_credentials_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|base| base.join("checklist"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CREDENTIALS_FILE)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
