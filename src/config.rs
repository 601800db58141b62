use std::{env, path::PathBuf};

use anyhow::{Result, bail};

use crate::locale::Locale;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STORAGE_PATH: &str = "storage/tarot_readings.json";

const ENV_PORT: &str = "PORT";
const ENV_STORAGE_PATH: &str = "TAROT_STORAGE_PATH";
const ENV_DEFAULT_LOCALE: &str = "DEFAULT_LOCALE";
const ENV_STORAGE_BACKEND: &str = "TAROT_STORAGE_BACKEND";

/// Where saved tarot readings live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" | "" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("{ENV_STORAGE_BACKEND} must be `file` or `memory`, got `{other}`"),
        }
    }
}

/// Runtime settings sourced from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub storage_path: PathBuf,
    pub default_locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            storage_backend: StorageBackend::File,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            default_locale: Locale::En,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup(ENV_PORT)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(defaults.port);

        let storage_backend = match lookup(ENV_STORAGE_BACKEND) {
            Some(value) => StorageBackend::parse(&value)?,
            None => defaults.storage_backend,
        };

        let storage_path = match lookup(ENV_STORAGE_PATH) {
            Some(value) if value.trim().is_empty() => {
                bail!("{ENV_STORAGE_PATH} is set but empty")
            }
            Some(value) => PathBuf::from(value.trim()),
            None => defaults.storage_path,
        };

        let default_locale = lookup(ENV_DEFAULT_LOCALE)
            .map(|value| Locale::parse(&value))
            .unwrap_or(defaults.default_locale);

        Ok(Self {
            port,
            storage_backend,
            storage_path,
            default_locale,
        })
    }
}
