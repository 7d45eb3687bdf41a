use std::{env, path::PathBuf, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 3000;

/// Runtime settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory holding `data.json` and `migration-flag`.
    pub data_dir: PathBuf,
    /// Optional read-only override document.
    pub remote_url: Option<String>,
    pub remote_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            remote_url: None,
            remote_timeout: Duration::from_millis(DEFAULT_REMOTE_TIMEOUT_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Malformed values fall back to
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let data_dir = lookup("APP_DATA_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let remote_url = lookup("APP_REMOTE_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let remote_timeout = lookup("APP_REMOTE_TIMEOUT_MS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.remote_timeout);

        Self {
            port,
            data_dir,
            remote_url,
            remote_timeout,
        }
    }
}
