use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use country_engine::{RuntimeSettings, TransportSettings};
use serde::Deserialize;
use thiserror::Error;

use super::cli::Args;

const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Settings read from the optional RON config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_bytes: Option<u64>,
    pub worker_threads: Option<usize>,
    pub page_size: Option<usize>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file named by `--config` (if any) and applies CLI overrides on top.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(url) = &args.url {
            config.url = Some(url.clone());
        }
        if let Some(page_size) = args.page_size {
            config.page_size = Some(page_size);
        }
        Ok(config)
    }

    pub fn transport_settings(&self) -> TransportSettings {
        let defaults = TransportSettings::default();
        TransportSettings {
            url: self.url.clone().unwrap_or(defaults.url),
            connect_timeout: self
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            request_timeout: self
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_bytes: self.max_bytes.unwrap_or(defaults.max_bytes),
            ..defaults
        }
    }

    pub fn runtime_settings(&self) -> RuntimeSettings {
        let defaults = RuntimeSettings::default();
        RuntimeSettings {
            worker_threads: self.worker_threads.unwrap_or(defaults.worker_threads),
            ..defaults
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
