//! Application configuration.
//!
//! Values are layered: command-line flags override the config file, which
//! overrides the defaults of the selected environment.

use crate::consts::cli_consts::{http, refresh};
use crate::environment::Environment;
use crate::feed::error::FeedError;
use crate::feed::{DirectoryFeed, FeedSource, HttpFeedClient};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use std::{fs, path::Path};

/// Get the path to the dashboard config file, typically located at ~/.airdrop-intel/config.json.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(".airdrop-intel").join("config.json"))
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Site hosting the `data/*.json` documents.
    pub base_url: Option<String>,
    /// Local directory laid out like the site, used instead of `base_url`.
    pub data_dir: Option<PathBuf>,
    pub refresh_interval_secs: Option<u64>,
    pub with_background_color: Option<bool>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns an empty configuration.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Overlay values given on the command line.
    pub fn with_overrides(mut self, overrides: Config) -> Self {
        if overrides.base_url.is_some() || overrides.data_dir.is_some() {
            self.base_url = overrides.base_url;
            self.data_dir = overrides.data_dir;
        }
        self.refresh_interval_secs = overrides
            .refresh_interval_secs
            .or(self.refresh_interval_secs);
        self.with_background_color = overrides
            .with_background_color
            .or(self.with_background_color);
        self.connect_timeout_secs = overrides.connect_timeout_secs.or(self.connect_timeout_secs);
        self.request_timeout_secs = overrides.request_timeout_secs.or(self.request_timeout_secs);
        self
    }

    /// Fill the gaps from `env` and the built-in defaults.
    pub fn resolve(&self, env: &Environment) -> Settings {
        let location = match (&self.data_dir, &self.base_url) {
            (Some(dir), _) => FeedLocation::Directory(dir.clone()),
            (None, Some(url)) => FeedLocation::Http(url.clone()),
            (None, None) => FeedLocation::Http(env.base_url()),
        };
        let refresh_secs = self
            .refresh_interval_secs
            .unwrap_or(refresh::INTERVAL_SECS)
            .max(refresh::MIN_INTERVAL_SECS);

        Settings {
            location,
            refresh_interval: Duration::from_secs(refresh_secs),
            with_background_color: self.with_background_color.unwrap_or(false),
            connect_timeout: Duration::from_secs(
                self.connect_timeout_secs
                    .unwrap_or(http::CONNECT_TIMEOUT_SECS),
            ),
            request_timeout: Duration::from_secs(
                self.request_timeout_secs
                    .unwrap_or(http::REQUEST_TIMEOUT_SECS),
            ),
        }
    }
}

/// Where the documents are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Http(String),
    Directory(PathBuf),
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub location: FeedLocation,
    pub refresh_interval: Duration,
    pub with_background_color: bool,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Settings {
    /// Build the feed source for the configured location.
    pub fn feed_source(&self) -> Result<Arc<dyn FeedSource>, FeedError> {
        Ok(match &self.location {
            FeedLocation::Http(url) => Arc::new(HttpFeedClient::new(
                url,
                self.connect_timeout,
                self.request_timeout,
            )?),
            FeedLocation::Directory(dir) => Arc::new(DirectoryFeed::new(dir.clone())),
        })
    }
}
