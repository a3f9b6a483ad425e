// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eventful_api::ApiConfig;
use serde::de;

use crate::query::QueryOptions;

/// The name of the Eventful application.
pub const APP_NAME: &str = "eventful";

/// Configuration for the Eventful application.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Base URL of the events backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout.
    #[serde(default)]
    pub timeout: Option<ConfigDuration>,

    /// How long fetched data is served without refetching.
    #[serde(default)]
    pub stale_time: Option<ConfigDuration>,

    /// How long unobserved cache entries are kept.
    #[serde(default)]
    pub gc_time: Option<ConfigDuration>,

    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: None,
            stale_time: None,
            gc_time: None,
            state_dir: None,
        }
    }
}

impl Config {
    /// Normalize the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the state directory cannot be expanded.
    #[tracing::instrument(skip(self))]
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        let base_url = self.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err("Base URL must not be empty".into());
        }
        self.base_url = base_url.to_string();

        // Normalize state directory
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                );
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        }

        Ok(())
    }

    /// Settings of the HTTP client.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::with_base_url(self.base_url.clone());
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout.get().as_secs();
        }
        config
    }

    /// Timings of the query cache.
    #[must_use]
    pub fn query_options(&self) -> QueryOptions {
        let defaults = QueryOptions::default();
        QueryOptions {
            stale_time: self.stale_time.map_or(defaults.stale_time, ConfigDuration::get),
            gc_time: self.gc_time.map_or(defaults.gc_time, ConfigDuration::get),
        }
    }
}

fn default_base_url() -> String {
    eventful_api::DEFAULT_BASE_URL.to_string()
}

/// A duration written as `"HH:MM"`, `"1d"`, `"24h"`, `"60m"` or `"1800s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDuration(Duration);

impl ConfigDuration {
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    #[must_use]
    pub const fn get(self) -> Duration {
        self.0
    }
}

impl<'de> serde::Deserialize<'de> for ConfigDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DurationVisitor;

        impl de::Visitor<'_> for DurationVisitor {
            type Value = ConfigDuration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str(r#"a duration string like "HH:MM", "1d", "24h", "60m", or "1800s""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(ConfigDuration)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8 or the home directory is unknown.
pub fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or_else(|| "User-specific home directory not found".into())
}

/// The user's configuration directory.
///
/// # Errors
///
/// Returns an error if the directory is unknown.
pub fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(not(unix))]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| "User-specific state directory not found".into())
}

/// Parse a duration string in the format "HH:MM" / "1d" / "24h" / "60m" / "1800s".
fn parse_duration(s: &str) -> Result<Duration, Box<dyn Error>> {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    let secs = if let Some((h, m)) = s.split_once(':') {
        // "HH:MM" format
        let hours: u64 = h.trim().parse()?;
        let minutes: u64 = m.trim().parse()?;
        hours * HOUR + minutes * MINUTE
    } else if let Some(rest) = s.strip_suffix('d') {
        rest.trim().parse::<u64>()? * DAY
    } else if let Some(rest) = s.strip_suffix('h') {
        rest.trim().parse::<u64>()? * HOUR
    } else if let Some(rest) = s.strip_suffix('m') {
        rest.trim().parse::<u64>()? * MINUTE
    } else if let Some(rest) = s.strip_suffix('s') {
        rest.trim().parse::<u64>()?
    } else {
        return Err(format!("Invalid duration format: {s}").into());
    };
    Ok(Duration::from_secs(secs))
}
