// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    path::{Path, PathBuf},
    str::FromStr,
};

use tokio::fs;

use eventful_core::{APP_NAME, Config as CoreConfig, get_config_dir};

const EVENTFUL_CONFIG_ENV: &str = "EVENTFUL_CONFIG";
const EVENTFUL_DEV_ENV: &str = "EVENTFUL_DEV";

const EVENTFUL_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const EVENTFUL_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Locates, reads and normalizes the configuration.
///
/// Lookup order: `path`, then `$EVENTFUL_CONFIG`, then
/// `$XDG_CONFIG_HOME/eventful/config.toml`. A missing default file yields the
/// built-in defaults, while a missing explicit file is an error.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(EVENTFUL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({EVENTFUL_DEV_ENV} is set): config must be explicitly specified via --config or {EVENTFUL_CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            return normalize(CoreConfig::default(), &config);
        }
        config
    };

    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map_err(|e| format!("Failed to parse config file at {}: {}", path.display(), e))?;
    normalize(raw.core, &path)
}

fn normalize(mut config: CoreConfig, path: &Path) -> Result<CoreConfig, Box<dyn Error>> {
    config
        .normalize()
        .map_err(|e| format!("Invalid config at {}: {}", path.display(), e))?;
    Ok(config)
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn is_dev_mode() -> Option<bool> {
    if let Ok(val) = std::env::var(EVENTFUL_DEV_ENV) {
        let lower = val.to_lowercase();
        if EVENTFUL_DEV_VALID_TRUE.contains(&lower.as_str()) {
            Some(true)
        } else if EVENTFUL_DEV_VALID_FALSE.contains(&lower.as_str()) {
            Some(false)
        } else {
            tracing::warn!(
                "Unrecognized value for {}: '{}'. Expected one of: {}. Treating as unset.",
                EVENTFUL_DEV_ENV,
                val,
                format!(
                    "true: {}, false: {}",
                    EVENTFUL_DEV_VALID_TRUE.join(", "),
                    EVENTFUL_DEV_VALID_FALSE.join(", ")
                )
            );
            None
        }
    } else {
        None
    }
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::OnceLock;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn write_config(path: &Path, base_url: &str) {
        let toml_content = format!(
            r#"
[core]
base_url = "{base_url}"
state_dir = "/tmp/eventful-test"
"#
        );
        fs::write(path, toml_content).unwrap();
    }

    #[tokio::test]
    async fn cli_flag_overrides_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        write_config(&config_path, "http://cli.test");
        let env_path = temp_dir.path().join("env_config.toml");
        write_config(&env_path, "http://env.test");

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(EVENTFUL_DEV_ENV);
                std::env::set_var(EVENTFUL_CONFIG_ENV, env_path.to_str().unwrap());
            }

            let config = parse_config(Some(config_path.clone())).await.unwrap();

            assert_eq!(config.base_url, "http://cli.test");

            unsafe {
                std::env::remove_var(EVENTFUL_CONFIG_ENV);
            }
        }
    }

    #[tokio::test]
    async fn env_var_overrides_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let env_config_path = temp_dir.path().join("env_config.toml");
        write_config(&env_config_path, "http://env.test");

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(EVENTFUL_DEV_ENV);
                std::env::set_var(EVENTFUL_CONFIG_ENV, env_config_path.to_str().unwrap());
            }

            let config = parse_config(None).await.unwrap();

            assert_eq!(config.base_url, "http://env.test");

            unsafe {
                std::env::remove_var(EVENTFUL_CONFIG_ENV);
            }
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn uses_default_path_when_no_cli_or_env() {
        let temp_dir = TempDir::new().unwrap();
        let default_config_dir = temp_dir.path().join("eventful");
        fs::create_dir_all(&default_config_dir).unwrap();
        write_config(&default_config_dir.join("config.toml"), "http://default.test");

        let xdg_config_home = temp_dir.path().to_str().unwrap().to_string();
        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(EVENTFUL_CONFIG_ENV);
                std::env::remove_var(EVENTFUL_DEV_ENV);
                std::env::set_var("XDG_CONFIG_HOME", xdg_config_home);
            }

            let config = parse_config(None).await.unwrap();

            assert_eq!(config.base_url, "http://default.test");

            unsafe {
                std::env::remove_var("XDG_CONFIG_HOME");
            }
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_default_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let xdg_config_home = temp_dir.path().to_str().unwrap().to_string();
        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(EVENTFUL_CONFIG_ENV);
                std::env::remove_var(EVENTFUL_DEV_ENV);
                std::env::set_var("XDG_CONFIG_HOME", xdg_config_home);
            }

            let config = parse_config(None).await.unwrap();

            assert_eq!(config.base_url, "http://localhost:4000");

            unsafe {
                std::env::remove_var("XDG_CONFIG_HOME");
            }
        }
    }

    #[tokio::test]
    async fn missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let _guard = env_lock().lock().await;
        let result = parse_config(Some(path.clone())).await;

        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains(path.to_str().unwrap()));
    }

    #[tokio::test]
    async fn parses_durations() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[core]
base_url = "http://events.test/"
timeout = "10s"
stale_time = "1m"
gc_time = "00:10"
state_dir = "/tmp/eventful-test"
"#,
        )
        .unwrap();

        let _guard = env_lock().lock().await;
        let config = parse_config(Some(path)).await.unwrap();

        assert_eq!(config.base_url, "http://events.test");
        assert_eq!(config.api_config().timeout_secs, 10);
        let options = config.query_options();
        assert_eq!(options.stale_time, Duration::from_secs(60));
        assert_eq!(options.gc_time, Duration::from_secs(600));
    }

    #[tokio::test]
    async fn invalid_config_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[core]\nbase_url = \"   \"\n").unwrap();

        let _guard = env_lock().lock().await;
        let result = parse_config(Some(path.clone())).await;

        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("Invalid config"));
        assert!(error_msg.contains(path.to_str().unwrap()));
    }

    #[tokio::test]
    async fn eventful_dev_true_disables_default_discovery() {
        for value in ["1", "true", "yes", "TRUE"] {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(EVENTFUL_CONFIG_ENV);
                std::env::set_var(EVENTFUL_DEV_ENV, value);
            }

            let result = parse_config(None).await;

            let error_msg = result.unwrap_err().to_string();
            assert!(error_msg.contains("Development environment detected"));
            assert!(error_msg.contains(EVENTFUL_DEV_ENV));

            unsafe {
                std::env::remove_var(EVENTFUL_DEV_ENV);
            }
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn eventful_dev_false_allows_default_discovery() {
        let temp_dir = TempDir::new().unwrap();
        let default_config_dir = temp_dir.path().join("eventful");
        fs::create_dir_all(&default_config_dir).unwrap();
        write_config(&default_config_dir.join("config.toml"), "http://default.test");

        let xdg_config_home = temp_dir.path().to_str().unwrap().to_string();
        for value in ["0", "false", "No", "invalid"] {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(EVENTFUL_CONFIG_ENV);
                std::env::set_var("XDG_CONFIG_HOME", &xdg_config_home);
                std::env::set_var(EVENTFUL_DEV_ENV, value);
            }

            let config = parse_config(None).await.unwrap();
            assert_eq!(config.base_url, "http://default.test");

            unsafe {
                std::env::remove_var(EVENTFUL_DEV_ENV);
                std::env::remove_var("XDG_CONFIG_HOME");
            }
        }
    }

    #[tokio::test]
    async fn eventful_dev_cli_flag_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        write_config(&config_path, "http://cli.test");

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::set_var(EVENTFUL_DEV_ENV, "1");
            }

            let config = parse_config(Some(config_path)).await.unwrap();
            assert_eq!(config.base_url, "http://cli.test");

            unsafe {
                std::env::remove_var(EVENTFUL_DEV_ENV);
            }
        }
    }
}
