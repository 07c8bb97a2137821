//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PROMOBOARD_REMOTE_BASE_URL`: Remote store REST endpoint (required)
//! - `PROMOBOARD_REMOTE_API_KEY`: Project api key (optional)
//! - `PROMOBOARD_REMOTE_TIMEOUT_SECS`: Per-request timeout (optional)
//! - `PROMOBOARD_SELECTIONS_PATH`: Saved-selections file path (optional)
//! - `PROMOBOARD_BIND_ADDR`: HTTP bind address (optional)

use std::path::{Path, PathBuf};

use promoboard_domain::{
    Config, PromoboardError, RemoteConfig, Result, SelectionsConfig, ServerConfig,
};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `PromoboardError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `PromoboardError::Config` if `PROMOBOARD_REMOTE_BASE_URL` is
/// missing or a numeric variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("PROMOBOARD_REMOTE_BASE_URL")?;
    let api_key = std::env::var("PROMOBOARD_REMOTE_API_KEY").ok();

    let timeout_seconds = match std::env::var("PROMOBOARD_REMOTE_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| PromoboardError::Config(format!("Invalid timeout: {e}")))?,
        Err(_) => RemoteConfig::default().timeout_seconds,
    };

    let selections = match std::env::var("PROMOBOARD_SELECTIONS_PATH") {
        Ok(path) => SelectionsConfig { path },
        Err(_) => SelectionsConfig::default(),
    };

    let server = match std::env::var("PROMOBOARD_BIND_ADDR") {
        Ok(bind_addr) => ServerConfig { bind_addr },
        Err(_) => ServerConfig::default(),
    };

    Ok(Config {
        remote: RemoteConfig { base_url, api_key, timeout_seconds },
        selections,
        server,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PromoboardError::Config` if no file is found or the contents do
/// not parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PromoboardError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PromoboardError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PromoboardError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PromoboardError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PromoboardError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PromoboardError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the working directory, its parents, and the executable directory
/// for `config.{json,toml}` / `promoboard.{json,toml}`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let names = ["config.json", "config.toml", "promoboard.json", "promoboard.toml"];
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for base in [cwd.clone(), cwd.join(".."), cwd.join("../..")] {
            for name in names {
                candidates.push(base.join(name));
            }
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            for name in names {
                candidates.push(exe_dir.join(name));
            }
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        PromoboardError::Config(format!("Missing required environment variable: {key}"))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_env() {
        for key in [
            "PROMOBOARD_REMOTE_BASE_URL",
            "PROMOBOARD_REMOTE_API_KEY",
            "PROMOBOARD_REMOTE_TIMEOUT_SECS",
            "PROMOBOARD_SELECTIONS_PATH",
            "PROMOBOARD_BIND_ADDR",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn loads_from_env_with_defaults_for_optionals() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("PROMOBOARD_REMOTE_BASE_URL", "https://store.example.co/rest/v1");
        std::env::set_var("PROMOBOARD_REMOTE_API_KEY", "anon-key");

        let config = load_from_env().expect("config should load");
        assert_eq!(config.remote.base_url, "https://store.example.co/rest/v1");
        assert_eq!(config.remote.api_key.as_deref(), Some("anon-key"));
        assert_eq!(config.remote.timeout_seconds, 30);
        assert_eq!(config.selections.path, "selections.json");

        clear_env();
    }

    #[test]
    fn missing_base_url_is_a_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let result = load_from_env();
        assert!(matches!(result, Err(PromoboardError::Config(_))));
    }

    #[test]
    fn invalid_timeout_is_a_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("PROMOBOARD_REMOTE_BASE_URL", "https://store.example.co/rest/v1");
        std::env::set_var("PROMOBOARD_REMOTE_TIMEOUT_SECS", "not-a-number");

        let result = load_from_env();
        assert!(matches!(result, Err(PromoboardError::Config(_))));

        clear_env();
    }

    #[test]
    fn loads_json_file() {
        let json_content = r#"{
            "remote": {
                "base_url": "https://store.example.co/rest/v1",
                "api_key": "anon-key",
                "timeout_seconds": 10
            },
            "selections": { "path": "data/selections.json" },
            "server": { "bind_addr": "0.0.0.0:9000" }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("json config should load");
        assert_eq!(config.remote.timeout_seconds, 10);
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn loads_toml_file() {
        let toml_content = r#"
[remote]
base_url = "https://store.example.co/rest/v1"
timeout_seconds = 15

[selections]
path = "selections.json"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("toml config should load");
        assert_eq!(config.remote.timeout_seconds, 15);
        assert!(config.remote.api_key.is_none());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(PromoboardError::Config(_))));
    }

    #[test]
    fn unsupported_extension_is_a_config_error() {
        let result = parse_config("whatever", &PathBuf::from("config.yaml"));
        assert!(matches!(result, Err(PromoboardError::Config(_))));
    }
}
