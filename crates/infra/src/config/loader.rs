//! Configuration loader
//!
//! Builds a [`ClientConfig`] from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment, if one exists
//! 2. Attempts to load from environment variables
//! 3. If incomplete, falls back to the first config file found by
//!    [`probe_config_paths`]
//! 4. Supports JSON and TOML formats
//!
//! Every loaded configuration is validated before it is returned.
//!
//! ## Environment Variables
//! - `BAASIC_BASE_ADDRESS`: plain base address (required)
//! - `BAASIC_SECURE_BASE_ADDRESS`: TLS base address (required)
//! - `BAASIC_APPLICATION_IDENTIFIER`: application identifier (required)
//! - `BAASIC_MEDIA_TYPE`: default media type
//! - `BAASIC_ENCODING`: default character encoding
//! - `BAASIC_TIMEOUT_SECONDS`: request timeout in seconds
//! - `BAASIC_MAX_ATTEMPTS`: transport attempts for idempotent requests
//! - `BAASIC_OMIT_NULL_FIELDS`: drop null fields from request bodies
//!   (true/false)
//!
//! ## File Locations
//! The loader probes, in order, `baasic.{json,toml}` and `config.{json,toml}`
//! in the current working directory, its parent and grandparent, then the
//! same names next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use baasic_domain::{BaasicError, ClientConfig, Result, SerializerOptions};

const CONFIG_FILE_NAMES: [&str; 4] = ["baasic.json", "baasic.toml", "config.json", "config.toml"];

const REQUIRED_VARS: [&str; 3] =
    ["BAASIC_BASE_ADDRESS", "BAASIC_SECURE_BASE_ADDRESS", "BAASIC_APPLICATION_IDENTIFIER"];

/// Load configuration with automatic fallback strategy
///
/// Files are only consulted when the required variables are not all set;
/// once they are, any problem with the environment is reported as is.
///
/// # Errors
/// Returns `BaasicError::Config` if no source yields a complete, valid
/// configuration.
pub fn load() -> Result<ClientConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    if let Some(missing) = REQUIRED_VARS.iter().find(|key| std::env::var(key).is_err()) {
        tracing::debug!(missing = %missing, "Environment incomplete, trying config file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `BaasicError::Config` if a required variable is missing, an
/// optional one cannot be parsed, or the result does not validate.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(
        env_var("BAASIC_BASE_ADDRESS")?,
        env_var("BAASIC_SECURE_BASE_ADDRESS")?,
        env_var("BAASIC_APPLICATION_IDENTIFIER")?,
    );

    if let Some(media_type) = optional_env("BAASIC_MEDIA_TYPE") {
        config = config.with_media_type(media_type);
    }
    if let Some(encoding) = optional_env("BAASIC_ENCODING") {
        config = config.with_encoding(encoding);
    }
    if let Some(seconds) = env_parse::<u64>("BAASIC_TIMEOUT_SECONDS")? {
        config = config.with_timeout(Duration::from_secs(seconds));
    }
    if let Some(attempts) = env_parse::<usize>("BAASIC_MAX_ATTEMPTS")? {
        config = config.with_max_attempts(attempts);
    }
    config = config.with_serializer(SerializerOptions {
        omit_null_fields: env_bool("BAASIC_OMIT_NULL_FIELDS", false)?,
    });

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. The format is picked
/// by file extension.
///
/// # Errors
/// Returns `BaasicError::Config` if the file is missing or unreadable, the
/// format is unsupported or invalid, or the result does not validate.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BaasicError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BaasicError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BaasicError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BaasicError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BaasicError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(BaasicError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut directories = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        directories.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            directories.push(exe_dir.to_path_buf());
        }
    }

    directories
        .iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| BaasicError::Config(format!("Missing required environment variable: {key}")))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| BaasicError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Unset or blank yields `default`; anything else is a config error.
fn env_bool(key: &str, default: bool) -> Result<bool> {
    let Some(raw) = optional_env(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(BaasicError::Config(format!("Invalid boolean for {key}: '{other}'"))),
    }
}
