//! Configuration loader
//!
//! ## Loading Strategy
//! 1. `DOCTORFINDER_CONFIG` names a file: load it
//! 2. Otherwise probe the standard locations for a config file
//! 3. Otherwise start from the defaults
//!
//! Environment variables are applied last, so a set variable always wins over
//! the file. Both file formats (JSON and TOML) are supported, detected by
//! extension.
//!
//! ## Environment Variables
//! - `PORT`: Record API listen port
//! - `DOCTORFINDER_ENV`: `development` or `production` (falls back to
//!   `NODE_ENV`)
//! - `DOCTORFINDER_DB_PATH`: Database file path
//! - `DOCTORFINDER_DB_POOL_SIZE`: Connection pool size
//! - `DOCTORFINDER_API_URL`: Record API base URL for the client
//! - `DOCTORFINDER_STORAGE_PATH`: Client local storage file
//! - `DOCTORFINDER_IDENTITY_API_KEY`, `DOCTORFINDER_IDENTITY_PROJECT_ID` and
//!   the other `DOCTORFINDER_IDENTITY_*` settings: identity service, known up
//!   front
//! - `DOCTORFINDER_IDENTITY_CONFIG_URL`: identity service settings fetched on
//!   first use
//!
//! ## File Locations
//! The loader probes `doctorfinder.{json,toml}` and `config.{json,toml}` in
//! the working directory, its parent, and next to the executable.

use std::path::{Path, PathBuf};

use doctorfinder_domain::{Config, DoctorFinderError, Environment, Result, ServiceConfig};

const CONFIG_FILE_VAR: &str = "DOCTORFINDER_CONFIG";
const CONFIG_FILE_NAMES: [&str; 4] =
    ["doctorfinder.json", "doctorfinder.toml", "config.json", "config.toml"];

/// Load configuration with the strategy above.
///
/// # Errors
/// Returns `DoctorFinderError::Config` if the named file is missing or
/// malformed, or an environment variable holds an invalid value.
pub fn load() -> Result<Config> {
    let file = match std::env::var_os(CONFIG_FILE_VAR) {
        Some(path) => Some(PathBuf::from(path)),
        None => probe_config_paths(),
    };

    let Some(path) = file else {
        let config = load_from_env()?;
        tracing::debug!("Configuration loaded from environment variables");
        return Ok(config);
    };

    let mut config = load_from_file(Some(path))?;
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from environment variables.
///
/// Unset variables take their defaults; set-but-invalid ones are errors.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Overwrite every setting whose environment variable is set.
///
/// # Errors
/// Returns `DoctorFinderError::Config` for a set variable that does not
/// parse, or for identity settings that name only one of the API key and the
/// project id.
fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(value) = optional_env("PORT") {
        config.server.port = value
            .parse::<u16>()
            .map_err(|e| DoctorFinderError::Config(format!("Invalid port: {}", e)))?;
    }

    if let Some(value) = optional_env("DOCTORFINDER_ENV").or_else(|| optional_env("NODE_ENV")) {
        config.server.environment = Environment::parse(&value).ok_or_else(|| {
            DoctorFinderError::Config(format!("Invalid environment: {}", value))
        })?;
    }

    if let Some(value) = optional_env("DOCTORFINDER_DB_PATH") {
        config.database.path = value;
    }
    if let Some(value) = optional_env("DOCTORFINDER_DB_POOL_SIZE") {
        config.database.pool_size = value
            .parse::<u32>()
            .map_err(|e| DoctorFinderError::Config(format!("Invalid pool size: {}", e)))?;
    }

    if let Some(value) = optional_env("DOCTORFINDER_API_URL") {
        config.client.api_url = value;
    }
    if let Some(value) = optional_env("DOCTORFINDER_STORAGE_PATH") {
        config.client.storage_path = value;
    }

    if let Some(service) = service_config_from_env()? {
        config.identity.service = Some(service);
    }
    if let Some(value) = optional_env("DOCTORFINDER_IDENTITY_CONFIG_URL") {
        config.identity.config_url = Some(value);
    }

    Ok(())
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `DoctorFinderError::Config` if no file is found or it cannot be
/// parsed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DoctorFinderError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DoctorFinderError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DoctorFinderError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration content; format is chosen by extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DoctorFinderError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DoctorFinderError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(DoctorFinderError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Eager identity settings. Both the API key and the project id must be
/// present for the settings to exist at all; one without the other is an
/// error.
fn service_config_from_env() -> Result<Option<ServiceConfig>> {
    let api_key = optional_env("DOCTORFINDER_IDENTITY_API_KEY");
    let project_id = optional_env("DOCTORFINDER_IDENTITY_PROJECT_ID");

    let (api_key, project_id) = match (api_key, project_id) {
        (None, None) => return Ok(None),
        (Some(api_key), Some(project_id)) => (api_key, project_id),
        (Some(_), None) => return Err(missing("DOCTORFINDER_IDENTITY_PROJECT_ID")),
        (None, Some(_)) => return Err(missing("DOCTORFINDER_IDENTITY_API_KEY")),
    };

    let mut service = ServiceConfig::new(api_key, project_id);
    if let Some(value) = optional_env("DOCTORFINDER_IDENTITY_AUTH_DOMAIN") {
        service.auth_domain = value;
    }
    if let Some(value) = optional_env("DOCTORFINDER_IDENTITY_STORAGE_BUCKET") {
        service.storage_bucket = value;
    }
    if let Some(value) = optional_env("DOCTORFINDER_IDENTITY_MESSAGING_SENDER_ID") {
        service.messaging_sender_id = value;
    }
    if let Some(value) = optional_env("DOCTORFINDER_IDENTITY_APP_ID") {
        service.app_id = value;
    }
    service.measurement_id = optional_env("DOCTORFINDER_IDENTITY_MEASUREMENT_ID");
    if let Some(value) = optional_env("DOCTORFINDER_IDENTITY_IDENTITY_ENDPOINT") {
        service.identity_endpoint = value.trim_end_matches('/').to_string();
    }
    if let Some(value) = optional_env("DOCTORFINDER_IDENTITY_TOKEN_ENDPOINT") {
        service.token_endpoint = value.trim_end_matches('/').to_string();
    }
    if let Some(value) = optional_env("DOCTORFINDER_IDENTITY_DOCUMENT_ENDPOINT") {
        service.document_endpoint = value.trim_end_matches('/').to_string();
    }

    Ok(Some(service))
}

// Empty values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn missing(key: &str) -> DoctorFinderError {
    DoctorFinderError::Config(format!("Missing required environment variable: {}", key))
}
