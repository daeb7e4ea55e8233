//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DoajSyncConfig;
use crate::domain::errors::DoajSyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// Loading is three-phase:
/// 1. Read the file and substitute `${VAR}` environment references
/// 2. Parse the TOML into [`DoajSyncConfig`]
/// 3. Apply `DOAJSYNC_*` environment overrides and validate
///
/// # Errors
///
/// Returns a `Configuration` error if the file is missing or unreadable, a
/// referenced environment variable is unset, the TOML is malformed, or
/// validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<DoajSyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DoajSyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DoajSyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: DoajSyncConfig = toml::from_str(&contents)
        .map_err(|e| DoajSyncError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        DoajSyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. Missing variables are collected and
/// reported together.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DoajSyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the DOAJSYNC_ prefix
///
/// Pattern: `DOAJSYNC_<SECTION>_<KEY>`, e.g. `DOAJSYNC_DOAJ_BASE_URL`.
fn apply_env_overrides(config: &mut DoajSyncConfig) {
    if let Ok(val) = std::env::var("DOAJSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("DOAJSYNC_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("DOAJSYNC_DOAJ_BASE_URL") {
        config.doaj.base_url = val;
    }
    if let Ok(val) = std::env::var("DOAJSYNC_DOAJ_API_VERSION") {
        config.doaj.api_version = val;
    }
    if let Ok(val) = std::env::var("DOAJSYNC_DOAJ_API_TOKEN") {
        config.doaj.api_token = super::secret::secret_string(val);
    }
    if let Ok(val) = std::env::var("DOAJSYNC_DOAJ_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.doaj.page_size = size;
        }
    }
    if let Ok(val) = std::env::var("DOAJSYNC_DOAJ_THROTTLE_MS") {
        if let Ok(ms) = val.parse() {
            config.doaj.throttle_ms = ms;
        }
    }
    if let Ok(val) = std::env::var("DOAJSYNC_DOAJ_PUSH_ENABLED") {
        config.doaj.push_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("DOAJSYNC_DOAJ_RETRY_MAX_ATTEMPTS") {
        if let Ok(attempts) = val.parse() {
            config.doaj.retry.max_attempts = attempts;
        }
    }

    if let Ok(val) = std::env::var("DOAJSYNC_LOGGING_FILE_ENABLED") {
        config.logging.file_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DOAJSYNC_LOGGING_FILE_PATH") {
        config.logging.file_path = val;
    }
}
