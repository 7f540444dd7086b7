//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::OntexConfig;
use crate::domain::errors::OntexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into OntexConfig
/// 4. Applies environment variable overrides (ONTEX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use ontex::config::loader::load_config;
///
/// let config = load_config("ontex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<OntexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(OntexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        OntexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: OntexConfig = toml::from_str(&contents)
        .map_err(|e| OntexError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        OntexError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| OntexError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
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
        return Err(OntexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using ONTEX_* prefix
///
/// Environment variables follow the pattern: ONTEX_<SECTION>_<KEY>
/// For example: ONTEX_GRAPHSTORE_BASE_URL, ONTEX_STORAGE_CACHE_DIR
fn apply_env_overrides(config: &mut OntexConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("ONTEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Registry overrides
    if let Ok(val) = std::env::var("ONTEX_REGISTRY_ROOT") {
        config.registry.root = val;
    }

    // Storage overrides
    if let Ok(val) = std::env::var("ONTEX_STORAGE_CACHE_DIR") {
        config.storage.cache_dir = val;
    }

    // Graph store overrides
    if let Ok(val) = std::env::var("ONTEX_GRAPHSTORE_BASE_URL") {
        config.graphstore.base_url = val;
    }
    if let Ok(val) = std::env::var("ONTEX_GRAPHSTORE_DATABASE") {
        config.graphstore.database = val;
    }
    if let Ok(val) = std::env::var("ONTEX_GRAPHSTORE_USERNAME") {
        config.graphstore.username = val;
    }
    if let Ok(val) = std::env::var("ONTEX_GRAPHSTORE_PASSWORD") {
        config.graphstore.password = super::secret_string(val);
    }
    if let Ok(val) = std::env::var("ONTEX_GRAPHSTORE_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.graphstore.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("ONTEX_GRAPHSTORE_FETCH_BASE_URL") {
        config.graphstore.fetch_base_url = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("ONTEX_EXPORT_GENERATION_WORKERS") {
        if let Ok(workers) = val.parse() {
            config.export.generation_workers = workers;
        }
    }
    if let Ok(val) = std::env::var("ONTEX_EXPORT_TRANSFER_WORKERS") {
        if let Ok(workers) = val.parse() {
            config.export.transfer_workers = workers;
        }
    }
    if let Ok(val) = std::env::var("ONTEX_EXPORT_LOCK_STRIPES") {
        if let Ok(stripes) = val.parse() {
            config.export.lock_stripes = stripes;
        }
    }
    if let Ok(val) = std::env::var("ONTEX_EXPORT_MODULE_ROOT") {
        config.export.module_root = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ONTEX_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("ONTEX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
