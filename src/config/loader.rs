//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MismoAnonConfig;
use crate::domain::errors::AnonError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Default configuration file name
pub const DEFAULT_CONFIG_PATH: &str = "mismo-anon.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MismoAnonConfig
/// 4. Applies environment variable overrides (MISMO_ANON_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a [`AnonError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, the TOML is malformed or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use mismo_anon::config::loader::load_config;
///
/// let config = load_config("mismo-anon.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MismoAnonConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AnonError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AnonError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MismoAnonConfig = toml::from_str(&contents)
        .map_err(|e| AnonError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(&mut config)?;

    Ok(config)
}

/// Loads configuration, falling back to defaults when no file is named
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
/// used when present and built-in defaults otherwise. Environment
/// overrides and validation apply in every case.
pub fn load_config_or_default(path: Option<&Path>) -> Result<MismoAnonConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            let mut config = MismoAnonConfig::default();
            finish(&mut config)?;
            Ok(config)
        }
    }
}

fn finish(config: &mut MismoAnonConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        AnonError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            result.push('\n');
        }

        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(AnonError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| AnonError::Configuration(format!("Invalid {} value: '{}'", name, value)))
}

/// Applies environment variable overrides using MISMO_ANON_* prefix
///
/// Environment variables follow the pattern: MISMO_ANON_<SECTION>_<KEY>,
/// for example `MISMO_ANON_BATCH_MAX_PARALLEL_FILES`.
fn apply_env_overrides(config: &mut MismoAnonConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("MISMO_ANON_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Anonymization overrides
    config
        .anonymization
        .apply_env_overrides()
        .map_err(|e| AnonError::Configuration(format!("{e:#}")))?;

    // Batch overrides
    if let Ok(val) = std::env::var("MISMO_ANON_BATCH_OUTPUT_SUBFOLDER") {
        config.batch.output_subfolder = val;
    }
    if let Ok(val) = std::env::var("MISMO_ANON_BATCH_MAX_PARALLEL_FILES") {
        config.batch.max_parallel_files = parse_env("MISMO_ANON_BATCH_MAX_PARALLEL_FILES", &val)?;
    }
    if let Ok(val) = std::env::var("MISMO_ANON_BATCH_OVERWRITE") {
        config.batch.overwrite = parse_env("MISMO_ANON_BATCH_OVERWRITE", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MISMO_ANON_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("MISMO_ANON_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("MISMO_ANON_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MISMO_ANON_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
