//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MyTrackerConfig;
use super::secret::secret_string;
use crate::domain::errors::MyTrackerError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "MYTRACKER";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MyTrackerConfig
/// 4. Applies environment variable overrides (MYTRACKER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use mytracker::config::loader::load_config;
///
/// let config = load_config("mytracker.toml").expect("Failed to load config");
/// println!("Account: {}", config.api.account_id);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MyTrackerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MyTrackerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MyTrackerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Parses configuration from TOML text with the same steps as [`load_config`]
pub fn load_config_from_str(contents: &str) -> Result<MyTrackerConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MyTrackerConfig = toml::from_str(&contents)
        .map_err(|e| MyTrackerError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MyTrackerError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MyTrackerError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
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
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(MyTrackerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_var(section: &str, key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{section}_{key}")).ok()
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        MyTrackerError::Configuration(format!(
            "Invalid value '{value}' for environment override {ENV_PREFIX}_{name}"
        ))
    })
}

/// Applies environment variable overrides using the MYTRACKER_* prefix
///
/// Environment variables follow the pattern: MYTRACKER_<SECTION>_<KEY>,
/// for example MYTRACKER_API_SECRET_KEY or MYTRACKER_POLLING_INTERVAL_MS.
fn apply_env_overrides(config: &mut MyTrackerConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_var("APPLICATION", "LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API overrides
    if let Some(val) = env_var("API", "BASE_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = env_var("API", "ACCOUNT_ID") {
        config.api.account_id = val;
    }
    if let Some(val) = env_var("API", "SECRET_KEY") {
        config.api.secret_key = secret_string(val);
    }
    if let Some(val) = env_var("API", "TIMEOUT_SECONDS") {
        config.api.timeout_seconds = parse_override("API_TIMEOUT_SECONDS", &val)?;
    }
    if let Some(val) = env_var("API", "DOWNLOAD_TIMEOUT_SECONDS") {
        config.api.download_timeout_seconds =
            parse_override("API_DOWNLOAD_TIMEOUT_SECONDS", &val)?;
    }

    // Polling overrides
    if let Some(val) = env_var("POLLING", "INTERVAL_MS") {
        config.polling.interval_ms = parse_override("POLLING_INTERVAL_MS", &val)?;
    }
    if let Some(val) = env_var("POLLING", "MAX_POLLS") {
        config.polling.max_polls = Some(parse_override("POLLING_MAX_POLLS", &val)?);
    }
    if let Some(val) = env_var("POLLING", "MAX_ERROR_RETRIES") {
        config.polling.max_error_retries =
            Some(parse_override("POLLING_MAX_ERROR_RETRIES", &val)?);
    }

    // Logging overrides
    if let Some(val) = env_var("LOGGING", "LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_var("LOGGING", "LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_var("LOGGING", "LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("MYTRACKER_LOADER_TEST_VAR", "test_value");
        let input = "secret_key = \"${MYTRACKER_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "secret_key = \"test_value\"");
        std::env::remove_var("MYTRACKER_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("MYTRACKER_LOADER_MISSING_VAR");
        let input = "secret_key = \"${MYTRACKER_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("MYTRACKER_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# secret_key = \"${MYTRACKER_LOADER_NEVER_SET}\"\naccount_id = \"1\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-mytracker.toml");
        assert!(matches!(result, Err(MyTrackerError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[api]
account_id = "12345"
secret_key = "s3cr3t"

[polling]
interval_ms = 250
max_polls = 40
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.api.account_id, "12345");
        assert_eq!(config.api.secret_key.expose_secret(), "s3cr3t");
        assert_eq!(config.api.base_url, "https://tracker.my.com");
        assert_eq!(config.polling.interval_ms, 250);
        assert_eq!(config.polling.max_polls, Some(40));
        assert_eq!(config.polling.max_error_retries, Some(20));
    }

    #[test]
    fn test_load_config_requires_api_section() {
        let result = load_config_from_str("[application]\nlog_level = \"info\"\n");
        assert!(matches!(result, Err(MyTrackerError::Configuration(_))));
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let toml_content = r#"
[api]
account_id = "12345"
secret_key = "s3cr3t"

[polling]
interval_ms = 0
"#;
        let err = load_config_from_str(toml_content).unwrap_err();
        assert!(err.to_string().contains("interval_ms"));
    }
}
