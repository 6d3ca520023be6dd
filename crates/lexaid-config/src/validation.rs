// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde attributes cannot express: a usable service
//! URL, a non-zero timeout and a known log level.

use url::Url;

use crate::diagnostic::ConfigError;
use crate::model::LexaidConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &LexaidConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Err(message) = check_base_url(&config.service.base_url) {
        errors.push(ConfigError::Validation {
            key: "service.base_url".to_string(),
            message,
        });
    }

    if config.service.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            key: "service.timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    if config.service.user_agent.trim().is_empty() {
        errors.push(ConfigError::Validation {
            key: "service.user_agent".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    let level = config.logging.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            key: "logging.log_level".to_string(),
            message: format!(
                "`{}` is not one of {}",
                config.logging.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Same `url` parsing the HTTP client applies to its base URL.
fn check_base_url(raw: &str) -> Result<(), String> {
    if raw.chars().any(char::is_whitespace) {
        return Err(format!("`{raw}` contains whitespace"));
    }
    let url = Url::parse(raw).map_err(|e| format!("`{raw}` is not a valid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("`{raw}` must use http or https, not `{other}`")),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("`{raw}` has no host"));
    }
    Ok(())
}
