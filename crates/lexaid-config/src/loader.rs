// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lexaid.toml` > `~/.config/lexaid/lexaid.toml` > `/etc/lexaid/lexaid.toml`
//! with environment variable overrides via `LEXAID_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LexaidConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/lexaid/lexaid.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "lexaid.toml";

/// User configuration file under the XDG config directory, if one can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lexaid/lexaid.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lexaid/lexaid.toml` (system-wide)
/// 3. `~/.config/lexaid/lexaid.toml` (user XDG config)
/// 4. `./lexaid.toml` (local directory)
/// 5. `LEXAID_*` environment variables
pub fn load_config() -> Result<LexaidConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LexaidConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LexaidConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LexaidConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LexaidConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LexaidConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LEXAID_SERVICE_BASE_URL` must map to `service.base_url`,
/// not `service.base.url`.
fn env_provider() -> Env {
    Env::prefixed("LEXAID_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("service_", "service.", 1)
            .replacen("workflow_", "workflow.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
