// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./threadflow.toml` > `~/.config/threadflow/threadflow.toml`
//! > `/etc/threadflow/threadflow.toml` with environment variable overrides
//! via `THREADFLOW_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ThreadflowConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/threadflow/threadflow.toml` (system-wide)
/// 3. `~/.config/threadflow/threadflow.toml` (user XDG config)
/// 4. `./threadflow.toml` (local directory)
/// 5. `THREADFLOW_*` environment variables
pub fn load_config() -> Result<ThreadflowConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ThreadflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ThreadflowConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ThreadflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ThreadflowConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for
/// diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ThreadflowConfig::default()))
        .merge(Toml::file("/etc/threadflow/threadflow.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("threadflow/threadflow.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("threadflow.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay unambiguous: `THREADFLOW_GENERATOR_API_KEY` must map to
/// `generator.api_key`, not `generator.api.key`.
fn env_provider() -> Env {
    Env::prefixed("THREADFLOW_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: THREADFLOW_STORAGE_DATABASE_PATH -> "storage_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("generator_", "generator.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("threads_", "threads.", 1)
            .replacen("queue_", "queue.", 1)
            .replacen("dispatch_", "dispatch.", 1);
        mapped.into()
    })
}
