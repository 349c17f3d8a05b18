// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the ThreadFlow content planner.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level ThreadFlow configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ThreadflowConfig {
    /// Application identity and logging settings.
    #[serde(default)]
    pub app: AppConfig,

    /// AI generation collaborator (Gemini) settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Document-store backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Meta Threads publishing settings.
    #[serde(default)]
    pub threads: ThreadsConfig,

    /// Queue scheduler settings.
    #[serde(default)]
    pub queue: QueueConfig,

    /// Periodic dispatch job settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the application instance.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// The session user identifier. When unset, the static identity
    /// provider refuses to sign in.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
            user_id: None,
        }
    }
}

fn default_app_name() -> String {
    "threadflow".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// AI generation collaborator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Gemini API key. Falls back to the `GEMINI_API_KEY` environment
    /// variable when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier used for all generation calls.
    #[serde(default = "default_generator_model")]
    pub model: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_generator_model(),
        }
    }
}

fn default_generator_model() -> String {
    "gemini-2.5-flash".to_string()
}

/// Document-store backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "threadflow.db".to_string()
}

/// Meta Threads publishing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ThreadsConfig {
    /// Facebook app ID for the token exchange.
    #[serde(default)]
    pub app_id: Option<String>,

    /// Facebook app secret for the token exchange.
    #[serde(default)]
    pub app_secret: Option<String>,

    /// Graph API version segment used in request paths.
    #[serde(default = "default_graph_api_version")]
    pub graph_api_version: String,
}

impl Default for ThreadsConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_secret: None,
            graph_api_version: default_graph_api_version(),
        }
    }
}

fn default_graph_api_version() -> String {
    "v19.0".to_string()
}

/// Queue scheduler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// How many calendar days forward the slot search may walk before an
    /// entry is declared unplaceable.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,

    /// Per-workspace ceiling on AI generation calls.
    #[serde(default = "default_generation_limit")]
    pub generation_limit: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            generation_limit: default_generation_limit(),
        }
    }
}

fn default_horizon_days() -> u32 {
    365
}

fn default_generation_limit() -> u32 {
    30
}

/// Periodic dispatch job configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Whether the dispatch job runs inside `threadflow serve`.
    #[serde(default = "default_dispatch_enabled")]
    pub enabled: bool,

    /// Cron expression for the dispatch cadence (default: hourly).
    #[serde(default = "default_dispatch_cron")]
    pub cron: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            enabled: default_dispatch_enabled(),
            cron: default_dispatch_cron(),
        }
    }
}

fn default_dispatch_enabled() -> bool {
    true
}

fn default_dispatch_cron() -> String {
    "0 * * * *".to_string()
}
