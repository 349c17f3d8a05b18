// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.

pub mod config;
pub mod connect;
pub mod dispatch;
pub mod generate;
pub mod serve;

use std::sync::Arc;

use threadflow_config::ThreadflowConfig;
use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::DocumentStore;
use threadflow_core::types::UserId;
use threadflow_storage::SqliteDocumentStore;

/// Initialize the tracing subscriber once, honoring `RUST_LOG` over the
/// configured level.
pub fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Open and initialize the SQLite document store from config.
pub async fn open_storage(
    config: &ThreadflowConfig,
) -> Result<Arc<SqliteDocumentStore>, ThreadflowError> {
    let storage = Arc::new(SqliteDocumentStore::new(config.storage.database_path.clone()));
    storage.initialize().await?;
    Ok(storage)
}

/// The session user from config, required by the interactive commands.
pub fn session_user(config: &ThreadflowConfig) -> Result<UserId, ThreadflowError> {
    config
        .app
        .user_id
        .clone()
        .map(UserId)
        .ok_or_else(|| ThreadflowError::Config("app.user_id is required for this command".into()))
}
