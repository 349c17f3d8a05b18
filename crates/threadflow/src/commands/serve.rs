// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `threadflow serve` command implementation.
//!
//! Starts the dispatch daemon: the SQLite document store, the configured
//! publishing adapters, and the cron-driven dispatch job. Supports graceful
//! shutdown via ctrl-c.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use threadflow_config::ThreadflowConfig;
use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::DocumentStore;
use threadflow_dispatch::DispatchJob;
use threadflow_threads::ThreadsPublisher;

use super::{init_tracing, open_storage};

/// Runs the `threadflow serve` command.
pub async fn run(config: ThreadflowConfig) -> Result<(), ThreadflowError> {
    init_tracing(&config.app.log_level);
    info!("starting threadflow serve");

    let storage = open_storage(&config).await?;

    let mut job = DispatchJob::new(storage.clone(), config.dispatch.cron.clone());
    if config.threads.app_id.is_some() {
        let publisher = ThreadsPublisher::new(&config, storage.clone())?;
        job.register_publisher(Arc::new(publisher));
        info!("Threads publisher registered");
    } else {
        warn!("threads credentials not configured; Threads publishes will be simulated");
    }

    let shutdown = CancellationToken::new();
    let job_token = shutdown.clone();
    let job_handle = if config.dispatch.enabled {
        Some(tokio::spawn(async move { job.run(job_token).await }))
    } else {
        warn!("dispatch is disabled; serve will idle until interrupted");
        None
    };

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| ThreadflowError::Internal(format!("failed to listen for ctrl-c: {e}")))?;
    info!("shutdown signal received");
    shutdown.cancel();

    if let Some(handle) = job_handle {
        handle
            .await
            .map_err(|e| ThreadflowError::Internal(format!("dispatch task panicked: {e}")))??;
    }

    storage.close().await?;
    info!("threadflow serve stopped");
    Ok(())
}
