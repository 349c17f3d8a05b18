// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `threadflow dispatch` command implementation: one dispatch pass, then
//! exit. Intended for external cron setups.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use threadflow_config::ThreadflowConfig;
use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::DocumentStore;
use threadflow_dispatch::DispatchJob;
use threadflow_threads::ThreadsPublisher;

use super::{init_tracing, open_storage};

/// Runs the `threadflow dispatch` command.
pub async fn run(config: ThreadflowConfig) -> Result<(), ThreadflowError> {
    init_tracing(&config.app.log_level);

    let storage = open_storage(&config).await?;

    let mut job = DispatchJob::new(storage.clone(), config.dispatch.cron.clone());
    if config.threads.app_id.is_some() {
        let publisher = ThreadsPublisher::new(&config, storage.clone())?;
        job.register_publisher(Arc::new(publisher));
    }

    let summary = job.run_pass(Utc::now().naive_utc()).await?;
    info!(?summary, "dispatch pass complete");
    println!(
        "dispatch: {} users, {} published, {} failed, {} simulated",
        summary.users, summary.published, summary.failed, summary.simulated
    );

    storage.close().await?;
    Ok(())
}
