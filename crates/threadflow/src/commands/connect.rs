// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `threadflow connect` command implementation: broker the Threads token
//! exchange and store the connection in the user's workspace document.

use threadflow_config::ThreadflowConfig;
use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::DocumentStore;
use threadflow_threads::ThreadsPublisher;

use super::{init_tracing, open_storage, session_user};

/// Runs the `threadflow connect` command.
pub async fn run(config: ThreadflowConfig, token: &str) -> Result<(), ThreadflowError> {
    init_tracing(&config.app.log_level);

    let user = session_user(&config)?;
    let storage = open_storage(&config).await?;

    let publisher = ThreadsPublisher::new(&config, storage.clone())?;
    let connection = publisher.connect(&user, token).await?;
    println!(
        "connected Threads account @{} ({})",
        connection.username, connection.threads_user_id
    );

    storage.close().await?;
    Ok(())
}
