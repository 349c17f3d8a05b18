// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `threadflow config` command implementation: print the validated
//! effective configuration.

use threadflow_config::ThreadflowConfig;
use threadflow_core::error::ThreadflowError;

/// Runs the `threadflow config` command.
pub fn run(config: ThreadflowConfig) -> Result<(), ThreadflowError> {
    println!("app.name              = {}", config.app.name);
    println!("app.log_level         = {}", config.app.log_level);
    println!(
        "app.user_id           = {}",
        config.app.user_id.as_deref().unwrap_or("<unset>")
    );
    println!("generator.model       = {}", config.generator.model);
    println!(
        "generator.api_key     = {}",
        if config.generator.api_key.is_some() { "<set>" } else { "<unset>" }
    );
    println!("storage.database_path = {}", config.storage.database_path);
    println!(
        "threads.app_id        = {}",
        config.threads.app_id.as_deref().unwrap_or("<unset>")
    );
    println!("queue.horizon_days    = {}", config.queue.horizon_days);
    println!("queue.generation_limit = {}", config.queue.generation_limit);
    println!("dispatch.enabled      = {}", config.dispatch.enabled);
    println!("dispatch.cron         = {}", config.dispatch.cron);
    Ok(())
}
