// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `threadflow generate` command implementation: draft a thread from an
//! idea through the session store, print it, and optionally queue it.

use std::sync::Arc;

use threadflow_config::ThreadflowConfig;
use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::DocumentStore;
use threadflow_core::types::AccountId;
use threadflow_gemini::GeminiGenerator;
use threadflow_store::ContentStore;

use super::{init_tracing, open_storage, session_user};

/// Runs the `threadflow generate` command.
pub async fn run(
    config: ThreadflowConfig,
    idea: &str,
    queue_for: Option<i64>,
) -> Result<(), ThreadflowError> {
    init_tracing(&config.app.log_level);

    let user = session_user(&config)?;
    let storage = open_storage(&config).await?;
    let generator = Arc::new(GeminiGenerator::new(&config)?);

    let mut store = ContentStore::sign_in(
        user,
        generator,
        storage.clone(),
        config.queue.horizon_days,
        config.queue.generation_limit,
    )
    .await?;

    store.generate_thread(idea).await?;
    if let Some(draft) = store.draft() {
        println!("{}", draft.title);
        println!();
        for (n, post) in draft.posts.iter().enumerate() {
            println!("{}. {}", n + 1, post.text);
        }
        if !draft.hashtags.is_empty() {
            let tags: Vec<String> = draft.hashtags.iter().map(|t| format!("#{t}")).collect();
            println!();
            println!("{}", tags.join(" "));
        }
    }

    if let Some(account) = queue_for {
        let id = store.queue_draft(AccountId(account), None).await?;
        println!();
        println!("queued as {}", id.0);
    }

    storage.close().await?;
    Ok(())
}
