// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Publisher adapter trait for social platform integrations.

use async_trait::async_trait;

use crate::error::ThreadflowError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Platform, UserId};

/// Adapter for the publishing collaborator.
///
/// Publishes a thread as a chain of sequential per-post calls, each
/// subsequent post linked to the previous one. Publishing is not atomic
/// across the chain: a failure on post N leaves posts 1..N published (the
/// prefix is never rolled back) and surfaces as
/// [`ThreadflowError::Publish`] naming how far the chain got.
#[async_trait]
pub trait Publisher: PluginAdapter {
    /// The platform this adapter publishes to.
    fn platform(&self) -> Platform;

    /// Publishes the ordered post texts as a linked chain for the given
    /// user, returning the ordered published-post identifiers.
    async fn publish_thread(
        &self,
        user: &UserId,
        texts: &[String],
        hashtags: &[String],
    ) -> Result<Vec<String>, ThreadflowError>;
}
