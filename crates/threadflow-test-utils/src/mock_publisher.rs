// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock publishing adapter that records calls instead of hitting a platform.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::adapter::PluginAdapter;
use threadflow_core::traits::publisher::Publisher;
use threadflow_core::types::{AdapterType, HealthStatus, Platform, UserId};

/// One captured publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedThread {
    pub user: UserId,
    pub texts: Vec<String>,
    pub hashtags: Vec<String>,
}

/// A mock publishing collaborator that captures every publish call.
///
/// By default every call succeeds, returning one synthetic ID per post.
/// `fail_after(n)` makes calls fail after the first `n` posts of the chain
/// have gone out, matching the partial-publish semantics of the real
/// platform (the prefix stays published).
pub struct MockPublisher {
    platform: Platform,
    published: Arc<Mutex<Vec<PublishedThread>>>,
    fail_after: Arc<Mutex<Option<usize>>>,
}

impl MockPublisher {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            published: Arc::new(Mutex::new(Vec::new())),
            fail_after: Arc::new(Mutex::new(None)),
        }
    }

    /// Make subsequent publish calls fail once `n` posts of the chain have
    /// been published.
    pub async fn fail_after(&self, n: usize) {
        *self.fail_after.lock().await = Some(n);
    }

    /// All captured publish calls, in order.
    pub async fn published(&self) -> Vec<PublishedThread> {
        self.published.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockPublisher {
    fn name(&self) -> &str {
        "mock-publisher"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Publisher
    }

    async fn health_check(&self) -> Result<HealthStatus, ThreadflowError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ThreadflowError> {
        Ok(())
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn publish_thread(
        &self,
        user: &UserId,
        texts: &[String],
        hashtags: &[String],
    ) -> Result<Vec<String>, ThreadflowError> {
        let fail_after = *self.fail_after.lock().await;

        if let Some(limit) = fail_after {
            if texts.len() > limit {
                // The prefix is "published" before the chain breaks.
                let partial = PublishedThread {
                    user: user.clone(),
                    texts: texts[..limit].to_vec(),
                    hashtags: hashtags.to_vec(),
                };
                self.published.lock().await.push(partial);
                return Err(ThreadflowError::Publish {
                    message: format!(
                        "published {limit} of {} posts before the chain failed",
                        texts.len()
                    ),
                    source: None,
                });
            }
        }

        self.published.lock().await.push(PublishedThread {
            user: user.clone(),
            texts: texts.to_vec(),
            hashtags: hashtags.to_vec(),
        });
        Ok((0..texts.len())
            .map(|n| format!("mock-post-{n}"))
            .collect())
    }
}
