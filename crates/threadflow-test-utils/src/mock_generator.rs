// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock AI generation adapter for deterministic testing.
//!
//! `MockGenerator` implements `ContentGenerator` with pre-configured
//! threads, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::adapter::PluginAdapter;
use threadflow_core::traits::generator::ContentGenerator;
use threadflow_core::types::{
    AdapterType, GeneratedThread, HealthStatus, PostSegment, ThreadPrompt, VoiceProfile,
    VoiceSample,
};
use threadflow_core::IdGenerator;

/// A mock generation collaborator that returns pre-configured threads.
///
/// Threads are popped from a FIFO queue. When the queue is empty, a default
/// two-post thread built from the prompt's idea is returned. Set
/// `fail_next` to make the next call fail the way a real provider outage
/// would.
pub struct MockGenerator {
    threads: Arc<Mutex<VecDeque<GeneratedThread>>>,
    calls: AtomicUsize,
    fail_next: Arc<Mutex<Option<String>>>,
    ids: IdGenerator,
}

impl MockGenerator {
    /// Create a new mock generator with an empty thread queue.
    pub fn new() -> Self {
        Self {
            threads: Arc::new(Mutex::new(VecDeque::new())),
            calls: AtomicUsize::new(0),
            fail_next: Arc::new(Mutex::new(None)),
            ids: IdGenerator::new(),
        }
    }

    /// Create a mock generator pre-loaded with the given threads.
    pub fn with_threads(threads: Vec<GeneratedThread>) -> Self {
        Self {
            threads: Arc::new(Mutex::new(VecDeque::from(threads))),
            calls: AtomicUsize::new(0),
            fail_next: Arc::new(Mutex::new(None)),
            ids: IdGenerator::new(),
        }
    }

    /// Make the next generation call fail with the given message.
    pub async fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock().await = Some(message.into());
    }

    /// Number of generation calls made so far (all three operations).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn check_failure(&self) -> Result<(), ThreadflowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_next.lock().await.take() {
            return Err(ThreadflowError::Provider {
                message,
                source: None,
            });
        }
        Ok(())
    }

    fn default_thread(&self, idea: &str) -> GeneratedThread {
        GeneratedThread {
            title: format!("Mock thread: {idea}"),
            posts: vec![
                PostSegment {
                    id: self.ids.segment(),
                    text: format!("Opening post about {idea}"),
                },
                PostSegment {
                    id: self.ids.segment(),
                    text: "Closing post".to_string(),
                },
            ],
            hashtags: vec!["mock".to_string()],
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockGenerator {
    fn name(&self) -> &str {
        "mock-generator"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generator
    }

    async fn health_check(&self) -> Result<HealthStatus, ThreadflowError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ThreadflowError> {
        Ok(())
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn generate_thread(
        &self,
        prompt: ThreadPrompt,
    ) -> Result<GeneratedThread, ThreadflowError> {
        self.check_failure().await?;
        let thread = self.threads.lock().await.pop_front();
        Ok(thread.unwrap_or_else(|| self.default_thread(&prompt.idea)))
    }

    async fn analyze_voice(
        &self,
        samples: &[VoiceSample],
    ) -> Result<VoiceProfile, ThreadflowError> {
        self.check_failure().await?;
        Ok(VoiceProfile {
            tone: "professional".to_string(),
            style: "concise".to_string(),
            description: format!("Synthesized from {} samples", samples.len()),
        })
    }

    async fn refine_post(
        &self,
        text: &str,
        instruction: &str,
    ) -> Result<String, ThreadflowError> {
        self.check_failure().await?;
        Ok(format!("{text} ({instruction})"))
    }
}
