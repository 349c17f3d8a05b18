// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generator adapter trait for the AI text-generation collaborator.

use async_trait::async_trait;

use crate::error::ThreadflowError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{GeneratedThread, ThreadPrompt, VoiceProfile, VoiceSample};

/// Adapter for the AI generation collaborator.
///
/// Given a prompt-shaped input, returns structured text output or fails.
/// Callers treat failures as a session-scoped error value; state prior to
/// the call is left unchanged.
#[async_trait]
pub trait ContentGenerator: PluginAdapter {
    /// Drafts a complete thread (title, ordered post texts, hashtags) from
    /// a content idea.
    async fn generate_thread(
        &self,
        prompt: ThreadPrompt,
    ) -> Result<GeneratedThread, ThreadflowError>;

    /// Analyzes writing samples and returns a tone/style/description triple.
    async fn analyze_voice(
        &self,
        samples: &[VoiceSample],
    ) -> Result<VoiceProfile, ThreadflowError>;

    /// Rewrites a single post text per the given instruction, returning the
    /// revised text.
    async fn refine_post(
        &self,
        text: &str,
        instruction: &str,
    ) -> Result<String, ThreadflowError>;
}
