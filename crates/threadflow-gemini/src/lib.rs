// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini generation adapter for the ThreadFlow content planner.
//!
//! Implements [`ContentGenerator`] over the `generateContent` REST API with
//! structured JSON output: thread drafting, voice analysis, and single-post
//! refinement.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tracing::info;

use threadflow_config::ThreadflowConfig;
use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::{ContentGenerator, PluginAdapter};
use threadflow_core::types::{
    AdapterType, GeneratedThread, HealthStatus, PostSegment, ThreadPrompt, VoiceProfile,
    VoiceSample,
};
use threadflow_core::IdGenerator;

use crate::client::GeminiClient;
use crate::types::{
    Content, GenerateContentRequest, GenerationConfig, ThreadPayload, VoicePayload, thread_schema,
    voice_schema,
};

const THREAD_SYSTEM_INSTRUCTION: &str = "You are a world-class social media manager \
specializing in creating engaging, viral threads for B2B brands on platforms like Meta \
Threads. Your tone is professional, insightful, and designed to capture the attention of \
a business audience. Generate a thread based on the user's idea.";

const VOICE_SYSTEM_INSTRUCTION: &str = "You are an expert writing coach. Analyze the \
provided writing samples and characterize the author's voice.";

/// Gemini generation collaborator implementing [`ContentGenerator`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
pub struct GeminiGenerator {
    client: GeminiClient,
    ids: IdGenerator,
}

impl GeminiGenerator {
    /// Creates a new Gemini generator from the given configuration.
    pub fn new(config: &ThreadflowConfig) -> Result<Self, ThreadflowError> {
        let api_key = resolve_api_key(&config.generator.api_key)?;
        let client = GeminiClient::new(api_key, config.generator.model.clone())?;

        info!(model = config.generator.model, "Gemini generator initialized");
        Ok(Self {
            client,
            ids: IdGenerator::new(),
        })
    }

    /// Creates a generator with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: GeminiClient) -> Self {
        Self {
            client,
            ids: IdGenerator::new(),
        }
    }

    fn thread_instruction(prompt: &ThreadPrompt) -> String {
        let mut instruction = THREAD_SYSTEM_INSTRUCTION.to_string();
        if let Some(tone) = prompt.tone.as_deref() {
            instruction.push_str(&format!(" Write in a {tone} tone."));
        }
        if let Some(style) = prompt.style.as_deref() {
            instruction.push_str(&format!(" Match this style: {style}."));
        }
        instruction
    }
}

/// Resolve the API key from config or environment.
fn resolve_api_key(configured: &Option<String>) -> Result<String, ThreadflowError> {
    if let Some(key) = configured
        && !key.is_empty()
    {
        return Ok(key.clone());
    }
    match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(ThreadflowError::Config(
            "generator.api_key is not set and GEMINI_API_KEY is not in the environment".into(),
        )),
    }
}

#[async_trait]
impl PluginAdapter for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generator
    }

    async fn health_check(&self) -> Result<HealthStatus, ThreadflowError> {
        // The API has no cheap ping endpoint; a constructed client with a
        // resolved key is as healthy as we can claim without spending quota.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ThreadflowError> {
        Ok(())
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    async fn generate_thread(
        &self,
        prompt: ThreadPrompt,
    ) -> Result<GeneratedThread, ThreadflowError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(Self::thread_instruction(&prompt))),
            contents: vec![Content::user(format!(
                "Based on the following idea, create a compelling thread with multiple \
                 posts. The idea is: \"{}\"",
                prompt.idea
            ))],
            generation_config: Some(GenerationConfig::json(thread_schema())),
        };

        let text = self.client.generate(&request).await?;
        let payload: ThreadPayload =
            serde_json::from_str(text.trim()).map_err(|e| ThreadflowError::Provider {
                message: format!(
                    "the generated thread could not be parsed as JSON: {e}"
                ),
                source: Some(Box::new(e)),
            })?;

        Ok(GeneratedThread {
            title: payload.thread_title,
            posts: payload
                .posts
                .into_iter()
                .map(|text| PostSegment {
                    id: self.ids.segment(),
                    text,
                })
                .collect(),
            hashtags: payload.hashtags,
        })
    }

    async fn analyze_voice(
        &self,
        samples: &[VoiceSample],
    ) -> Result<VoiceProfile, ThreadflowError> {
        let joined = samples
            .iter()
            .enumerate()
            .map(|(n, s)| format!("Sample {}:\n{}", n + 1, s.text))
            .collect::<Vec<_>>()
            .join("\n\n");

        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(VOICE_SYSTEM_INSTRUCTION)),
            contents: vec![Content::user(joined)],
            generation_config: Some(GenerationConfig::json(voice_schema())),
        };

        let text = self.client.generate(&request).await?;
        let payload: VoicePayload =
            serde_json::from_str(text.trim()).map_err(|e| ThreadflowError::Provider {
                message: format!("the voice analysis could not be parsed as JSON: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(VoiceProfile {
            tone: payload.tone,
            style: payload.style,
            description: payload.description,
        })
    }

    async fn refine_post(
        &self,
        text: &str,
        instruction: &str,
    ) -> Result<String, ThreadflowError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(
                "Rewrite the given social media post per the instruction. Reply with the \
                 rewritten post text only, at most 280 characters.",
            )),
            contents: vec![Content::user(format!(
                "Instruction: {instruction}\n\nPost:\n{text}"
            ))],
            generation_config: None,
        };

        let revised = self.client.generate(&request).await?;
        Ok(revised.trim().to_string())
    }
}
