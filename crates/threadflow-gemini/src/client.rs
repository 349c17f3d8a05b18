// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! Handles request construction, API key authentication, and transient
//! error retry.

use std::time::Duration;

use tracing::{debug, warn};

use threadflow_core::ThreadflowError;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Base URL for the Gemini REST API.
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// HTTP client for Gemini API communication.
///
/// Manages authentication, connection pooling, and retry logic for
/// transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_retries: u32,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    pub fn new(api_key: String, model: String) -> Result<Self, ThreadflowError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ThreadflowError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key,
            model,
            max_retries: 1,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a `generateContent` request and returns the first candidate's
    /// text.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second
    /// delay.
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, ThreadflowError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying generation request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(request)
                .send()
                .await
                .map_err(|e| ThreadflowError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            if status.is_success() {
                let body: GenerateContentResponse =
                    response.json().await.map_err(|e| ThreadflowError::Provider {
                        message: format!("failed to decode generation response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                debug!(model = %self.model, "generation request succeeded");
                return body.text().ok_or_else(|| ThreadflowError::Provider {
                    message: "generation response contained no candidate text".to_string(),
                    source: None,
                });
            }

            let is_transient = matches!(status.as_u16(), 429 | 500 | 503);
            let detail = response
                .json::<ApiErrorResponse>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));

            if is_transient && attempt < self.max_retries {
                last_error = Some(detail);
                continue;
            }

            return Err(ThreadflowError::Provider {
                message: format!("generation request failed ({status}): {detail}"),
                source: None,
            });
        }

        Err(ThreadflowError::Provider {
            message: format!(
                "generation request failed after retries: {}",
                last_error.unwrap_or_else(|| "unknown transient error".to_string())
            ),
            source: None,
        })
    }
}
