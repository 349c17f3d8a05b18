// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Gemini `generateContent` REST API.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// A content block: optional role plus ordered parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    /// A single-part user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// A role-less block (used for the system instruction).
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Structured-output controls.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    /// JSON output constrained by the given schema.
    pub fn json(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
        }
    }
}

/// Response body for `generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

/// Error envelope returned by the API on non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// The structured thread payload the model is asked to produce.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadPayload {
    pub thread_title: String,
    pub posts: Vec<String>,
    pub hashtags: Vec<String>,
}

/// The structured voice-analysis payload.
#[derive(Debug, Clone, Deserialize)]
pub struct VoicePayload {
    pub tone: String,
    pub style: String,
    pub description: String,
}

/// Response schema for thread generation, mirrored to the model.
pub fn thread_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "threadTitle": {
                "type": "STRING",
                "description": "A catchy, short title for the entire thread."
            },
            "posts": {
                "type": "ARRAY",
                "description": "Each string is a single, concise post in the thread, at most 280 characters.",
                "items": { "type": "STRING" }
            },
            "hashtags": {
                "type": "ARRAY",
                "description": "3-5 relevant hashtags for the thread.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["threadTitle", "posts", "hashtags"]
    })
}

/// Response schema for voice analysis.
pub fn voice_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "tone": { "type": "STRING" },
            "style": { "type": "STRING" },
            "description": {
                "type": "STRING",
                "description": "A short summary of the writing voice."
            }
        },
        "required": ["tone", "style", "description"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system("be brief")),
            contents: vec![Content::user("hello")],
            generation_config: Some(GenerationConfig::json(thread_schema())),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert!(json.get("generationConfig").is_some());
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        // The role-less system block omits the role key entirely.
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn response_text_concatenates_first_candidate_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"a"},{"text":"b"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("ab"));
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn thread_payload_parses_the_documented_shape() {
        let payload: ThreadPayload = serde_json::from_str(
            r#"{"threadTitle":"T","posts":["one","two"],"hashtags":["a","b"]}"#,
        )
        .unwrap();
        assert_eq!(payload.thread_title, "T");
        assert_eq!(payload.posts.len(), 2);
    }
}
