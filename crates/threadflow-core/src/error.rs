// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the ThreadFlow content planner.

use thiserror::Error;

/// The primary error type used across all ThreadFlow adapter traits and core operations.
#[derive(Debug, Error)]
pub enum ThreadflowError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Rejected user input (empty idea, missing date/time, malformed HH:MM string).
    /// No state is mutated when this is returned.
    #[error("validation error: {0}")]
    Validation(String),

    /// Document-store backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// AI generation collaborator errors (API failure, unparseable structured output).
    #[error("generation error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Publishing collaborator errors (token exchange, per-post publish failure).
    /// A per-post failure retains the already-published prefix; the message says
    /// how many posts made it out.
    #[error("publish error: {message}")]
    Publish {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The per-workspace AI generation ceiling was reached. Checked locally,
    /// before the generation collaborator is contacted.
    #[error("generation limit of {limit} reached for this workspace")]
    GenerationLimit { limit: u32 },

    /// The workspace has no stored platform connection for the requested platform.
    #[error("no {platform} connection for this workspace")]
    NotConnected { platform: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
