// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the ThreadFlow content planner.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common domain types used throughout the ThreadFlow workspace. All
//! collaborator adapters implement traits defined here.

pub mod error;
pub mod id;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ThreadflowError;
pub use id::IdGenerator;
pub use types::{
    Account, AccountId, AdapterType, HealthStatus, Platform, QueueSchedule, QueuedPost,
    ScheduledPost, UserId, WorkspaceDocument,
};

// Re-export all adapter traits at crate root.
pub use traits::{ContentGenerator, DocumentStore, IdentityProvider, PluginAdapter, Publisher};
