// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authoritative content state store for the ThreadFlow content planner.
//!
//! [`ContentStore`] owns all workspace collections (accounts, pillars,
//! backlog, committed schedule, availability pattern, voice samples,
//! activity log, generation throttle) and is the only mutation point. The
//! queue scheduler is invoked synchronously after relevant mutations and
//! its delta applied atomically; the full workspace document is persisted
//! through the document-store collaborator on every relevant change.

pub mod state;
pub mod store;

pub use state::WorkspaceState;
pub use store::{ContentStore, DEFAULT_GENERATION_LIMIT};
