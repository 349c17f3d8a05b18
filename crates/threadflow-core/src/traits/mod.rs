// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for ThreadFlow's collaborator boundaries.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod generator;
pub mod identity;
pub mod publisher;
pub mod storage;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use generator::ContentGenerator;
pub use identity::IdentityProvider;
pub use publisher::Publisher;
pub use storage::DocumentStore;
