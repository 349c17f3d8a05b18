// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document-store adapter trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::ThreadflowError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{UserId, WorkspaceDocument};

/// Adapter for the document-store collaborator.
///
/// Holds a single document per user containing the full serialized
/// workspace state. Read at session start, merge-written on every relevant
/// change, and scanned by the dispatch job across all users.
#[async_trait]
pub trait DocumentStore: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), ThreadflowError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), ThreadflowError>;

    /// Loads the user's workspace document, or `None` if nothing is stored.
    async fn load(&self, user: &UserId) -> Result<Option<WorkspaceDocument>, ThreadflowError>;

    /// Writes the user's workspace document, replacing any previous version.
    async fn save(
        &self,
        user: &UserId,
        document: &WorkspaceDocument,
    ) -> Result<(), ThreadflowError>;

    /// Lists every user with a stored document (used by the dispatch pass).
    async fn list_users(&self) -> Result<Vec<UserId>, ThreadflowError>;
}
