// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `DocumentStore` for tests that don't need SQLite on disk.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::adapter::PluginAdapter;
use threadflow_core::traits::storage::DocumentStore;
use threadflow_core::types::{AdapterType, HealthStatus, UserId, WorkspaceDocument};

/// A `DocumentStore` backed by a `HashMap`, mirroring the one-document-per-
/// user shape of the real backend. Cloning shares the underlying map, so a
/// test can hold one handle while the code under test holds another.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<Mutex<HashMap<String, WorkspaceDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document before the code under test runs.
    pub async fn seed(&self, user: &UserId, document: WorkspaceDocument) {
        self.documents
            .lock()
            .await
            .insert(user.0.clone(), document);
    }

    /// Read a document back without going through the trait.
    pub async fn get(&self, user: &UserId) -> Option<WorkspaceDocument> {
        self.documents.lock().await.get(&user.0).cloned()
    }
}

#[async_trait]
impl PluginAdapter for MemoryDocumentStore {
    fn name(&self) -> &str {
        "memory-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ThreadflowError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ThreadflowError> {
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn initialize(&self) -> Result<(), ThreadflowError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), ThreadflowError> {
        Ok(())
    }

    async fn load(&self, user: &UserId) -> Result<Option<WorkspaceDocument>, ThreadflowError> {
        Ok(self.documents.lock().await.get(&user.0).cloned())
    }

    async fn save(
        &self,
        user: &UserId,
        document: &WorkspaceDocument,
    ) -> Result<(), ThreadflowError> {
        self.documents
            .lock()
            .await
            .insert(user.0.clone(), document.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserId>, ThreadflowError> {
        Ok(self
            .documents
            .lock()
            .await
            .keys()
            .map(|k| UserId(k.clone()))
            .collect())
    }
}
