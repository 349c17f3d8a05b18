// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`DocumentStore`] implementation over the SQLite database.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::{DocumentStore, PluginAdapter};
use threadflow_core::types::{AdapterType, HealthStatus, UserId, WorkspaceDocument};

use crate::database::Database;
use crate::queries::workspaces;

/// SQLite-backed document store: one JSON workspace document per user.
///
/// Construct with [`SqliteDocumentStore::new`], then call
/// [`DocumentStore::initialize`] before use; queries before initialization
/// fail with an internal error rather than panicking.
pub struct SqliteDocumentStore {
    path: String,
    db: RwLock<Option<Database>>,
}

impl SqliteDocumentStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            db: RwLock::new(None),
        }
    }

    fn not_initialized() -> ThreadflowError {
        ThreadflowError::Internal("document store used before initialize()".into())
    }
}

#[async_trait]
impl PluginAdapter for SqliteDocumentStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ThreadflowError> {
        if self.db.read().await.is_some() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy("not initialized".into()))
        }
    }

    async fn shutdown(&self) -> Result<(), ThreadflowError> {
        self.close().await
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn initialize(&self) -> Result<(), ThreadflowError> {
        let mut guard = self.db.write().await;
        if guard.is_none() {
            *guard = Some(Database::open(&self.path).await?);
            info!(path = %self.path, "sqlite document store initialized");
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), ThreadflowError> {
        let mut guard = self.db.write().await;
        if let Some(db) = guard.take() {
            db.close().await?;
        }
        Ok(())
    }

    async fn load(&self, user: &UserId) -> Result<Option<WorkspaceDocument>, ThreadflowError> {
        let guard = self.db.read().await;
        let db = guard.as_ref().ok_or_else(Self::not_initialized)?;
        workspaces::load(db, user).await
    }

    async fn save(
        &self,
        user: &UserId,
        document: &WorkspaceDocument,
    ) -> Result<(), ThreadflowError> {
        let guard = self.db.read().await;
        let db = guard.as_ref().ok_or_else(Self::not_initialized)?;
        workspaces::save(db, user, document).await
    }

    async fn list_users(&self) -> Result<Vec<UserId>, ThreadflowError> {
        let guard = self.db.read().await;
        let db = guard.as_ref().ok_or_else(Self::not_initialized)?;
        workspaces::list_users(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn adapter_lifecycle_and_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adapter.db");
        let store = SqliteDocumentStore::new(path.to_string_lossy().to_string());

        // Before initialize: unhealthy and erroring.
        assert_eq!(
            store.health_check().await.unwrap(),
            HealthStatus::Unhealthy("not initialized".into())
        );
        assert!(store.load(&UserId("u".into())).await.is_err());

        store.initialize().await.unwrap();
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);

        let user = UserId("u".into());
        let document = WorkspaceDocument::default();
        store.save(&user, &document).await.unwrap();
        let loaded = store.load(&user).await.unwrap().unwrap();
        assert_eq!(loaded, document);
        assert_eq!(store.list_users().await.unwrap(), vec![user]);

        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn initialize_twice_is_harmless() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adapter.db");
        let store = SqliteDocumentStore::new(path.to_string_lossy().to_string());
        store.initialize().await.unwrap();
        store.initialize().await.unwrap();
        store.close().await.unwrap();
    }
}
