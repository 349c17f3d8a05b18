// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meta Threads publishing adapter for the ThreadFlow content planner.
//!
//! Implements [`Publisher`] for the Threads platform, plus the
//! backend-brokered OAuth token exchange that connects a workspace to its
//! Threads account. The stored connection lives inside the user's workspace
//! document; publishing loads it from the document store the same way the
//! dispatch job does.

pub mod client;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use threadflow_config::ThreadflowConfig;
use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::{DocumentStore, PluginAdapter, Publisher};
use threadflow_core::types::{
    AdapterType, HealthStatus, Platform, ThreadsConnection, UserId,
};

use crate::client::ThreadsClient;

/// Threads publishing collaborator implementing [`Publisher`].
pub struct ThreadsPublisher {
    client: ThreadsClient,
    storage: Arc<dyn DocumentStore>,
}

impl ThreadsPublisher {
    /// Creates a new Threads publisher from the given configuration.
    ///
    /// Requires `threads.app_id` and `threads.app_secret` to be set.
    pub fn new(
        config: &ThreadflowConfig,
        storage: Arc<dyn DocumentStore>,
    ) -> Result<Self, ThreadflowError> {
        let app_id = config
            .threads
            .app_id
            .clone()
            .ok_or_else(|| ThreadflowError::Config("threads.app_id is required".into()))?;
        let app_secret = config
            .threads
            .app_secret
            .clone()
            .ok_or_else(|| ThreadflowError::Config("threads.app_secret is required".into()))?;

        let client = ThreadsClient::new(
            app_id,
            app_secret,
            config.threads.graph_api_version.clone(),
        )?;
        Ok(Self { client, storage })
    }

    /// Creates a publisher with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: ThreadsClient, storage: Arc<dyn DocumentStore>) -> Self {
        Self { client, storage }
    }

    /// Perform the backend-brokered token exchange for `user` and persist
    /// the resulting connection into their workspace document.
    pub async fn connect(
        &self,
        user: &UserId,
        short_lived_token: &str,
    ) -> Result<ThreadsConnection, ThreadflowError> {
        let connection = self.client.exchange_token(short_lived_token).await?;

        let mut document = self.storage.load(user).await?.unwrap_or_default();
        document.connection = Some(connection.clone());
        self.storage.save(user, &document).await?;

        info!(user = %user.0, username = connection.username, "stored Threads connection");
        Ok(connection)
    }

    async fn connection_for(
        &self,
        user: &UserId,
    ) -> Result<ThreadsConnection, ThreadflowError> {
        self.storage
            .load(user)
            .await?
            .and_then(|doc| doc.connection)
            .ok_or_else(|| ThreadflowError::NotConnected {
                platform: Platform::Threads.to_string(),
            })
    }
}

#[async_trait]
impl PluginAdapter for ThreadsPublisher {
    fn name(&self) -> &str {
        "threads"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Publisher
    }

    async fn health_check(&self) -> Result<HealthStatus, ThreadflowError> {
        // Publishing health is per-connection; a constructed client with
        // app credentials is the strongest app-level claim available.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ThreadflowError> {
        Ok(())
    }
}

#[async_trait]
impl Publisher for ThreadsPublisher {
    fn platform(&self) -> Platform {
        Platform::Threads
    }

    async fn publish_thread(
        &self,
        user: &UserId,
        texts: &[String],
        hashtags: &[String],
    ) -> Result<Vec<String>, ThreadflowError> {
        let connection = self.connection_for(user).await?;
        self.client
            .publish_chain(&connection, texts, hashtags)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use threadflow_core::types::WorkspaceDocument;
    use threadflow_test_utils::MemoryDocumentStore;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn connection() -> ThreadsConnection {
        ThreadsConnection {
            access_token: "long-lived".into(),
            threads_user_id: "ig-99".into(),
            username: "corp_solutions".into(),
            connected_at: Utc::now().naive_utc(),
        }
    }

    async fn publisher_for(server: &MockServer, storage: MemoryDocumentStore) -> ThreadsPublisher {
        let client = ThreadsClient::new("app".into(), "secret".into(), "v19.0".into())
            .unwrap()
            .with_base_urls(server.uri(), server.uri());
        ThreadsPublisher::with_client(client, Arc::new(storage))
    }

    #[tokio::test]
    async fn connect_walks_the_token_exchange_and_persists() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v19.0/oauth/access_token"))
            .and(query_param("grant_type", "fb_exchange_token"))
            .and(query_param("fb_exchange_token", "short"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "long-lived"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v19.0/me/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [ { "id": "page-1" }, { "id": "page-2" } ]
            })))
            .mount(&server)
            .await;
        // First page has no linked business account; the second does.
        Mock::given(method("GET"))
            .and(path("/v19.0/page-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v19.0/page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "instagram_business_account": { "id": "ig-99" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v19.0/ig-99"))
            .and(query_param("fields", "username"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "username": "corp_solutions"
            })))
            .mount(&server)
            .await;

        let storage = MemoryDocumentStore::new();
        let publisher = publisher_for(&server, storage.clone()).await;
        let user = UserId("user-1".into());

        let connection = publisher.connect(&user, "short").await.unwrap();
        assert_eq!(connection.threads_user_id, "ig-99");
        assert_eq!(connection.username, "corp_solutions");

        // The connection landed in the persisted workspace document.
        let document = storage.get(&user).await.unwrap();
        assert_eq!(
            document.connection.unwrap().access_token,
            "long-lived"
        );
    }

    #[tokio::test]
    async fn connect_fails_without_a_linked_business_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v19.0/oauth/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "long-lived"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v19.0/me/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [ { "id": "page-1" } ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v19.0/page-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let publisher = publisher_for(&server, MemoryDocumentStore::new()).await;
        let err = publisher
            .connect(&UserId("user-1".into()), "short")
            .await
            .unwrap_err();
        match err {
            ThreadflowError::Publish { message, .. } => {
                assert!(message.contains("no Instagram business account"));
            }
            other => panic!("expected Publish error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn publish_chains_posts_with_children_links() {
        let server = MockServer::start().await;

        // First container has no children link.
        Mock::given(method("POST"))
            .and(path("/v1.0/ig-99/media"))
            .and(body_partial_json(serde_json::json!({
                "caption": "first\n#ai #b2b", "media_type": "TEXT"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "container-1"
            })))
            .expect(1)
            .mount(&server)
            .await;
        // Second container links to the first published post.
        Mock::given(method("POST"))
            .and(path("/v1.0/ig-99/media"))
            .and(body_partial_json(serde_json::json!({
                "children": "post-1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "container-2"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1.0/ig-99/media_publish"))
            .and(query_param("creation_id", "container-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "post-1"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1.0/ig-99/media_publish"))
            .and(query_param("creation_id", "container-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "post-2"
            })))
            .mount(&server)
            .await;

        let storage = MemoryDocumentStore::new();
        let user = UserId("user-1".into());
        let document = WorkspaceDocument {
            connection: Some(connection()),
            ..Default::default()
        };
        storage.seed(&user, document).await;

        let publisher = publisher_for(&server, storage).await;
        let ids = publisher
            .publish_thread(
                &user,
                &["first".to_string(), "second".to_string()],
                &["ai".to_string(), "b2b".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(ids, vec!["post-1", "post-2"]);
    }

    #[tokio::test]
    async fn a_broken_chain_reports_the_published_prefix() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.0/ig-99/media"))
            .and(body_partial_json(serde_json::json!({ "caption": "first" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "container-1"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1.0/ig-99/media_publish"))
            .and(query_param("creation_id", "container-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "post-1"
            })))
            .mount(&server)
            .await;
        // The second container creation fails.
        Mock::given(method("POST"))
            .and(path("/v1.0/ig-99/media"))
            .and(body_partial_json(serde_json::json!({ "children": "post-1" })))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "rate limited", "type": "OAuthException", "code": 4 }
            })))
            .mount(&server)
            .await;

        let storage = MemoryDocumentStore::new();
        let user = UserId("user-1".into());
        storage
            .seed(
                &user,
                WorkspaceDocument {
                    connection: Some(connection()),
                    ..Default::default()
                },
            )
            .await;

        let publisher = publisher_for(&server, storage).await;
        let err = publisher
            .publish_thread(&user, &["first".to_string(), "second".to_string()], &[])
            .await
            .unwrap_err();
        match err {
            ThreadflowError::Publish { message, .. } => {
                assert!(message.contains("published 1 of 2 posts"));
                assert!(message.contains("rate limited"));
            }
            other => panic!("expected Publish error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn publishing_without_a_connection_is_refused() {
        let server = MockServer::start().await;
        let publisher = publisher_for(&server, MemoryDocumentStore::new()).await;
        let err = publisher
            .publish_thread(&UserId("user-1".into()), &["text".to_string()], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ThreadflowError::NotConnected { .. }));
    }
}
