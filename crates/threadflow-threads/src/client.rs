// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Meta Graph and Threads APIs: long-lived token
//! exchange, Threads user resolution, and chained per-post publishing.

use chrono::Utc;
use tracing::{debug, info, warn};

use threadflow_core::ThreadflowError;
use threadflow_core::types::ThreadsConnection;

use crate::types::{
    BusinessAccountUser, GraphErrorResponse, MediaContainer, MediaResponse, PageInfo, PageList,
    TokenResponse,
};

/// Base URL for the Facebook Graph API (token exchange, page walk).
const GRAPH_API_BASE: &str = "https://graph.facebook.com";

/// Base URL for the Threads publishing API.
const THREADS_API_BASE: &str = "https://graph.threads.net";

/// Threads API version segment (distinct from the Graph API version).
const THREADS_API_VERSION: &str = "v1.0";

/// Client for the provider-specific token exchange and publish calls.
#[derive(Debug, Clone)]
pub struct ThreadsClient {
    http: reqwest::Client,
    app_id: String,
    app_secret: String,
    api_version: String,
    graph_base: String,
    threads_base: String,
}

impl ThreadsClient {
    pub fn new(
        app_id: String,
        app_secret: String,
        api_version: String,
    ) -> Result<Self, ThreadflowError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| ThreadflowError::Publish {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            app_id,
            app_secret,
            api_version,
            graph_base: GRAPH_API_BASE.to_string(),
            threads_base: THREADS_API_BASE.to_string(),
        })
    }

    /// Overrides both base URLs (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_urls(mut self, graph: String, threads: String) -> Self {
        self.graph_base = graph;
        self.threads_base = threads;
        self
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        context: &str,
    ) -> Result<T, ThreadflowError> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|e| ThreadflowError::Publish {
                message: format!("{context}: failed to decode response: {e}"),
                source: Some(Box::new(e)),
            });
        }
        let detail = response
            .json::<GraphErrorResponse>()
            .await
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("HTTP {status}"));
        Err(ThreadflowError::Publish {
            message: format!("{context}: {detail}"),
            source: None,
        })
    }

    /// Exchange a short-lived user token for a long-lived one and resolve
    /// the linked Threads (Instagram business) account.
    pub async fn exchange_token(
        &self,
        short_lived_token: &str,
    ) -> Result<ThreadsConnection, ThreadflowError> {
        // 1. Long-lived token.
        let url = format!(
            "{}/{}/oauth/access_token",
            self.graph_base, self.api_version
        );
        let response = self
            .http
            .get(&url)
            .query(&[
                ("grant_type", "fb_exchange_token"),
                ("client_id", self.app_id.as_str()),
                ("client_secret", self.app_secret.as_str()),
                ("fb_exchange_token", short_lived_token),
            ])
            .send()
            .await
            .map_err(|e| ThreadflowError::Publish {
                message: format!("token exchange request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let token: TokenResponse = Self::decode(response, "token exchange").await?;
        let access_token = token.access_token;

        // 2. Walk the user's pages looking for a linked business account.
        let url = format!("{}/{}/me/accounts", self.graph_base, self.api_version);
        let response = self
            .http
            .get(&url)
            .query(&[("access_token", access_token.as_str())])
            .send()
            .await
            .map_err(|e| ThreadflowError::Publish {
                message: format!("page listing request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let pages: PageList = Self::decode(response, "page listing").await?;

        let mut business_account_id = None;
        for page in &pages.data {
            let url = format!("{}/{}/{}", self.graph_base, self.api_version, page.id);
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("fields", "instagram_business_account"),
                    ("access_token", access_token.as_str()),
                ])
                .send()
                .await
                .map_err(|e| ThreadflowError::Publish {
                    message: format!("page lookup request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;
            let info: PageInfo = Self::decode(response, "page lookup").await?;
            if let Some(account) = info.instagram_business_account {
                business_account_id = Some(account.id);
                break;
            }
        }

        let Some(threads_user_id) = business_account_id else {
            return Err(ThreadflowError::Publish {
                message: "no Instagram business account linked to a connected Facebook page"
                    .to_string(),
                source: None,
            });
        };

        // 3. Resolve the account's username for display.
        let url = format!(
            "{}/{}/{}",
            self.graph_base, self.api_version, threads_user_id
        );
        let response = self
            .http
            .get(&url)
            .query(&[
                ("fields", "username"),
                ("access_token", access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ThreadflowError::Publish {
                message: format!("username lookup request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let user: BusinessAccountUser = Self::decode(response, "username lookup").await?;

        info!(username = user.username, "Threads account connected");
        Ok(ThreadsConnection {
            access_token,
            threads_user_id,
            username: user.username,
            connected_at: Utc::now().naive_utc(),
        })
    }

    /// Publish the ordered post texts as a linked chain, returning the
    /// published post IDs.
    ///
    /// Each post is a two-step call (create media container, publish it),
    /// with every post after the first linked to the previous published ID.
    /// A failure leaves the already-published prefix in place; the error
    /// names how far the chain got.
    pub async fn publish_chain(
        &self,
        connection: &ThreadsConnection,
        texts: &[String],
        hashtags: &[String],
    ) -> Result<Vec<String>, ThreadflowError> {
        let hashtag_line = hashtags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ");

        let mut published = Vec::new();
        let mut previous: Option<String> = None;

        for (position, text) in texts.iter().enumerate() {
            let caption = if hashtag_line.is_empty() {
                text.clone()
            } else {
                format!("{text}\n{hashtag_line}")
            };

            let result = self
                .publish_one(connection, caption, previous.clone())
                .await;
            match result {
                Ok(id) => {
                    debug!(position, post_id = %id, "published chained post");
                    previous = Some(id.clone());
                    published.push(id);
                }
                Err(err) => {
                    warn!(
                        position,
                        published = published.len(),
                        "publish chain broke; earlier posts stay published"
                    );
                    return Err(ThreadflowError::Publish {
                        message: format!(
                            "published {} of {} posts before the chain failed: {err}",
                            published.len(),
                            texts.len()
                        ),
                        source: None,
                    });
                }
            }
        }

        Ok(published)
    }

    async fn publish_one(
        &self,
        connection: &ThreadsConnection,
        caption: String,
        children: Option<String>,
    ) -> Result<String, ThreadflowError> {
        // Create the media container.
        let url = format!(
            "{}/{}/{}/media",
            self.threads_base, THREADS_API_VERSION, connection.threads_user_id
        );
        let body = MediaContainer {
            caption,
            media_type: "TEXT".to_string(),
            children,
        };
        let response = self
            .http
            .post(&url)
            .query(&[("access_token", connection.access_token.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ThreadflowError::Publish {
                message: format!("media container request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let container: MediaResponse = Self::decode(response, "media container").await?;

        // Publish it.
        let url = format!(
            "{}/{}/{}/media_publish",
            self.threads_base, THREADS_API_VERSION, connection.threads_user_id
        );
        let response = self
            .http
            .post(&url)
            .query(&[
                ("creation_id", container.id.as_str()),
                ("access_token", connection.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ThreadflowError::Publish {
                message: format!("media publish request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let published: MediaResponse = Self::decode(response, "media publish").await?;
        Ok(published.id)
    }
}
