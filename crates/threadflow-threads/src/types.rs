// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Meta Graph and Threads APIs.

use serde::{Deserialize, Serialize};

/// Long-lived token exchange response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// `/me/accounts` page listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PageList {
    #[serde(default)]
    pub data: Vec<Page>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
}

/// Page details requested with `fields=instagram_business_account`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub instagram_business_account: Option<BusinessAccount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusinessAccount {
    pub id: String,
}

/// Business account details requested with `fields=username`.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessAccountUser {
    pub username: String,
}

/// Media container creation body.
#[derive(Debug, Clone, Serialize)]
pub struct MediaContainer {
    pub caption: String,
    pub media_type: String,
    /// Previous published post ID when chaining a thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<String>,
}

/// Response for both container creation and publish calls.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaResponse {
    pub id: String,
}

/// Error envelope returned by the Graph APIs.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorResponse {
    pub error: GraphErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub code: i64,
}
