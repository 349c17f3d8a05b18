// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity adapter trait for the auth collaborator.

use async_trait::async_trait;

use crate::error::ThreadflowError;
use crate::traits::adapter::PluginAdapter;
use crate::types::UserId;

/// Adapter for the identity collaborator.
///
/// Sign-in produces the stable user identifier all persisted state is
/// keyed by; sign-out ends the session without touching external storage.
#[async_trait]
pub trait IdentityProvider: PluginAdapter {
    /// Signs in and returns the stable user identifier for this session.
    async fn sign_in(&self) -> Result<UserId, ThreadflowError>;

    /// Signs out, invalidating the current session.
    async fn sign_out(&self) -> Result<(), ThreadflowError>;
}
