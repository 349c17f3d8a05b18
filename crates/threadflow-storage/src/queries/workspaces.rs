// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workspace document operations: one JSON document per user.

use rusqlite::params;

use threadflow_core::ThreadflowError;
use threadflow_core::types::{UserId, WorkspaceDocument};

use crate::database::{Database, map_tr_err};

fn map_json_err(err: serde_json::Error) -> ThreadflowError {
    ThreadflowError::Storage {
        source: Box::new(err),
    }
}

/// Load the user's workspace document, or `None` if nothing is stored.
pub async fn load(
    db: &Database,
    user: &UserId,
) -> Result<Option<WorkspaceDocument>, ThreadflowError> {
    let user_id = user.0.clone();
    let raw: Option<String> = db
        .connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT document FROM workspaces WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            );
            match result {
                Ok(document) => Ok(Some(document)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)?;

    raw.map(|json| serde_json::from_str(&json).map_err(map_json_err))
        .transpose()
}

/// Upsert the user's workspace document (merge-write: the whole document
/// replaces the previous version).
pub async fn save(
    db: &Database,
    user: &UserId,
    document: &WorkspaceDocument,
) -> Result<(), ThreadflowError> {
    let user_id = user.0.clone();
    let json = serde_json::to_string(document).map_err(map_json_err)?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO workspaces (user_id, document) VALUES (?1, ?2)
                 ON CONFLICT(user_id) DO UPDATE SET
                     document = excluded.document,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![user_id, json],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// List every user with a stored workspace document.
pub async fn list_users(db: &Database) -> Result<Vec<UserId>, ThreadflowError> {
    db.connection()
        .call(|conn| -> Result<Vec<UserId>, rusqlite::Error> {
            let mut stmt = conn.prepare("SELECT user_id FROM workspaces ORDER BY user_id")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut users = Vec::new();
            for row in rows {
                users.push(UserId(row?));
            }
            Ok(users)
        })
        .await
        .map_err(map_tr_err)
}
