// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory workspace state and its mapping to the persisted document.

use threadflow_core::types::{
    Account, AccountId, ContentPillar, QueueSchedule, QueuedPost, ScheduledPost,
    ThreadsConnection, VoiceProfile, VoiceSample, WorkspaceDocument,
};

/// The authoritative in-memory collections for one signed-in workspace.
///
/// Mirrors [`WorkspaceDocument`] one-to-one; the store serializes the whole
/// state on every relevant change and hydrates it at session start.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    pub accounts: Vec<Account>,
    pub pillars: Vec<ContentPillar>,
    pub queued: Vec<QueuedPost>,
    pub scheduled: Vec<ScheduledPost>,
    pub queue_schedule: QueueSchedule,
    pub voice_samples: Vec<VoiceSample>,
    pub voice_profile: Option<VoiceProfile>,
    pub default_tone: Option<String>,
    pub default_style: Option<String>,
    pub generation_count: u32,
    pub connection: Option<ThreadsConnection>,
}

impl WorkspaceState {
    /// Hydrate from a stored document.
    pub fn from_document(doc: WorkspaceDocument) -> Self {
        Self {
            accounts: doc.accounts,
            pillars: doc.pillars,
            queued: doc.queued,
            scheduled: doc.scheduled,
            queue_schedule: doc.queue_schedule,
            voice_samples: doc.voice_samples,
            voice_profile: doc.voice_profile,
            default_tone: doc.default_tone,
            default_style: doc.default_style,
            generation_count: doc.generation_count,
            connection: doc.connection,
        }
    }

    /// Serialize for persistence.
    pub fn to_document(&self) -> WorkspaceDocument {
        WorkspaceDocument {
            accounts: self.accounts.clone(),
            pillars: self.pillars.clone(),
            queued: self.queued.clone(),
            scheduled: self.scheduled.clone(),
            queue_schedule: self.queue_schedule.clone(),
            voice_samples: self.voice_samples.clone(),
            voice_profile: self.voice_profile.clone(),
            default_tone: self.default_tone.clone(),
            default_style: self.default_style.clone(),
            generation_count: self.generation_count,
            connection: self.connection.clone(),
        }
    }

    /// Next sequential account identifier.
    pub fn next_account_id(&self) -> AccountId {
        AccountId(
            self.accounts
                .iter()
                .map(|a| a.id.0)
                .max()
                .unwrap_or(0)
                + 1,
        )
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_roundtrip_preserves_state() {
        let mut state = WorkspaceState::default();
        state.generation_count = 12;
        state.default_tone = Some("direct".into());

        let doc = state.to_document();
        let back = WorkspaceState::from_document(doc);
        assert_eq!(back.generation_count, 12);
        assert_eq!(back.default_tone.as_deref(), Some("direct"));
        assert_eq!(back.queue_schedule, QueueSchedule::default());
    }

    #[test]
    fn account_ids_are_sequential() {
        let mut state = WorkspaceState::default();
        assert_eq!(state.next_account_id(), AccountId(1));

        state.accounts.push(Account {
            id: AccountId(1),
            platform: threadflow_core::Platform::Threads,
            name: "@one".into(),
        });
        state.accounts.push(Account {
            id: AccountId(5),
            platform: threadflow_core::Platform::Instagram,
            name: "@five".into(),
        });
        assert_eq!(state.next_account_id(), AccountId(6));
    }
}
