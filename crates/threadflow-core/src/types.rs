// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the ThreadFlow engine.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Stable identifier produced by the identity collaborator. All persisted
/// state is keyed by this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier of a connected social account within a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub i64);

/// Identifier of a content pillar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PillarId(pub String);

/// Identifier of a single post segment within a thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId(pub String);

/// Identifier of a backlog (queued) post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueuedPostId(pub String);

/// Identifier of a committed (scheduled) post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledPostId(pub String);

/// Identifier of a stored writing-voice sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a collaborator trait.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Generator,
    Publisher,
    Storage,
    Identity,
}

/// The closed set of social platforms an account can target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Platform {
    Threads,
    Instagram,
    Facebook,
}

/// One post in a thread: an ordered text segment with a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSegment {
    pub id: SegmentId,
    pub text: String,
}

/// A drafted thread: title, ordered post segments, and hashtags.
///
/// This is the unit of content the generation collaborator produces and
/// the unit that gets queued or scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedThread {
    pub title: String,
    pub posts: Vec<PostSegment>,
    pub hashtags: Vec<String>,
}

/// Input to the generation collaborator for drafting a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadPrompt {
    /// The content idea the thread should be built from.
    pub idea: String,
    /// Optional tone override (e.g. "professional").
    pub tone: Option<String>,
    /// Optional style override (e.g. "short punchy sentences").
    pub style: Option<String>,
}

/// A connected social account. Scheduling copies `name` and `platform` into
/// committed posts at commit time; everything else is account-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub platform: Platform,
    pub name: String,
}

/// A categorical tag for organizing content themes. Purely descriptive;
/// no lifecycle coupling to scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPillar {
    pub id: PillarId,
    pub name: String,
    pub color: String,
}

/// A backlog entry: a thread bound to a target account, awaiting automatic
/// placement by the queue scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedPost {
    pub id: QueuedPostId,
    pub title: String,
    pub posts: Vec<PostSegment>,
    pub hashtags: Vec<String>,
    pub account_id: AccountId,
    pub pillar_id: Option<PillarId>,
}

/// A committed post: a thread bound to a concrete calendar date and
/// time-of-day. Account display fields are denormalized copies taken at
/// commit time.
///
/// Invariant: no two committed posts in one workspace share an identical
/// `(date, time)` instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPost {
    pub id: ScheduledPostId,
    pub title: String,
    pub posts: Vec<PostSegment>,
    pub hashtags: Vec<String>,
    pub account_id: AccountId,
    pub account_name: String,
    pub platform: Platform,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub pillar_id: Option<PillarId>,
}

impl ScheduledPost {
    /// The post's wall-clock instant: date and time combined.
    pub fn instant(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Recurring weekly availability pattern for automatic placement.
///
/// `days` holds weekday indices (0 = Sunday .. 6 = Saturday). `times` holds
/// unique `HH:MM` strings in user-configured order; the scheduler visits
/// them in that order, never sorted. Empty `days` or `times` means there
/// are no valid slots, ever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSchedule {
    pub days: Vec<u8>,
    pub times: Vec<String>,
}

impl Default for QueueSchedule {
    fn default() -> Self {
        // Mon/Wed/Fri at 10:00, the out-of-the-box cadence.
        Self {
            days: vec![1, 3, 5],
            times: vec!["10:00".to_string()],
        }
    }
}

impl QueueSchedule {
    /// An empty pattern: no allowed days, no allowed times.
    pub fn empty() -> Self {
        Self {
            days: Vec::new(),
            times: Vec::new(),
        }
    }
}

/// A human-readable activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: String,
    pub text: String,
    /// Wall-clock timestamp, `HH:MM` display granularity.
    pub timestamp: String,
}

/// A stored writing sample used for voice analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSample {
    pub id: SampleId,
    pub text: String,
}

/// The generation collaborator's assessment of a user's writing voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub tone: String,
    pub style: String,
    /// Short AI-written summary of the voice.
    pub description: String,
}

/// Stored result of the backend-brokered Threads token exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadsConnection {
    pub access_token: String,
    /// The Instagram business account ID used for Threads API calls.
    pub threads_user_id: String,
    pub username: String,
    pub connected_at: NaiveDateTime,
}

/// The single per-user document persisted by the document-store
/// collaborator: the full serialized workspace state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDocument {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub pillars: Vec<ContentPillar>,
    #[serde(default)]
    pub queued: Vec<QueuedPost>,
    #[serde(default)]
    pub scheduled: Vec<ScheduledPost>,
    #[serde(default = "QueueSchedule::default")]
    pub queue_schedule: QueueSchedule,
    #[serde(default)]
    pub voice_samples: Vec<VoiceSample>,
    #[serde(default)]
    pub voice_profile: Option<VoiceProfile>,
    #[serde(default)]
    pub default_tone: Option<String>,
    #[serde(default)]
    pub default_style: Option<String>,
    #[serde(default)]
    pub generation_count: u32,
    #[serde(default)]
    pub connection: Option<ThreadsConnection>,
}
