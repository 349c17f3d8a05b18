// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The content state store: authoritative holder of one workspace's
//! collections and the only place that mutates them.
//!
//! Every mutating operation with user-visible significance appends an
//! activity entry (bounded to the 20 most recent) and synchronizes the full
//! workspace document to the document-store collaborator. Mutations that
//! touch the backlog, the committed set, the availability pattern, or the
//! accounts run a synchronous reconcile pass: the queue scheduler produces
//! a delta and the store applies it atomically before persisting.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use threadflow_core::error::ThreadflowError;
use threadflow_core::traits::{ContentGenerator, DocumentStore};
use threadflow_core::types::{
    Account, AccountId, ActivityEntry, ContentPillar, GeneratedThread, PillarId, Platform,
    QueueSchedule, QueuedPost, QueuedPostId, SampleId, ScheduledPost, ScheduledPostId, SegmentId,
    ThreadPrompt, ThreadsConnection, UserId, VoiceSample,
};
use threadflow_core::IdGenerator;
use threadflow_scheduler::{merge_committed, schedule_queue};

use crate::state::WorkspaceState;

/// Activity log bound: only the most recent entries are kept.
const ACTIVITY_CAP: usize = 20;

/// Default per-workspace ceiling on AI generation calls.
pub const DEFAULT_GENERATION_LIMIT: u32 = 30;

/// Authoritative store for one signed-in workspace session.
///
/// Constructed by [`ContentStore::sign_in`], reset by
/// [`ContentStore::sign_out`]. The scheduler never mutates state in place;
/// it returns a delta this store applies in a single synchronous update.
pub struct ContentStore {
    user: UserId,
    state: WorkspaceState,
    draft: Option<GeneratedThread>,
    idea_bank: Vec<String>,
    idea_source: Option<String>,
    last_error: Option<String>,
    activity: Vec<ActivityEntry>,
    generator: Arc<dyn ContentGenerator>,
    storage: Arc<dyn DocumentStore>,
    ids: IdGenerator,
    horizon_days: u32,
    generation_limit: u32,
    pinned_now: Option<NaiveDateTime>,
}

impl ContentStore {
    /// Start a session: hydrate the workspace from the document store (or
    /// initialize defaults when nothing is stored) and run the initial
    /// reconcile pass.
    pub async fn sign_in(
        user: UserId,
        generator: Arc<dyn ContentGenerator>,
        storage: Arc<dyn DocumentStore>,
        horizon_days: u32,
        generation_limit: u32,
    ) -> Result<Self, ThreadflowError> {
        let state = match storage.load(&user).await? {
            Some(doc) => WorkspaceState::from_document(doc),
            None => {
                info!(user = %user.0, "no stored workspace; starting from defaults");
                WorkspaceState::default()
            }
        };

        let mut store = Self {
            user,
            state,
            draft: None,
            idea_bank: Vec::new(),
            idea_source: None,
            last_error: None,
            activity: Vec::new(),
            generator,
            storage,
            ids: IdGenerator::new(),
            horizon_days,
            generation_limit,
            pinned_now: None,
        };
        store.reconcile().await?;
        Ok(store)
    }

    /// End the session: reset all in-memory state to empty defaults.
    /// External storage is left untouched.
    pub fn sign_out(&mut self) {
        self.state = WorkspaceState::default();
        self.draft = None;
        self.idea_bank.clear();
        self.idea_source = None;
        self.last_error = None;
        self.activity.clear();
    }

    /// Pin the store's clock to a fixed instant. Deterministic scheduling
    /// for tests; production code leaves the clock unpinned.
    pub fn pin_clock(&mut self, now: NaiveDateTime) {
        self.pinned_now = Some(now);
    }

    fn now(&self) -> NaiveDateTime {
        self.pinned_now
            .unwrap_or_else(|| Utc::now().naive_utc())
    }

    fn validation(message: impl Into<String>) -> ThreadflowError {
        ThreadflowError::Validation(message.into())
    }

    fn log_activity(&mut self, text: impl Into<String>) {
        let entry = ActivityEntry {
            id: self.ids.activity(),
            text: text.into(),
            timestamp: self.now().format("%H:%M").to_string(),
        };
        self.activity.insert(0, entry);
        self.activity.truncate(ACTIVITY_CAP);
    }

    async fn persist(&self) -> Result<(), ThreadflowError> {
        self.storage
            .save(&self.user, &self.state.to_document())
            .await
    }

    /// Run the queue scheduler against current state and apply its delta,
    /// then persist. Called synchronously after every mutation of the
    /// backlog, committed set, pattern, or accounts.
    pub async fn reconcile(&mut self) -> Result<(), ThreadflowError> {
        let now = self.now();
        let plan = schedule_queue(
            &self.state.queued,
            &self.state.queue_schedule,
            &self.state.scheduled,
            &self.state.accounts,
            &self.ids,
            now,
            self.horizon_days,
        );

        if !plan.is_noop() {
            debug!(
                placed = plan.placed.len(),
                dropped = plan.dropped.len(),
                remaining = plan.remainder.len(),
                "applying scheduling delta"
            );
        }
        for post in &plan.placed {
            self.log_activity(format!(
                "Auto-scheduled thread \"{}\" for {}.",
                post.title, post.account_name
            ));
        }
        for entry in &plan.dropped {
            warn!(queued_post = %entry.id.0, "queued post lost its account; removing");
            self.log_activity(format!(
                "Removed queued thread \"{}\": its account no longer exists.",
                entry.title
            ));
        }

        self.state.scheduled = merge_committed(&self.state.scheduled, &plan.placed);
        self.state.queued = plan.remainder;
        self.persist().await
    }

    // --- Draft flow ---

    /// Generate a thread draft from a content idea.
    ///
    /// The generation throttle is checked before the collaborator is
    /// contacted; a refused or failed call leaves prior state unchanged.
    pub async fn generate_thread(&mut self, idea: &str) -> Result<(), ThreadflowError> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(Self::validation("a content idea is required"));
        }
        self.check_generation_budget()?;

        let prompt = ThreadPrompt {
            idea: idea.to_string(),
            tone: self.state.default_tone.clone(),
            style: self.state.default_style.clone(),
        };
        match self.generator.generate_thread(prompt).await {
            Ok(thread) => {
                self.last_error = None;
                self.state.generation_count += 1;
                self.log_activity(format!("Generated new thread: \"{}\"", thread.title));
                self.draft = Some(thread);
                self.persist().await
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Replace the text of one drafted post segment.
    pub fn edit_draft_post(&mut self, segment: &SegmentId, text: &str) -> Result<(), ThreadflowError> {
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| Self::validation("no drafted thread to edit"))?;
        let post = draft
            .posts
            .iter_mut()
            .find(|p| &p.id == segment)
            .ok_or_else(|| Self::validation("unknown post segment"))?;
        post.text = text.to_string();
        Ok(())
    }

    /// Rewrite one drafted post segment through the generation collaborator.
    pub async fn refine_draft_post(
        &mut self,
        segment: &SegmentId,
        instruction: &str,
    ) -> Result<(), ThreadflowError> {
        let Some(draft) = &self.draft else {
            return Err(Self::validation("no drafted thread to refine"));
        };
        let current = draft
            .posts
            .iter()
            .find(|p| &p.id == segment)
            .map(|p| p.text.clone())
            .ok_or_else(|| Self::validation("unknown post segment"))?;
        self.check_generation_budget()?;

        match self.generator.refine_post(&current, instruction).await {
            Ok(revised) => {
                self.last_error = None;
                self.state.generation_count += 1;
                if let Some(draft) = &mut self.draft {
                    if let Some(post) = draft.posts.iter_mut().find(|p| &p.id == segment) {
                        post.text = revised;
                    }
                }
                self.persist().await
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Throw away the current draft.
    pub fn discard_draft(&mut self) {
        self.draft = None;
    }

    fn check_generation_budget(&self) -> Result<(), ThreadflowError> {
        if self.state.generation_count >= self.generation_limit {
            return Err(ThreadflowError::GenerationLimit {
                limit: self.generation_limit,
            });
        }
        Ok(())
    }

    // --- Idea bank ---

    /// Load a list of content ideas (one per line, blanks dropped).
    pub fn import_ideas(&mut self, lines: Vec<String>, source: &str) {
        self.idea_bank = lines
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        self.idea_source = Some(source.to_string());
        self.log_activity(format!(
            "Imported {} ideas from {source}",
            self.idea_bank.len()
        ));
    }

    /// Drop the imported idea list.
    pub fn clear_ideas(&mut self) {
        if let Some(source) = self.idea_source.take() {
            self.log_activity(format!("Removed idea list: {source}"));
        }
        self.idea_bank.clear();
    }

    /// Pick a random idea from the imported list.
    pub fn random_idea(&mut self) -> Option<String> {
        if self.idea_bank.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..self.idea_bank.len());
        let idea = self.idea_bank[index].clone();
        let preview: String = idea.chars().take(30).collect();
        self.log_activity(format!("Used random idea: \"{preview}\""));
        Some(idea)
    }

    // --- Scheduling ---

    /// Hand the current draft to the queue for automatic placement.
    pub async fn queue_draft(
        &mut self,
        account_id: AccountId,
        pillar_id: Option<PillarId>,
    ) -> Result<QueuedPostId, ThreadflowError> {
        if self.state.account(account_id).is_none() {
            return Err(Self::validation("unknown account"));
        }
        let thread = self
            .draft
            .take()
            .ok_or_else(|| Self::validation("no drafted thread to queue"))?;

        let id = self.ids.queued_post();
        let account_name = self
            .state
            .account(account_id)
            .map(|a| a.name.clone())
            .unwrap_or_default();
        self.state.queued.push(QueuedPost {
            id: id.clone(),
            title: thread.title.clone(),
            posts: thread.posts,
            hashtags: thread.hashtags,
            account_id,
            pillar_id,
        });
        self.log_activity(format!(
            "Added thread \"{}\" to the queue for {account_name}.",
            thread.title
        ));
        self.reconcile().await?;
        Ok(id)
    }

    /// Commit the current draft to an explicit, user-picked date and time.
    pub async fn schedule_draft(
        &mut self,
        account_id: AccountId,
        date: NaiveDate,
        time: NaiveTime,
        pillar_id: Option<PillarId>,
    ) -> Result<ScheduledPostId, ThreadflowError> {
        let Some(account) = self.state.account(account_id).cloned() else {
            return Err(Self::validation("unknown account"));
        };
        if self.draft.is_none() {
            return Err(Self::validation("no drafted thread to schedule"));
        }
        let instant = date.and_time(time);
        if self
            .state
            .scheduled
            .iter()
            .any(|p| p.instant() == instant)
        {
            return Err(Self::validation("that date and time is already taken"));
        }

        let thread = self.draft.take().ok_or_else(|| {
            ThreadflowError::Internal("draft vanished during scheduling".into())
        })?;
        let id = self.ids.scheduled_post();
        self.state.scheduled.push(ScheduledPost {
            id: id.clone(),
            title: thread.title.clone(),
            posts: thread.posts,
            hashtags: thread.hashtags,
            account_id: account.id,
            account_name: account.name.clone(),
            platform: account.platform,
            date,
            time,
            pillar_id,
        });
        self.state.scheduled.sort_by_key(ScheduledPost::instant);
        self.log_activity(format!(
            "Scheduled thread \"{}\" for {}.",
            thread.title, account.name
        ));
        self.reconcile().await?;
        Ok(id)
    }

    /// Remove a committed post from the calendar.
    pub async fn unschedule(&mut self, id: &ScheduledPostId) -> Result<(), ThreadflowError> {
        let position = self
            .state
            .scheduled
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| Self::validation("unknown scheduled post"))?;
        let removed = self.state.scheduled.remove(position);
        self.log_activity(format!("Unscheduled thread: \"{}\"", removed.title));
        self.reconcile().await
    }

    /// Remove a backlog entry without scheduling it.
    pub async fn remove_queued(&mut self, id: &QueuedPostId) -> Result<(), ThreadflowError> {
        let position = self
            .state
            .queued
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| Self::validation("unknown queued post"))?;
        let removed = self.state.queued.remove(position);
        self.log_activity(format!("Removed thread \"{}\" from the queue.", removed.title));
        self.reconcile().await
    }

    /// Replace the availability pattern.
    pub async fn set_queue_schedule(
        &mut self,
        schedule: QueueSchedule,
    ) -> Result<(), ThreadflowError> {
        validate_schedule(&schedule)?;
        self.state.queue_schedule = schedule;
        self.log_activity("Updated the queue schedule.");
        self.reconcile().await
    }

    // --- Accounts ---

    /// Connect a new social account to the workspace.
    pub async fn add_account(
        &mut self,
        platform: Platform,
        name: &str,
    ) -> Result<AccountId, ThreadflowError> {
        if name.trim().is_empty() {
            return Err(Self::validation("an account name is required"));
        }
        let id = self.state.next_account_id();
        self.state.accounts.push(Account {
            id,
            platform,
            name: name.trim().to_string(),
        });
        self.log_activity(format!("Connected {platform} account {name}."));
        self.reconcile().await?;
        Ok(id)
    }

    /// Disconnect an account. Backlog entries that referenced it are
    /// removed by the reconcile pass that follows.
    pub async fn remove_account(&mut self, id: AccountId) -> Result<(), ThreadflowError> {
        let position = self
            .state
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| Self::validation("unknown account"))?;
        let removed = self.state.accounts.remove(position);
        self.log_activity(format!("Disconnected account {}.", removed.name));
        self.reconcile().await
    }

    // --- Content pillars ---

    pub async fn add_pillar(
        &mut self,
        name: &str,
        color: &str,
    ) -> Result<PillarId, ThreadflowError> {
        if name.trim().is_empty() {
            return Err(Self::validation("a pillar name is required"));
        }
        let id = self.ids.pillar();
        self.state.pillars.push(ContentPillar {
            id: id.clone(),
            name: name.trim().to_string(),
            color: color.to_string(),
        });
        self.log_activity(format!("Added content pillar \"{}\".", name.trim()));
        self.persist().await?;
        Ok(id)
    }

    pub async fn update_pillar(&mut self, pillar: ContentPillar) -> Result<(), ThreadflowError> {
        let existing = self
            .state
            .pillars
            .iter_mut()
            .find(|p| p.id == pillar.id)
            .ok_or_else(|| Self::validation("unknown content pillar"))?;
        *existing = pillar;
        self.persist().await
    }

    pub async fn delete_pillar(&mut self, id: &PillarId) -> Result<(), ThreadflowError> {
        let position = self
            .state
            .pillars
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| Self::validation("unknown content pillar"))?;
        let removed = self.state.pillars.remove(position);
        self.log_activity(format!("Deleted content pillar \"{}\".", removed.name));
        self.persist().await
    }

    // --- Writing voice ---

    pub async fn add_voice_sample(&mut self, text: &str) -> Result<SampleId, ThreadflowError> {
        if text.trim().is_empty() {
            return Err(Self::validation("a writing sample is required"));
        }
        let id = self.ids.sample();
        self.state.voice_samples.push(VoiceSample {
            id: id.clone(),
            text: text.trim().to_string(),
        });
        self.persist().await?;
        Ok(id)
    }

    pub async fn update_voice_sample(
        &mut self,
        id: &SampleId,
        text: &str,
    ) -> Result<(), ThreadflowError> {
        let sample = self
            .state
            .voice_samples
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| Self::validation("unknown writing sample"))?;
        sample.text = text.trim().to_string();
        self.persist().await
    }

    pub async fn delete_voice_sample(&mut self, id: &SampleId) -> Result<(), ThreadflowError> {
        let position = self
            .state
            .voice_samples
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| Self::validation("unknown writing sample"))?;
        self.state.voice_samples.remove(position);
        self.persist().await
    }

    /// Ask the generation collaborator to characterize the user's writing
    /// voice from the stored samples.
    pub async fn analyze_voice(&mut self) -> Result<(), ThreadflowError> {
        if self.state.voice_samples.is_empty() {
            return Err(Self::validation(
                "at least one writing sample is required for voice analysis",
            ));
        }
        self.check_generation_budget()?;

        match self.generator.analyze_voice(&self.state.voice_samples).await {
            Ok(profile) => {
                self.last_error = None;
                self.state.generation_count += 1;
                self.log_activity(format!("Analyzed writing voice: {}.", profile.tone));
                self.state.voice_profile = Some(profile);
                self.persist().await
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Copy the analyzed voice into the default tone/style used for
    /// subsequent generation prompts.
    pub async fn apply_voice_defaults(&mut self) -> Result<(), ThreadflowError> {
        let profile = self
            .state
            .voice_profile
            .clone()
            .ok_or_else(|| Self::validation("no analyzed voice to apply"))?;
        self.state.default_tone = Some(profile.tone);
        self.state.default_style = Some(profile.style);
        self.log_activity("Applied the analyzed voice to generation defaults.");
        self.persist().await
    }

    // --- Platform connection ---

    /// Store the result of the backend-brokered Threads token exchange.
    pub async fn set_connection(
        &mut self,
        connection: ThreadsConnection,
    ) -> Result<(), ThreadflowError> {
        self.log_activity(format!("Connected Threads account @{}.", connection.username));
        self.state.connection = Some(connection);
        self.persist().await
    }

    // --- Accessors ---

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn accounts(&self) -> &[Account] {
        &self.state.accounts
    }

    pub fn pillars(&self) -> &[ContentPillar] {
        &self.state.pillars
    }

    pub fn queued(&self) -> &[QueuedPost] {
        &self.state.queued
    }

    pub fn scheduled(&self) -> &[ScheduledPost] {
        &self.state.scheduled
    }

    pub fn queue_schedule(&self) -> &QueueSchedule {
        &self.state.queue_schedule
    }

    pub fn voice_samples(&self) -> &[VoiceSample] {
        &self.state.voice_samples
    }

    pub fn voice_profile(&self) -> Option<&threadflow_core::types::VoiceProfile> {
        self.state.voice_profile.as_ref()
    }

    pub fn draft(&self) -> Option<&GeneratedThread> {
        self.draft.as_ref()
    }

    pub fn idea_bank(&self) -> &[String] {
        &self.idea_bank
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn activity(&self) -> &[ActivityEntry] {
        &self.activity
    }

    pub fn generation_count(&self) -> u32 {
        self.state.generation_count
    }

    pub fn connection(&self) -> Option<&ThreadsConnection> {
        self.state.connection.as_ref()
    }
}

/// Validate a replacement availability pattern: weekday indices in range
/// and unique, times well-formed `HH:MM` and unique.
fn validate_schedule(schedule: &QueueSchedule) -> Result<(), ThreadflowError> {
    let mut seen_days = HashSet::new();
    for day in &schedule.days {
        if *day > 6 {
            return Err(ThreadflowError::Validation(format!(
                "weekday index {day} is out of range (0-6)"
            )));
        }
        if !seen_days.insert(*day) {
            return Err(ThreadflowError::Validation(format!(
                "weekday index {day} appears more than once"
            )));
        }
    }

    let mut seen_times = HashSet::new();
    for time in &schedule.times {
        let parsed = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| {
            ThreadflowError::Validation(format!("`{time}` is not a valid HH:MM time"))
        })?;
        if parsed.format("%H:%M").to_string() != *time {
            return Err(ThreadflowError::Validation(format!(
                "`{time}` must be written as zero-padded HH:MM"
            )));
        }
        if !seen_times.insert(time.clone()) {
            return Err(ThreadflowError::Validation(format!(
                "time `{time}` appears more than once"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadflow_scheduler::DEFAULT_HORIZON_DAYS;
    use threadflow_test_utils::{MemoryDocumentStore, MockGenerator};

    fn sunday_noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 4)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    async fn fresh_store(generator: Arc<MockGenerator>) -> (ContentStore, MemoryDocumentStore) {
        let storage = MemoryDocumentStore::new();
        let mut store = ContentStore::sign_in(
            UserId("user-1".into()),
            generator,
            Arc::new(storage.clone()),
            DEFAULT_HORIZON_DAYS,
            DEFAULT_GENERATION_LIMIT,
        )
        .await
        .unwrap();
        store.pin_clock(sunday_noon());
        (store, storage)
    }

    #[tokio::test]
    async fn sign_in_without_stored_state_uses_defaults() {
        let (store, _) = fresh_store(Arc::new(MockGenerator::new())).await;
        assert!(store.accounts().is_empty());
        assert!(store.scheduled().is_empty());
        assert_eq!(store.queue_schedule(), &QueueSchedule::default());
        assert_eq!(store.generation_count(), 0);
    }

    #[tokio::test]
    async fn sign_in_hydrates_a_stored_document() {
        let storage = MemoryDocumentStore::new();
        let user = UserId("user-1".into());
        let mut doc = threadflow_core::WorkspaceDocument::default();
        doc.generation_count = 9;
        storage.seed(&user, doc).await;

        let store = ContentStore::sign_in(
            user,
            Arc::new(MockGenerator::new()),
            Arc::new(storage),
            DEFAULT_HORIZON_DAYS,
            DEFAULT_GENERATION_LIMIT,
        )
        .await
        .unwrap();
        assert_eq!(store.generation_count(), 9);
    }

    #[tokio::test]
    async fn generate_thread_stores_draft_and_counts() {
        let generator = Arc::new(MockGenerator::new());
        let (mut store, storage) = fresh_store(generator.clone()).await;

        store.generate_thread("AI trends for 2026").await.unwrap();

        let draft = store.draft().expect("draft should exist");
        assert!(draft.title.contains("AI trends"));
        assert_eq!(store.generation_count(), 1);
        assert!(store.activity()[0].text.contains("Generated new thread"));
        assert!(store.last_error().is_none());

        // The incremented counter is persisted.
        let doc = storage.get(store.user()).await.unwrap();
        assert_eq!(doc.generation_count, 1);
    }

    #[tokio::test]
    async fn empty_idea_is_rejected_without_mutation() {
        let generator = Arc::new(MockGenerator::new());
        let (mut store, _) = fresh_store(generator.clone()).await;

        let err = store.generate_thread("   ").await.unwrap_err();
        assert!(matches!(err, ThreadflowError::Validation(_)));
        assert!(store.draft().is_none());
        assert_eq!(store.generation_count(), 0);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_failure_sets_error_and_keeps_state() {
        let generator = Arc::new(MockGenerator::new());
        generator.fail_next("model overloaded").await;
        let (mut store, _) = fresh_store(generator.clone()).await;

        let err = store.generate_thread("good idea").await.unwrap_err();
        assert!(matches!(err, ThreadflowError::Provider { .. }));
        assert!(store.draft().is_none());
        assert_eq!(store.generation_count(), 0);
        assert!(store.last_error().unwrap().contains("model overloaded"));
    }

    #[tokio::test]
    async fn generation_limit_refuses_before_contacting_the_provider() {
        let generator = Arc::new(MockGenerator::new());
        let storage = MemoryDocumentStore::new();
        let mut store = ContentStore::sign_in(
            UserId("user-1".into()),
            generator.clone(),
            Arc::new(storage),
            DEFAULT_HORIZON_DAYS,
            2, // tiny ceiling for the test
        )
        .await
        .unwrap();
        store.pin_clock(sunday_noon());

        store.generate_thread("one").await.unwrap();
        store.generate_thread("two").await.unwrap();
        let err = store.generate_thread("three").await.unwrap_err();

        assert!(matches!(err, ThreadflowError::GenerationLimit { limit: 2 }));
        // Two calls reached the collaborator; the third was refused locally.
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn queued_draft_is_auto_scheduled_on_reconcile() {
        let (mut store, storage) = fresh_store(Arc::new(MockGenerator::new())).await;
        let account = store.add_account(Platform::Threads, "@corp").await.unwrap();
        store.generate_thread("queue me").await.unwrap();

        store.queue_draft(account, None).await.unwrap();

        // Default pattern is Mon/Wed/Fri 10:00; pinned "now" is Sunday noon,
        // so the entry lands on Monday 10:00.
        assert!(store.queued().is_empty());
        assert_eq!(store.scheduled().len(), 1);
        let placed = &store.scheduled()[0];
        assert_eq!(placed.date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(placed.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(placed.account_name, "@corp");
        assert!(store.draft().is_none());

        // The placement is persisted.
        let doc = storage.get(store.user()).await.unwrap();
        assert_eq!(doc.scheduled.len(), 1);
        assert!(doc.queued.is_empty());
    }

    #[tokio::test]
    async fn queued_draft_stays_queued_under_an_empty_pattern() {
        let (mut store, _) = fresh_store(Arc::new(MockGenerator::new())).await;
        let account = store.add_account(Platform::Threads, "@corp").await.unwrap();
        store
            .set_queue_schedule(QueueSchedule::empty())
            .await
            .unwrap();
        store.generate_thread("park me").await.unwrap();

        store.queue_draft(account, None).await.unwrap();

        assert_eq!(store.queued().len(), 1);
        assert!(store.scheduled().is_empty());
    }

    #[tokio::test]
    async fn schedule_draft_rejects_an_occupied_slot() {
        let (mut store, _) = fresh_store(Arc::new(MockGenerator::new())).await;
        let account = store.add_account(Platform::Threads, "@corp").await.unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        store.generate_thread("first").await.unwrap();
        store.schedule_draft(account, date, time, None).await.unwrap();

        store.generate_thread("second").await.unwrap();
        let err = store
            .schedule_draft(account, date, time, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ThreadflowError::Validation(_)));
        // The rejected draft is still there to be rescheduled.
        assert!(store.draft().is_some());
        assert_eq!(store.scheduled().len(), 1);
    }

    #[tokio::test]
    async fn unschedule_removes_and_persists() {
        let (mut store, storage) = fresh_store(Arc::new(MockGenerator::new())).await;
        let account = store.add_account(Platform::Threads, "@corp").await.unwrap();
        store.generate_thread("scheduled").await.unwrap();
        let id = store
            .schedule_draft(
                account,
                NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                None,
            )
            .await
            .unwrap();

        store.unschedule(&id).await.unwrap();
        assert!(store.scheduled().is_empty());
        let doc = storage.get(store.user()).await.unwrap();
        assert!(doc.scheduled.is_empty());
    }

    #[tokio::test]
    async fn removing_an_account_drops_its_queued_posts() {
        let (mut store, _) = fresh_store(Arc::new(MockGenerator::new())).await;
        let account = store.add_account(Platform::Threads, "@doomed").await.unwrap();
        store
            .set_queue_schedule(QueueSchedule::empty())
            .await
            .unwrap();
        store.generate_thread("orphan").await.unwrap();
        store.queue_draft(account, None).await.unwrap();
        assert_eq!(store.queued().len(), 1);

        store.remove_account(account).await.unwrap();

        assert!(store.queued().is_empty());
        assert!(store.scheduled().is_empty());
        assert!(
            store
                .activity()
                .iter()
                .any(|e| e.text.contains("no longer exists"))
        );
    }

    #[tokio::test]
    async fn activity_log_is_bounded_to_twenty_entries() {
        let (mut store, _) = fresh_store(Arc::new(MockGenerator::new())).await;
        for n in 0..25 {
            store.add_pillar(&format!("Pillar {n}"), "#4A90E2").await.unwrap();
        }
        assert_eq!(store.activity().len(), 20);
        // Newest first.
        assert!(store.activity()[0].text.contains("Pillar 24"));
    }

    #[tokio::test]
    async fn set_queue_schedule_validates_times() {
        let (mut store, _) = fresh_store(Arc::new(MockGenerator::new())).await;

        let bad_format = QueueSchedule {
            days: vec![1],
            times: vec!["9am".into()],
        };
        assert!(store.set_queue_schedule(bad_format).await.is_err());

        let unpadded = QueueSchedule {
            days: vec![1],
            times: vec!["9:00".into()],
        };
        assert!(store.set_queue_schedule(unpadded).await.is_err());

        let duplicate = QueueSchedule {
            days: vec![1],
            times: vec!["09:00".into(), "09:00".into()],
        };
        assert!(store.set_queue_schedule(duplicate).await.is_err());

        let out_of_range_day = QueueSchedule {
            days: vec![7],
            times: vec!["09:00".into()],
        };
        assert!(store.set_queue_schedule(out_of_range_day).await.is_err());

        let good = QueueSchedule {
            days: vec![0, 6],
            times: vec!["09:00".into(), "14:30".into()],
        };
        assert!(store.set_queue_schedule(good).await.is_ok());
    }

    #[tokio::test]
    async fn voice_analysis_flow_applies_defaults() {
        let (mut store, _) = fresh_store(Arc::new(MockGenerator::new())).await;

        // Analysis with no samples is a validation error.
        assert!(store.analyze_voice().await.is_err());

        let sample = store.add_voice_sample("We ship, then we talk.").await.unwrap();
        store
            .update_voice_sample(&sample, "We ship first. Then we talk.")
            .await
            .unwrap();
        assert_eq!(
            store.voice_samples()[0].text,
            "We ship first. Then we talk."
        );
        store.analyze_voice().await.unwrap();
        assert!(store.voice_profile().is_some());

        store.apply_voice_defaults().await.unwrap();
        store.generate_thread("tone check").await.unwrap();
        // One analysis + one generation.
        assert_eq!(store.generation_count(), 2);
    }

    #[tokio::test]
    async fn sign_out_resets_session_state_only() {
        let (mut store, storage) = fresh_store(Arc::new(MockGenerator::new())).await;
        store.add_account(Platform::Threads, "@corp").await.unwrap();
        store.generate_thread("ephemeral").await.unwrap();
        store.import_ideas(vec!["a".into(), "b".into()], "ideas.csv");

        store.sign_out();

        assert!(store.accounts().is_empty());
        assert!(store.draft().is_none());
        assert!(store.idea_bank().is_empty());
        assert!(store.activity().is_empty());
        // External storage still holds the last persisted document.
        let doc = storage.get(&UserId("user-1".into())).await.unwrap();
        assert_eq!(doc.accounts.len(), 1);
    }

    #[tokio::test]
    async fn edit_draft_post_replaces_segment_text() {
        let (mut store, _) = fresh_store(Arc::new(MockGenerator::new())).await;
        store.generate_thread("editable").await.unwrap();
        let segment = store.draft().unwrap().posts[0].id.clone();

        store.edit_draft_post(&segment, "Rewritten opener").unwrap();
        assert_eq!(store.draft().unwrap().posts[0].text, "Rewritten opener");

        let missing = SegmentId("nope".into());
        assert!(store.edit_draft_post(&missing, "x").is_err());
    }

    #[tokio::test]
    async fn refine_draft_post_goes_through_the_generator() {
        let generator = Arc::new(MockGenerator::new());
        let (mut store, _) = fresh_store(generator.clone()).await;
        store.generate_thread("refine me").await.unwrap();
        let segment = store.draft().unwrap().posts[0].id.clone();

        store.refine_draft_post(&segment, "shorter").await.unwrap();
        assert!(store.draft().unwrap().posts[0].text.contains("shorter"));
        assert_eq!(store.generation_count(), 2);
    }

    #[tokio::test]
    async fn random_idea_draws_from_the_imported_bank() {
        let (mut store, _) = fresh_store(Arc::new(MockGenerator::new())).await;
        assert!(store.random_idea().is_none());

        store.import_ideas(
            vec!["alpha".into(), "  ".into(), "beta".into()],
            "ideas.csv",
        );
        assert_eq!(store.idea_bank().len(), 2);

        let idea = store.random_idea().unwrap();
        assert!(idea == "alpha" || idea == "beta");

        store.clear_ideas();
        assert!(store.idea_bank().is_empty());
    }
}
